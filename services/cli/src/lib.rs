mod cli;
mod commands;

use job_match::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
