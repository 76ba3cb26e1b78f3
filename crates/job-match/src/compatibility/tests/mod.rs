mod common;
mod factors;
