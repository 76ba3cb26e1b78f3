use std::env;
use std::fmt;
use std::str::FromStr;

use crate::compatibility::evaluation::{ScoringConfig, SetMatching, DEFAULT_HOURS_FALLOFF_SPAN};
use crate::compatibility::factors::FactorKind;
use crate::compatibility::ranking::{RankOptions, DEFAULT_PARALLEL_THRESHOLD};
use crate::compatibility::weights::{WeightError, WeightPolicy};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub weights: WeightPolicy,
    pub ranking: RankingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut weights = WeightPolicy::equal();
        for factor in FactorKind::ordered() {
            let variable = weight_variable(factor);
            if let Some(weight) = parse_var::<f64>(variable)? {
                weights = weights
                    .with_weight(factor, weight)
                    .map_err(|source| ConfigError::InvalidWeight { variable, source })?;
            }
        }

        let hours_falloff_span =
            parse_var::<f64>("MATCH_HOURS_FALLOFF")?.unwrap_or(DEFAULT_HOURS_FALLOFF_SPAN);
        if !hours_falloff_span.is_finite() || hours_falloff_span <= 0.0 {
            return Err(ConfigError::InvalidNumber {
                variable: "MATCH_HOURS_FALLOFF",
                value: hours_falloff_span.to_string(),
            });
        }

        let set_matching = match read_var("MATCH_SET_MATCHING") {
            Some(raw) => {
                SetMatching::parse(&raw).ok_or(ConfigError::InvalidSetMatching { value: raw })?
            }
            None => SetMatching::default(),
        };

        let min_score = parse_var::<f64>("MATCH_MIN_SCORE")?;
        if let Some(value) = min_score {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidMinScore { value });
            }
        }

        let ranking = RankingConfig {
            min_score,
            limit: parse_var::<usize>("MATCH_TOP_N")?,
            parallel_threshold: parse_var::<usize>("MATCH_PARALLEL_THRESHOLD")?
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::new(hours_falloff_span, set_matching),
            weights,
            ranking,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied to ranking runs unless a caller overrides them.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub min_score: Option<f64>,
    pub limit: Option<usize>,
    pub parallel_threshold: usize,
}

impl RankingConfig {
    pub fn options(&self) -> RankOptions {
        RankOptions {
            min_score: self.min_score,
            limit: self.limit,
            open_at: None,
        }
    }
}

fn weight_variable(factor: FactorKind) -> &'static str {
    match factor {
        FactorKind::Location => "MATCH_WEIGHT_LOCATION",
        FactorKind::Hours => "MATCH_WEIGHT_HOURS",
        FactorKind::WorkMode => "MATCH_WEIGHT_WORK_MODE",
        FactorKind::Accommodations => "MATCH_WEIGHT_ACCOMMODATIONS",
        FactorKind::Qualifications => "MATCH_WEIGHT_QUALIFICATIONS",
    }
}

fn read_var(variable: &str) -> Option<String> {
    env::var(variable)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(variable: &'static str) -> Result<Option<T>, ConfigError> {
    read_var(variable)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { variable, value })
        })
        .transpose()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        variable: &'static str,
        value: String,
    },
    InvalidWeight {
        variable: &'static str,
        source: WeightError,
    },
    InvalidSetMatching {
        value: String,
    },
    InvalidMinScore {
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a valid number (found '{value}')")
            }
            ConfigError::InvalidWeight { variable, source } => {
                write!(f, "{variable} is not a usable weight: {source}")
            }
            ConfigError::InvalidSetMatching { value } => {
                write!(
                    f,
                    "MATCH_SET_MATCHING must be 'exact' or 'contains' (found '{value}')"
                )
            }
            ConfigError::InvalidMinScore { value } => {
                write!(f, "MATCH_MIN_SCORE must be within [0, 1] (found {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidWeight { source, .. } => Some(source),
            ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidSetMatching { .. }
            | ConfigError::InvalidMinScore { .. } => None,
        }
    }
}
