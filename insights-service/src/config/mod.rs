use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Rows with a total at or below this are too small to judge.
pub const DEFAULT_GHOST_MIN_TOTAL: u64 = 100;

/// Share of 0-5 year olds above which a row is flagged.
pub const DEFAULT_GHOST_CHILD_RATIO: f64 = 0.90;

/// Number of districts returned by the migration pulse.
pub const DEFAULT_MIGRATION_TOP_N: usize = 10;

pub const DEFAULT_CHAT_PLACEHOLDER: &str = "This is a placeholder answer from the RAG model.";

#[derive(Debug, Clone)]
pub struct InsightsConfig {
    pub common: core_config::Config,
    pub datasets: DatasetConfig,
    pub detection: DetectionConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// CSV with `state, district, age_0_5, age_5_17, age_18_greater`.
    pub enrolment_path: PathBuf,
    /// CSV with `district, demo_age_18_greater`.
    pub demographic_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DetectionConfig {
    pub ghost_min_total: u64,
    pub ghost_child_ratio: f64,
    pub migration_top_n: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ghost_min_total: DEFAULT_GHOST_MIN_TOTAL,
            ghost_child_ratio: DEFAULT_GHOST_CHILD_RATIO,
            migration_top_n: DEFAULT_MIGRATION_TOP_N,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub placeholder_response: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            placeholder_response: DEFAULT_CHAT_PLACEHOLDER.to_string(),
        }
    }
}

impl InsightsConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let detection = DetectionConfig {
            ghost_min_total: parse_env(
                "GHOST_MIN_TOTAL",
                &DEFAULT_GHOST_MIN_TOTAL.to_string(),
                is_prod,
            )?,
            ghost_child_ratio: parse_env(
                "GHOST_CHILD_RATIO",
                &DEFAULT_GHOST_CHILD_RATIO.to_string(),
                is_prod,
            )?,
            migration_top_n: parse_env(
                "MIGRATION_TOP_N",
                &DEFAULT_MIGRATION_TOP_N.to_string(),
                is_prod,
            )?,
        };
        detection.validate()?;

        Ok(InsightsConfig {
            common: common_config,
            datasets: DatasetConfig {
                enrolment_path: get_env("ENROLMENT_CSV_PATH", Some("data/enrolment.csv"), is_prod)?
                    .into(),
                demographic_path: get_env(
                    "DEMOGRAPHIC_CSV_PATH",
                    Some("data/demographic.csv"),
                    is_prod,
                )?
                .into(),
            },
            detection,
            chat: ChatConfig {
                placeholder_response: get_env(
                    "CHAT_PLACEHOLDER_RESPONSE",
                    Some(DEFAULT_CHAT_PLACEHOLDER),
                    is_prod,
                )?,
            },
        })
    }
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.ghost_child_ratio) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GHOST_CHILD_RATIO must be within [0, 1], got {}",
                self.ghost_child_ratio
            )));
        }
        if self.migration_top_n == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MIGRATION_TOP_N must be greater than zero"
            )));
        }
        Ok(())
    }
}

fn parse_env<T>(key: &str, default: &str, is_prod: bool) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(key, Some(default), is_prod)?;
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
