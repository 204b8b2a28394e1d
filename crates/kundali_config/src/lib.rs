//! Layered configuration for the kundali tools.
//!
//! Precedence, lowest first: built-in defaults, an optional TOML file
//! (explicit path or `KUNDALI_CONFIG`), then `KUNDALI__*` environment
//! variables (`KUNDALI__DASHA_HORIZON_YEARS=80`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use kundali_chart::{AyanamshaModel, ChartOptions, DayWindow};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the TOML file.
pub const CONFIG_PATH_ENV: &str = "KUNDALI_CONFIG";
pub const ENV_PREFIX: &str = "KUNDALI";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KundaliConfig {
    pub ayanamsa: AyanamshaModel,
    /// Julian years from birth covered by the Mahadasha chain.
    pub dasha_horizon_years: f64,
    /// First local hour counted as day, inclusive.
    pub day_start_hour: u32,
    /// First local hour counted as night.
    pub day_end_hour: u32,
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for KundaliConfig {
    fn default() -> Self {
        Self {
            ayanamsa: AyanamshaModel::Lahiri,
            dasha_horizon_years: 120.0,
            day_start_hour: 6,
            day_end_hour: 18,
            log_filter: "info".to_string(),
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    let d = KundaliConfig::default();
    Config::builder()
        .set_default("ayanamsa", d.ayanamsa.name())?
        .set_default("dasha_horizon_years", d.dasha_horizon_years)?
        .set_default("day_start_hour", i64::from(d.day_start_hour))?
        .set_default("day_end_hour", i64::from(d.day_end_hour))?
        .set_default("log_filter", d.log_filter)
}

fn environment(vars: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .source(vars)
}

impl KundaliConfig {
    /// Load from defaults, file and process environment.
    ///
    /// An explicit `path` must exist; without one, `KUNDALI_CONFIG` is
    /// consulted, and with neither only defaults and environment apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
        debug!(path = ?path, "loading configuration");

        let mut builder = defaults()?;
        if let Some(p) = &path {
            builder = builder.add_source(File::from(p.as_path()).format(FileFormat::Toml));
        }
        Self::finish(builder.add_source(environment(None)))
    }

    /// Defaults overlaid with a TOML document and an explicit variable map
    /// in place of the process environment.
    pub fn from_toml_str(
        toml: &str,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let builder = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(environment(Some(env.unwrap_or_default())));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        debug!(
            ayanamsa = cfg.ayanamsa.name(),
            horizon = cfg.dasha_horizon_years,
            "configuration ready"
        );
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dasha_horizon_years.is_finite() && self.dasha_horizon_years > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dasha_horizon_years must be positive, got {}",
                self.dasha_horizon_years
            )));
        }
        if self.day_start_hour >= self.day_end_hour || self.day_end_hour > 24 {
            return Err(ConfigError::Invalid(format!(
                "day window {}..{} must satisfy start < end <= 24",
                self.day_start_hour, self.day_end_hour
            )));
        }
        Ok(())
    }

    pub fn to_options(&self) -> ChartOptions {
        ChartOptions {
            dasha_horizon_years: self.dasha_horizon_years,
            day_window: DayWindow {
                start_hour: self.day_start_hour,
                end_hour: self.day_end_hour,
            },
        }
    }

    /// Effective configuration as a TOML document.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
