//! Layered defaults for the example binary only. `solver::solve` itself
//! takes every knob explicitly — nothing here is read by the library.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub solver: SolverSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SolverSettings {
    pub max_time_seconds: f64,
    pub relax_requirements: bool,
    pub relax_shifts: bool,
    pub relax_days_off: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_time_seconds: 30.0,
            relax_requirements: false,
            relax_shifts: false,
            relax_days_off: false,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        match config.try_deserialize() {
            Ok(settings) => Ok(settings),
            Err(_) if environment == "development" => Ok(Settings {
                solver: SolverSettings::default(),
            }),
            Err(e) => Err(e),
        }
    }
}
