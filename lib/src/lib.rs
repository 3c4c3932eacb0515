use anyhow::Result;
use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
pub mod calendar;
pub mod clock;
pub mod precision;
pub mod timer;
pub mod util;

pub use calendar::{format_at, format_now, CalendarFormatter, Zone};
pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use precision::{convert_duration, convert_nanos, convert_raw, Precision};
pub use timer::ElapsedTimer;
pub use util::Elapsed;

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub timer: TimerConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    pub precision: Precision,
    pub tare_on_read: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    pub pattern: String,
    pub zone: Zone,
}

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("precision selector {0} is out of range")]
    InvalidPrecision(u8),
    #[error("unknown precision: {0}")]
    UnknownPrecision(String),
    #[error("utc offset of {0} seconds is out of range")]
    InvalidOffset(i32),
}

impl AppConfig {
    /// Loads `$CONFIG_PATH`, or `config.toml` in the working directory, and
    /// sets up logging.
    pub fn load() -> Result<Self> {
        env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info"))
            .try_init()
            .ok();
        let path = env::current_dir()?;
        debug!("The current directory is {}", path.display());
        let config_path =
            env::var("CONFIG_PATH").unwrap_or(format!("{}/config.toml", path.display()));
        Ok(Self::load_from(config_path))
    }

    /// Reads the file at `path`, writing defaults there if it is missing.
    /// Unreadable files fall back to defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let cfg = confy::load_path(path.as_ref()).unwrap_or_else(|e| {
            log::error!("Loading default config due to:\n{}", e);
            AppConfig::default()
        });
        debug!("config loaded: {:#?}", cfg);
        cfg
    }

    pub fn formatter(&self) -> Result<CalendarFormatter, ClockError> {
        CalendarFormatter::new(self.calendar.zone)
    }

    pub fn format_now(&self) -> Result<String, ClockError> {
        Ok(self.formatter()?.format_now(&self.calendar.pattern))
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            precision: Precision::Milliseconds,
            tare_on_read: false,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            pattern: String::from("%Y-%m-%d %H:%M:%S"),
            zone: Zone::Local,
        }
    }
}
