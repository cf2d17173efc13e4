//! Client configuration

use shared::models::{DEFAULT_SLOT_STEP_MINUTES, MINUTES_PER_DAY};

use crate::error::{ClientError, ClientResult};

/// Default reservation length offered by the booking form
pub const DEFAULT_DURATION_MINUTES: u32 = 90;

/// Client configuration for the reservation service
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | RESERVE_API_URL | http://localhost:3000/api | Service base URL |
/// | RESERVE_TIMEOUT_SECS | 30 | Request timeout |
/// | RESERVE_SLOT_STEP_MINUTES | 30 | Distance between offered time slots |
/// | RESERVE_DEFAULT_DURATION_MINUTES | 90 | Default reservation length |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "https://restaurants.example.com/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Step between generated time slots, in minutes
    pub slot_step_minutes: u32,

    /// Duration a new draft starts with, in minutes
    pub default_duration_minutes: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            slot_step_minutes: DEFAULT_SLOT_STEP_MINUTES,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    /// Loads configuration from the environment.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("RESERVE_API_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("RESERVE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            slot_step_minutes: std::env::var("RESERVE_SLOT_STEP_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.slot_step_minutes),
            default_duration_minutes: std::env::var("RESERVE_DEFAULT_DURATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_duration_minutes),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the slot step
    pub fn with_slot_step(mut self, minutes: u32) -> Self {
        self.slot_step_minutes = minutes;
        self
    }

    /// Set the default reservation duration
    pub fn with_default_duration(mut self, minutes: u32) -> Self {
        self.default_duration_minutes = minutes;
        self
    }

    /// Rejects settings the client cannot work with
    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "base_url must be http(s): {}",
                self.base_url
            )));
        }
        if self.slot_step_minutes == 0 || self.slot_step_minutes > MINUTES_PER_DAY {
            return Err(ClientError::Config(format!(
                "slot_step_minutes must be between 1 and {MINUTES_PER_DAY}"
            )));
        }
        if self.default_duration_minutes == 0 {
            return Err(ClientError::Config(
                "default_duration_minutes must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000/api")
    }
}
