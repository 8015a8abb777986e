//! Pomodoro duration configuration.
//!
//! This module provides the [`PomodoroConfig`] type which holds the length
//! of the work and break phases of the pomodoro timer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default work phase length (25 minutes).
pub const DEFAULT_WORK_MINUTES: u32 = 25;

/// Default break phase length (5 minutes).
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Minimum allowed phase length (1 minute).
pub const MIN_PHASE_MINUTES: u32 = 1;

/// Maximum allowed phase length (3 hours).
pub const MAX_PHASE_MINUTES: u32 = 180;

/// Configuration for the pomodoro timer.
///
/// # Examples
///
/// ```
/// use taskboard_config::PomodoroConfig;
///
/// let config = PomodoroConfig::default();
/// assert_eq!(config.work_minutes, 25);
/// assert_eq!(config.break_minutes, 5);
///
/// let config = PomodoroConfig::new(50, 10);
/// assert_eq!(config.work_duration().as_secs(), 3000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    /// Length of the work phase in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,

    /// Length of the break phase in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

fn default_work_minutes() -> u32 {
    DEFAULT_WORK_MINUTES
}

fn default_break_minutes() -> u32 {
    DEFAULT_BREAK_MINUTES
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl PomodoroConfig {
    /// Creates a configuration with the given phase lengths in minutes.
    #[must_use]
    pub const fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_minutes,
            break_minutes,
        }
    }

    /// Returns the work phase length.
    #[must_use]
    pub const fn work_duration(&self) -> Duration {
        Duration::from_secs(self.work_minutes as u64 * 60)
    }

    /// Returns the break phase length.
    #[must_use]
    pub const fn break_duration(&self) -> Duration {
        Duration::from_secs(self.break_minutes as u64 * 60)
    }

    /// Validates the pomodoro configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either phase length is outside
    /// [`MIN_PHASE_MINUTES`]..=[`MAX_PHASE_MINUTES`].
    pub fn validate(&self) -> crate::Result<()> {
        check_phase("work_minutes", self.work_minutes)?;
        check_phase("break_minutes", self.break_minutes)
    }
}

fn check_phase(name: &str, minutes: u32) -> crate::Result<()> {
    if minutes < MIN_PHASE_MINUTES {
        return Err(crate::ConfigError::InvalidPomodoro {
            reason: format!("{name} {minutes} is below minimum of {MIN_PHASE_MINUTES} minutes"),
        });
    }

    if minutes > MAX_PHASE_MINUTES {
        return Err(crate::ConfigError::InvalidPomodoro {
            reason: format!("{name} {minutes} exceeds maximum of {MAX_PHASE_MINUTES} minutes"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PomodoroConfig::default();
        assert_eq!(config.work_duration(), Duration::from_secs(1500));
        assert_eq!(config.break_duration(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_zero_work() {
        let err = PomodoroConfig::new(0, 5).validate().unwrap_err();
        assert!(err.to_string().contains("work_minutes 0 is below minimum"));
    }

    #[test]
    fn validate_break_above_maximum() {
        let err = PomodoroConfig::new(25, 181).validate().unwrap_err();
        assert!(err.to_string().contains("break_minutes 181 exceeds maximum"));
    }

    #[test]
    fn validate_at_boundaries() {
        assert!(PomodoroConfig::new(MIN_PHASE_MINUTES, MIN_PHASE_MINUTES).validate().is_ok());
        assert!(PomodoroConfig::new(MAX_PHASE_MINUTES, MAX_PHASE_MINUTES).validate().is_ok());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: PomodoroConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PomodoroConfig::default());
    }

    #[test]
    fn deserialize_partial() {
        let config: PomodoroConfig = serde_json::from_str(r#"{"break_minutes": 10}"#).unwrap();
        assert_eq!(config.work_minutes, DEFAULT_WORK_MINUTES);
        assert_eq!(config.break_minutes, 10);
    }
}
