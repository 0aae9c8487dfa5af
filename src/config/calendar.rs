//! Calendar settings for date filters.

use super::ConfigError;
use crate::shared::Calendar;
use serde::{Deserialize, Serialize};

/// Offset used to decide which calendar day a timestamp falls on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Minutes east of UTC; `0` means UTC days.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl CalendarConfig {
    /// Builds the calendar described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the offset is a day or more.
    pub fn calendar(&self) -> Result<Calendar, ConfigError> {
        Calendar::from_offset_minutes(self.utc_offset_minutes).map_err(|err| {
            ConfigError::InvalidValue {
                field: "calendar.utc_offset_minutes".to_owned(),
                reason: err.to_string(),
            }
        })
    }
}
