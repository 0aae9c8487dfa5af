//! Log output settings.

use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "info".to_owned()
}

/// Settings for the `tracing` subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `TASKBOARD_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}
