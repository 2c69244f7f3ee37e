// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted preferences for the BOM console.

use serde::{Deserialize, Serialize};

/// Config key under which [`CliPrefs`] are stored.
pub const CLI_PREFS_KEY: &str = "cli";

/// Saved preferences for the command loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliPrefs {
    /// Text printed before every error message.
    pub error_prefix: String,
    /// Echo each command line before its output.
    pub echo_commands: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for CliPrefs {
    fn default() -> Self {
        Self {
            error_prefix: "Error, ".to_owned(),
            echo_commands: false,
            log_filter: "warn".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let prefs: CliPrefs = serde_json::from_str(r#"{"echo_commands": true}"#).unwrap();
        assert!(prefs.echo_commands);
        assert_eq!(prefs.error_prefix, "Error, ");
        assert_eq!(prefs.log_filter, "warn");
    }

    #[test]
    fn json_shape_is_stable() {
        let json = serde_json::to_value(CliPrefs::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error_prefix": "Error, ",
                "echo_commands": false,
                "log_filter": "warn"
            })
        );
    }
}
