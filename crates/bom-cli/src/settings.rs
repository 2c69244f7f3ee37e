// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Best-effort preference loading for the console.
use bom_app_core::config::{ConfigService, ConfigStore};
use bom_app_core::prefs::{CliPrefs, CLI_PREFS_KEY};
use tracing::warn;

use crate::repl::ReplOptions;

/// Loads [`CliPrefs`], writing defaults on first use.
///
/// A missing service, an unreadable blob, or a failed save all fall back to
/// defaults; preferences never keep the console from starting.
pub fn load_prefs<S: ConfigStore>(config: Option<&ConfigService<S>>) -> CliPrefs {
    let Some(config) = config else {
        return CliPrefs::default();
    };
    match config.load_or_init::<CliPrefs>(CLI_PREFS_KEY) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!(error = %e, "ignoring unusable preferences");
            CliPrefs::default()
        }
    }
}

impl From<&CliPrefs> for ReplOptions {
    fn from(prefs: &CliPrefs) -> Self {
        Self {
            error_prefix: prefs.error_prefix.clone(),
            echo_commands: prefs.echo_commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_dry_tests::InMemoryConfigStore;

    #[test]
    fn first_run_persists_defaults() {
        let store = InMemoryConfigStore::new();
        let service = ConfigService::new(store.clone());
        assert_eq!(load_prefs(Some(&service)), CliPrefs::default());
        assert!(store.contains_key(CLI_PREFS_KEY));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn stored_prefs_win() {
        let store = InMemoryConfigStore::with_entry(
            CLI_PREFS_KEY,
            r#"{"error_prefix":"ERR ","echo_commands":true}"#,
        );
        let prefs = load_prefs(Some(&ConfigService::new(store)));
        assert_eq!(prefs.error_prefix, "ERR ");
        assert_eq!(
            ReplOptions::from(&prefs),
            ReplOptions {
                error_prefix: "ERR ".into(),
                echo_commands: true,
            }
        );
    }

    #[test]
    fn broken_store_falls_back_to_defaults() {
        let store = InMemoryConfigStore::with_entry(CLI_PREFS_KEY, "not json");
        assert_eq!(
            load_prefs(Some(&ConfigService::new(store.clone()))),
            CliPrefs::default()
        );
        // The unreadable blob is left for the user to fix.
        assert_eq!(store.get(CLI_PREFS_KEY).as_deref(), Some(&b"not json"[..]));

        let failing = InMemoryConfigStore::new();
        failing.set_fail_on_load(true);
        assert_eq!(
            load_prefs(Some(&ConfigService::new(failing))),
            CliPrefs::default()
        );
        assert_eq!(load_prefs::<InMemoryConfigStore>(None), CliPrefs::default());
    }
}
