//! Process-wide enforcement configuration.
//!
//! Read once from the environment on first use, unless a configuration was
//! installed explicitly before any enforcement ran:
//!
//! - `TENSILE_STACK_LIMIT`: maximum captured frames (default and ceiling: 100)
//! - `TENSILE_CAPTURE_STACKS`: `0`/`false`/`no`/`off` disables stack capture
//! - `TENSILE_LEGACY_RAND_PHRASE`: report every cuRAND failure as a CUDA
//!   launch failure, as older diagnostics did

use std::env;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Upper bound on captured stack frames.
pub const MAX_STACK_LIMIT: usize = 100;

const STACK_LIMIT_ENV: &str = "TENSILE_STACK_LIMIT";
const CAPTURE_STACKS_ENV: &str = "TENSILE_CAPTURE_STACKS";
const LEGACY_RAND_ENV: &str = "TENSILE_LEGACY_RAND_PHRASE";

static CONFIG: OnceLock<EnforceConfig> = OnceLock::new();

/// Errors from installing process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("enforcement config is already initialized")]
    AlreadyInitialized,

    #[error("a stack capturer is already installed")]
    CapturerAlreadyInstalled,
}

/// Tunables for error construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnforceConfig {
    /// Maximum frames kept per error. Clamped to `1..=MAX_STACK_LIMIT`.
    pub stack_limit: usize,
    /// Whether the default capturer walks the stack at all.
    pub capture_stacks: bool,
    /// Report cuRAND failures as CUDA launch failures.
    pub legacy_rand_phrase: bool,
}

impl Default for EnforceConfig {
    fn default() -> Self {
        EnforceConfig {
            stack_limit: MAX_STACK_LIMIT,
            capture_stacks: true,
            legacy_rand_phrase: false,
        }
    }
}

impl EnforceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults. Unparsable values are logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = EnforceConfig::default();

        if let Some(raw) = lookup(STACK_LIMIT_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(limit) => config.stack_limit = limit,
                Err(_) => tracing::warn!(
                    variable = STACK_LIMIT_ENV,
                    value = %raw,
                    "ignoring unparsable stack limit"
                ),
            }
        }
        if let Some(raw) = lookup(CAPTURE_STACKS_ENV) {
            match parse_flag(&raw) {
                Some(flag) => config.capture_stacks = flag,
                None => tracing::warn!(
                    variable = CAPTURE_STACKS_ENV,
                    value = %raw,
                    "ignoring unparsable flag"
                ),
            }
        }
        if let Some(raw) = lookup(LEGACY_RAND_ENV) {
            match parse_flag(&raw) {
                Some(flag) => config.legacy_rand_phrase = flag,
                None => tracing::warn!(
                    variable = LEGACY_RAND_ENV,
                    value = %raw,
                    "ignoring unparsable flag"
                ),
            }
        }

        config
    }

    /// The frame limit actually applied to captures.
    pub fn effective_stack_limit(&self) -> usize {
        self.stack_limit.clamp(1, MAX_STACK_LIMIT)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// The process-wide configuration, initialised from the environment on
/// first access.
pub fn global() -> &'static EnforceConfig {
    CONFIG.get_or_init(EnforceConfig::from_env)
}

/// Installs `config` as the process-wide configuration.
///
/// Fails if the configuration was already installed or already read.
pub fn install(config: EnforceConfig) -> Result<(), ConfigError> {
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = EnforceConfig::from_lookup(|_| None);
        assert_eq!(config, EnforceConfig::default());
        assert_eq!(config.effective_stack_limit(), 100);
        assert!(config.capture_stacks);
        assert!(!config.legacy_rand_phrase);
    }

    #[test]
    fn reads_all_variables() {
        let config = EnforceConfig::from_lookup(lookup_from(&[
            ("TENSILE_STACK_LIMIT", " 12 "),
            ("TENSILE_CAPTURE_STACKS", "off"),
            ("TENSILE_LEGACY_RAND_PHRASE", "YES"),
        ]));
        assert_eq!(config.stack_limit, 12);
        assert!(!config.capture_stacks);
        assert!(config.legacy_rand_phrase);
    }

    #[test]
    fn unparsable_values_keep_defaults() {
        let config = EnforceConfig::from_lookup(lookup_from(&[
            ("TENSILE_STACK_LIMIT", "lots"),
            ("TENSILE_CAPTURE_STACKS", "maybe"),
        ]));
        assert_eq!(config, EnforceConfig::default());
    }

    #[test]
    fn stack_limit_is_clamped() {
        let high = EnforceConfig {
            stack_limit: 5000,
            ..EnforceConfig::default()
        };
        assert_eq!(high.effective_stack_limit(), MAX_STACK_LIMIT);

        let zero = EnforceConfig {
            stack_limit: 0,
            ..EnforceConfig::default()
        };
        assert_eq!(zero.effective_stack_limit(), 1);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EnforceConfig =
            serde_json::from_str(r#"{"legacy_rand_phrase": true}"#).unwrap();
        assert!(config.legacy_rand_phrase);
        assert_eq!(config.stack_limit, MAX_STACK_LIMIT);
    }
}
