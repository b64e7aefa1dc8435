//! Run settings read from the environment.

use log::warn;

/// Set (to anything) to log at debug level.
pub const DEBUG_VAR: &str = "MIXEQ_DEBUG";

/// Decimal places used for approximate roots.
pub const DIGITS_VAR: &str = "MIXEQ_DIGITS";

pub const DEFAULT_DIGITS: usize = 12;
pub const MAX_DIGITS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub debug: bool,
    pub digits: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debug: false,
            digits: DEFAULT_DIGITS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let digits = match lookup(DIGITS_VAR) {
            None => defaults.digits,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) => n.clamp(1, MAX_DIGITS),
                Err(err) => {
                    warn!("ignoring {DIGITS_VAR}={raw:?}: {err}");
                    defaults.digits
                }
            },
        };
        Settings {
            debug: lookup(DEBUG_VAR).is_some(),
            digits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(settings(&[]), Settings::default());
    }

    #[test]
    fn digits_are_clamped() {
        assert_eq!(settings(&[(DIGITS_VAR, "0")]).digits, 1);
        assert_eq!(settings(&[(DIGITS_VAR, "99")]).digits, MAX_DIGITS);
        assert_eq!(settings(&[(DIGITS_VAR, " 6 ")]).digits, 6);
    }

    #[test]
    fn unparsable_digits_fall_back() {
        assert_eq!(settings(&[(DIGITS_VAR, "many")]).digits, DEFAULT_DIGITS);
    }

    #[test]
    fn debug_flag_is_presence_only() {
        assert!(settings(&[(DEBUG_VAR, "")]).debug);
    }
}
