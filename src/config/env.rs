//! # Environment Variable Utilities
//!
//! Helpers for reading environment variables with type conversions and
//! fallback defaults. Each reader has a `*_from` twin that takes a provider
//! closure instead of touching the process environment, so configuration
//! structs can be tested without mutating global state.
//!
//! # Examples
//! ```rust
//! use timeclock::config::env::{read_i64_from, read_string_from};
//!
//! let hours = read_i64_from(|_| Some("12".into()), "JWT_TTL_HOURS", 48);
//! assert_eq!(hours, 12);
//!
//! let zone = read_string_from(|_| None, "TIMECLOCK_TIME_ZONE");
//! assert_eq!(zone, None);
//! ```

/// Reads the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn unquote(v: &str) -> &str {
    v.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Reads a boolean flag from an environment variable.
///
/// Returns `true` for `"1"`, `"true"`, `"yes"` or `"on"` (case-insensitive).
pub fn read_flag(name: &str, default: bool) -> bool {
    read_flag_from(process_env, name, default)
}

pub fn read_flag_from<F>(provider: F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => matches!(
            unquote(&v).to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

/// Reads a trimmed, unquoted, non-empty string.
pub fn read_string_from<F>(provider: F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .map(|v| unquote(&v).to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a signed integer, falling back to `default` if missing or unparsable.
pub fn read_i64_from<F>(provider: F, name: &str, default: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    read_string_from(provider, name)
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(default)
}

/// Reads an unsigned integer, `None` if missing or unparsable.
pub fn read_u32_opt_from<F>(provider: F, name: &str) -> Option<u32>
where
    F: Fn(&str) -> Option<String>,
{
    read_string_from(provider, name).and_then(|s| s.parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_flag_true_variants() {
        for val in ["1", "true", "TRUE", "yes", "on", "On", "'yes'", "\"true\""] {
            assert!(read_flag_from(|_| Some(val.into()), "X", false), "{val:?}");
        }
    }

    #[test]
    fn read_flag_false_variants_and_default() {
        for val in ["0", "false", "no", "off", "xyz", ""] {
            assert!(!read_flag_from(|_| Some(val.into()), "X", true), "{val:?}");
        }
        assert!(read_flag_from(|_| None, "X", true));
    }

    #[test]
    fn read_string_trims_quotes_and_drops_empty() {
        assert_eq!(
            read_string_from(|_| Some(" \"Europe/Berlin\" ".into()), "TZ"),
            Some("Europe/Berlin".into())
        );
        assert_eq!(read_string_from(|_| Some("   ".into()), "TZ"), None);
        assert_eq!(read_string_from(|_| None, "TZ"), None);
    }

    #[test]
    fn read_i64_parses_or_defaults() {
        assert_eq!(read_i64_from(|_| Some("-15".into()), "N", 60), -15);
        assert_eq!(read_i64_from(|_| Some("sixty".into()), "N", 60), 60);
        assert_eq!(read_i64_from(|_| None, "N", 60), 60);
    }

    #[test]
    fn read_u32_opt_rejects_negative() {
        assert_eq!(read_u32_opt_from(|_| Some("20".into()), "N"), Some(20));
        assert_eq!(read_u32_opt_from(|_| Some("-1".into()), "N"), None);
    }

    #[test]
    fn provider_receives_requested_name() {
        let got = read_string_from(
            |k| (k == "WANTED").then(|| "hit".to_string()),
            "WANTED",
        );
        assert_eq!(got.as_deref(), Some("hit"));
    }
}
