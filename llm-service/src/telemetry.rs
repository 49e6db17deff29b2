//! Tracing helpers scoped to this library.
//!
//! The binary composes its own global subscriber; these helpers only make
//! it easy to raise the log level for the completion boundary without
//! touching the rest of the process.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Crate target prefix used to filter library-originated logs.
pub const TARGET_PREFIX: &str = "llm_service";

/// Builds a level directive for **this** library only.
///
/// Example:
/// `EnvFilter::new("info").add_directive(level_directive(Level::DEBUG))`
pub fn level_directive(level: Level) -> Directive {
    // Format like `llm_service=debug`
    let s = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).expect("valid level directive")
}

/// Creates an `EnvFilter` from the environment or the given fallback, then
/// applies a per-crate level directive for this library.
///
/// With `default = "info"` and `level = Level::DEBUG` the process logs INFO
/// globally and DEBUG for `llm-service` only.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    base.add_directive(level_directive(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_this_crate() {
        let d = level_directive(Level::DEBUG);
        assert_eq!(d.to_string(), "llm_service=debug");
    }
}
