//! Log level policy and subscriber setup.

use std::fmt;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// How chatty a run is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Everything, including the configuration listing.
    #[default]
    Default,
    /// Progress and summary lines.
    Compact,
    /// Warnings and errors only.
    Minimal,
    Off,
}

impl LogLevel {
    pub const ALL: [Self; 4] = [Self::Default, Self::Compact, Self::Minimal, Self::Off];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Compact => "compact",
            Self::Minimal => "minimal",
            Self::Off => "off",
        }
    }

    /// Case-insensitive parse.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// Like [`LogLevel::parse`], but an unknown value becomes
    /// [`LogLevel::Default`] and is reported.
    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            warn!(
                value = raw,
                expected = "default, compact, minimal, off",
                "unknown log level, using default"
            );
            Self::Default
        })
    }

    /// `EnvFilter` directive for this level.
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Default => "info,cukedoc=debug,cukedoc_cli=debug,cukedoc_model=debug",
            Self::Compact => "info",
            Self::Minimal => "warn",
            Self::Off => "off",
        }
    }

    /// Whether the final "report written to" line should be printed.
    pub const fn prints_summary(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter for `level`, unless `RUST_LOG` is set.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install a `fmt` subscriber writing to stderr.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(level: LogLevel) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(LogLevel::parse("COMPACT"), Some(LogLevel::Compact));
        assert_eq!(LogLevel::parse(" minimal "), Some(LogLevel::Minimal));
        assert_eq!(LogLevel::parse("Off"), Some(LogLevel::Off));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn unknown_falls_back_to_default() {
        assert_eq!(LogLevel::parse_or_default("loud"), LogLevel::Default);
        assert_eq!(LogLevel::parse_or_default("minimal"), LogLevel::Minimal);
    }

    #[test]
    fn directives_parse() {
        for level in LogLevel::ALL {
            assert!(
                level.directive().parse::<EnvFilter>().is_ok(),
                "{level} directive should parse"
            );
        }
    }

    #[test]
    fn off_prints_nothing() {
        assert!(!LogLevel::Off.prints_summary());
        assert!(LogLevel::Minimal.prints_summary());
    }
}
