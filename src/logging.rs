//! Logging setup

use tracing_subscriber::EnvFilter;

/// Log level for governance runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Decisions and warnings
    #[default]
    Normal,
    /// Per-field statistics and registry traffic
    Verbose,
}

impl LogLevel {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Returns `false` if a subscriber
/// was already installed, in which case nothing changes.
pub fn init(level: LogLevel) -> bool {
    tracing_subscriber::fmt().with_env_filter(level.filter()).with_target(false).try_init().is_ok()
}
