//! Logging setup for the `intake` binary.
//!
//! Output goes to stderr so stdout stays clean for JSON results.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub json: bool,
}

impl LogConfig {
    /// 0 = warn, 1 = debug, 2+ = trace.
    pub fn from_verbosity(verbosity: u8, json: bool) -> Self {
        let level = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self { level, json }
    }

    /// `RUST_LOG` when set, otherwise the verbosity level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level.into())
            .from_env_lossy()
    }
}

pub fn init_logging(config: &LogConfig) -> eyre::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))
}
