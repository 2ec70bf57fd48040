//! Diagnostic logging for the CLI
//!
//! Logs go to stderr so stdout stays clean for canonical text and JSON.
//! `RUST_LOG` overrides the level picked from `-v` / `-q`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level for a `-v` count; `--quiet` wins over any count
pub fn level_for(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn.
        EnvFilter::new(format!(
            "warn,aster={level},aster_core={level}",
            level = level
        ))
    })
}

/// Install the stderr subscriber. Later calls are ignored.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0, false), Level::WARN);
        assert_eq!(level_for(1, false), Level::INFO);
        assert_eq!(level_for(2, false), Level::DEBUG);
        assert_eq!(level_for(7, false), Level::TRACE);
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(level_for(3, true), Level::ERROR);
    }
}
