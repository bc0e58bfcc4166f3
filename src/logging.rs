//! Tracing setup.
//!
//! Configure console output via `RUST_LOG` (default `warn`). A debug-level log
//! file is always written to the platform data directory with daily rotation:
//! `<data_local_dir>/logs/edbv.log.YYYY-MM-DD`.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const FILE_FILTER: &str = "warn,edbv=debug,edbv_core=debug";

/// Install the global subscriber.
///
/// `console` should be false for the terminal UI: stderr output would be
/// drawn over the alternate screen.
pub fn init(console: bool) {
    let console_layer = console.then(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter)
    });

    let file_layer = match crate::config::logs_dir() {
        Some(logs_dir) => match std::fs::create_dir_all(&logs_dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(logs_dir, "edbv.log");
                Some(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_filter(EnvFilter::new(FILE_FILTER)),
                )
            }
            Err(e) => {
                eprintln!("Warning: Could not initialize file logging: {}", e);
                None
            }
        },
        None => None,
    };

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
