//! Tracing initialization
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `ENVBOOT_LOG` takes an `EnvFilter` directive and wins over `-v`.

use tracing_subscriber::{EnvFilter, prelude::*};

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "ENVBOOT_LOG";

/// Default filter for a `-v` count
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "envboot=warn",
        1 => "envboot=info",
        2 => "envboot=debug",
        _ => "envboot=trace",
    }
}

/// Initialize tracing. Call once at process startup.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "envboot=warn");
        assert_eq!(level_for(1), "envboot=info");
        assert_eq!(level_for(2), "envboot=debug");
        assert_eq!(level_for(7), "envboot=trace");
    }
}
