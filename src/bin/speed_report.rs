//! Print the storage-strategy speed report
//!
//! Usage: `speed_report [config.json]`. Without an argument the standard
//! five-size run is used.

use bufbench::{init_logging, run_to_stdout, RunConfig};
use tracing::error;

fn main() {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => match RunConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path, "failed to load config: {e}");
                std::process::exit(2);
            }
        },
        None => RunConfig::standard(),
    };

    if let Err(e) = run_to_stdout(&config) {
        error!("benchmark failed: {e}");
        std::process::exit(1);
    }
}
