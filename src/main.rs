//! Flicklist gateway binary.
//!
//! ```text
//! flicklist [CONFIG.toml]
//! ```
//!
//! The config path may also come from `FLICKLIST_CONFIG`. Without one, defaults
//! and environment overrides apply (see [`flicklist::Config`]). The process
//! serves `/api/search` and `/health` until Ctrl+C or SIGTERM.

use flicklist::{gateway, observability, Config};
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("FLICKLIST_CONFIG").map(PathBuf::from));

    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("flicklist: {e}");
            return ExitCode::FAILURE;
        }
    };

    observability::init_tracing(&config);

    match gateway::serve(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "gateway stopped");
            ExitCode::FAILURE
        }
    }
}
