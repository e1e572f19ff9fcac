//! file_binder - bind several files into one executable that opens them all.
//!
//! This binary validates the request, runs the bind workflow on a background
//! task and reports progress until the executable is in place.

use file_binder::cli;
use std::process;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse_args();

    // Initialize logging; RUST_LOG overrides the --verbose default
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run(&args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
