//! # Dailypost
//!
//! Runs the daily publishing routine once and exits. Meant to be invoked by an
//! external scheduler such as cron or a CI schedule.
//!
//! ## Environment Variables
//!
//! Required:
//! - `GEMINI_API_KEY`: text generation API key
//! - `GNEWS_API_KEY`: news API key
//! - `PEXELS_API_KEY`: photo search API key
//! - `FACEBOOK_PAGE_ID`: target page
//! - `FACEBOOK_ACCESS_TOKEN`: page access token
//!
//! Optional:
//! - `TOPIC_SOURCE`, `IMAGE_SOURCE`, `PUBLISH_MODE`, `GEMINI_MODEL`
//! - `RUST_LOG`: log filter (defaults to `info`)

use dailypost::{pipeline, Config};
use log::{error, info};

/// Main entry point for the daily publishing routine.
///
/// # Exit Codes
///
/// - `1`: a required environment variable is missing or a variant name is invalid.
///   No network call has been made at that point.
/// - `0`: in every other case, including runs that ended early because a stage
///   came back empty.
///
/// # Example Usage
///
/// ```bash
/// # Run with debug logging
/// RUST_LOG=debug cargo run
///
/// # Publish a link post built from top headlines
/// TOPIC_SOURCE=top-headlines PUBLISH_MODE=feed cargo run
/// ```
#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!(
        "--- Starting daily publishing routine ({}) ---",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = pipeline::run(&config).await;
    info!("Run outcome: {:?}", outcome);
    info!("--- Routine finished ---");
}
