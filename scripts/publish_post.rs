//! Manual Post Publishing Script
//!
//! This script publishes a hand-written post to the configured Facebook page,
//! without fetching news or generating text. It reads the same environment
//! variables as the daily routine, which makes it a quick check that the page
//! credentials work.

use std::io::{self, Write};

use dailypost::{http::build_client, publish, Config, PublishOutcome, FALLBACK_IMAGE_URL};

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("📣 Facebook Page Publishing Tool");
    println!("================================");

    let config = Config::from_env()?;
    println!(
        "📄 Page: {} (mode: {:?})",
        config.facebook_page_id, config.options.publish_mode
    );

    let message = prompt_line("📝 Enter your post message: ")?;
    if message.is_empty() {
        println!("❌ Post message cannot be empty!");
        return Err("Post message is required".into());
    }

    let mut image_url = prompt_line("🖼️  Enter an image URL (empty for the fallback image): ")?;
    if image_url.is_empty() {
        image_url = FALLBACK_IMAGE_URL.to_string();
    }

    println!("🚀 Publishing...");
    let client = build_client();
    match publish(&client, &config, Some(&message), Some(&image_url)).await {
        PublishOutcome::Published { post_id } => {
            println!("✅ Post published! id: {}", post_id.unwrap_or_default());
            Ok(())
        }
        PublishOutcome::Skipped => Err("Nothing to publish".into()),
        PublishOutcome::Failed { status, error } => {
            println!("❌ Publishing failed!");
            if let Some(status) = status {
                println!("🚨 Status: {}", status);
            }
            if let Some(message) = error.and_then(|e| e.message) {
                println!("🚨 Error: {}", message);
            }
            Err("Publishing failed".into())
        }
    }
}
