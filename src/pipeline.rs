//! The daily publishing routine.
//!
//! One linear pass: topic, image, text, publish. A stage that comes back
//! empty ends the run; nothing is retried.

use log::{info, warn};

use crate::composer::compose_post;
use crate::config::Config;
use crate::http::build_client;
use crate::images::resolve_image;
use crate::news::fetch_topic;
use crate::publisher::{publish, PublishOutcome};

/// How far one run got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoTopic,
    NoPost,
    PublishSkipped,
    PublishFailed,
    Published { post_id: Option<String> },
}

/// Runs the routine once against `config`.
///
/// The outcome is informational only; the caller exits normally whatever it is.
pub async fn run(config: &Config) -> RunOutcome {
    let client = build_client();

    let topic = match fetch_topic(&client, config).await {
        Some(topic) => topic,
        None => {
            warn!("Routine ended: no topic available today");
            return RunOutcome::NoTopic;
        }
    };

    let image_url = resolve_image(&client, config, &topic.title).await;

    let post_text = match compose_post(&client, config, &topic).await {
        Some(text) => text,
        None => {
            warn!("Routine ended: post text generation failed");
            return RunOutcome::NoPost;
        }
    };

    match publish(&client, config, Some(&post_text), Some(&image_url)).await {
        PublishOutcome::Published { post_id } => {
            info!("Routine completed: post published");
            RunOutcome::Published { post_id }
        }
        PublishOutcome::Skipped => RunOutcome::PublishSkipped,
        PublishOutcome::Failed { .. } => {
            warn!("Routine ended: publishing failed");
            RunOutcome::PublishFailed
        }
    }
}
