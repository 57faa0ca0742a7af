//! Publishing to a Facebook page through the Graph API.

use log::{debug, error, info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::{Config, PublishMode};
use crate::error::PipelineError;
use crate::http::{decode, sanitize_for_logging, send_request};

/// Result of the single publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The Graph API accepted the post.
    Published { post_id: Option<String> },
    /// Text or image was absent, so nothing was sent.
    Skipped,
    /// The request failed. `status` is `None` for transport failures.
    Failed {
        status: Option<StatusCode>,
        error: Option<GraphError>,
    },
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    id: Option<String>,
    post_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphError,
}

/// Error object of a failed Graph API call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphError {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<i64>,
    pub fbtrace_id: Option<String>,
}

/// Publishes `message` with `image_url` to the configured page.
///
/// Both values are required; if either is absent no request is made. Any
/// failure is logged and reported through the outcome, never raised.
pub async fn publish(
    client: &Client,
    config: &Config,
    message: Option<&str>,
    image_url: Option<&str>,
) -> PublishOutcome {
    let (message, image_url) = match (message, image_url) {
        (Some(message), Some(image_url)) if !message.is_empty() && !image_url.is_empty() => {
            (message, image_url)
        }
        _ => {
            warn!("Post text or image missing, publishing cancelled");
            return PublishOutcome::Skipped;
        }
    };

    let page = urlencoding::encode(&config.facebook_page_id);
    let token = config.facebook_access_token.as_str();
    let request_builder = match config.options.publish_mode {
        PublishMode::Photo => {
            info!("Publishing to Facebook page via /photos");
            client
                .post(format!("{}/{}/photos", config.endpoints.graph, page))
                .form(&[("caption", message), ("url", image_url), ("access_token", token)])
        }
        PublishMode::Feed => {
            info!("Publishing to Facebook page via /feed");
            client
                .post(format!("{}/{}/feed", config.endpoints.graph, page))
                .form(&[("message", message), ("link", image_url), ("access_token", token)])
        }
    };
    debug!(
        "Publish payload: {} characters of text, image {}",
        message.chars().count(),
        image_url
    );

    match send_request(request_builder, "publish_post").await {
        Ok(body) => {
            let post_id = decode::<PublishResponse>(&body, "publish_post")
                .ok()
                .and_then(|response| response.post_id.or(response.id));
            info!("Post published to the Facebook page (id: {:?})", post_id);
            PublishOutcome::Published { post_id }
        }
        Err(PipelineError::Status { status, body, .. }) => {
            error!("Failed to publish to Facebook: HTTP {}", status);
            let graph_error = decode::<GraphErrorEnvelope>(&body, "publish_post")
                .ok()
                .map(|envelope| envelope.error);
            match &graph_error {
                Some(graph_error) => error!("Error details: {:?}", graph_error),
                None => error!("Error body: {}", sanitize_for_logging(&body, 200)),
            }
            PublishOutcome::Failed {
                status: Some(status),
                error: graph_error,
            }
        }
        Err(e) => {
            error!("Failed to publish to Facebook: {}", e);
            PublishOutcome::Failed {
                status: None,
                error: None,
            }
        }
    }
}
