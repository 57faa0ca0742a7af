//! Image resolution through the Pexels search API.

use log::{error, info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::{Config, ImageSource};
use crate::error::PipelineError;
use crate::http::{decode, send_request};

/// Used whenever no searched photo is available.
pub const FALLBACK_IMAGE_URL: &str =
    "https://images.pexels.com/photos/159393/game-machine-arcade-machine-children-s-games-159393.jpeg";

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    large: Option<String>,
}

/// Resolves the image to publish alongside a post about `topic`.
///
/// This never fails: every error, and an empty result set, yields
/// [`FALLBACK_IMAGE_URL`].
pub async fn resolve_image(client: &Client, config: &Config, topic: &str) -> String {
    if config.options.image_source == ImageSource::Fixed {
        info!("Using fixed image: {}", FALLBACK_IMAGE_URL);
        return FALLBACK_IMAGE_URL.to_string();
    }

    info!("Searching image for '{}'", topic);
    match search_image(client, config, topic).await {
        Ok(url) => {
            info!("Image found: {}", url);
            url
        }
        Err(PipelineError::Empty(_)) => {
            warn!("No image found for the topic, using fallback image");
            FALLBACK_IMAGE_URL.to_string()
        }
        Err(e) => {
            error!("Failed to search image: {}", e);
            warn!("Using fallback image");
            FALLBACK_IMAGE_URL.to_string()
        }
    }
}

async fn search_image(client: &Client, config: &Config, topic: &str) -> Result<String, PipelineError> {
    let request_builder = client
        .get(format!("{}/search", config.endpoints.pexels))
        .header("Authorization", config.pexels_api_key.as_str())
        .query(&[
            ("query", topic),
            ("per_page", "1"),
            ("orientation", "landscape"),
        ]);

    let body = send_request(request_builder, "search_image").await?;
    let response: PhotoSearchResponse = decode(&body, "search_image")?;

    response
        .photos
        .into_iter()
        .next()
        .and_then(|photo| photo.src.large)
        .filter(|url| !url.trim().is_empty())
        .ok_or(PipelineError::Empty("search_image"))
}
