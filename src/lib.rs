//! # Dailypost Library
//!
//! A daily publishing routine for a Facebook gaming page. Each run picks the
//! first matching news headline, finds a photo for it, asks a text generation
//! model to write a short post, and publishes post and photo to the page.
//!
//! ## Pipeline
//!
//! 1. Topic: GNews keyword search or top headlines
//! 2. Image: Pexels photo search, or a fixed fallback image
//! 3. Text: Gemini `generateContent`
//! 4. Publish: Graph API `/photos` upload or `/feed` link post
//!
//! Each stage logs its own failure and returns an absent value, which ends the
//! run early. Only a missing credential is fatal.
//!
//! ## Configuration
//!
//! The following environment variables are required:
//! - `GEMINI_API_KEY`, `GNEWS_API_KEY`, `PEXELS_API_KEY`
//! - `FACEBOOK_PAGE_ID`, `FACEBOOK_ACCESS_TOKEN`
//!
//! `TOPIC_SOURCE`, `IMAGE_SOURCE` and `PUBLISH_MODE` select the pipeline variant.

pub mod composer;
pub mod config;
pub mod error;
pub mod http;
pub mod images;
pub mod news;
pub mod pipeline;
pub mod publisher;

// Re-export commonly used types and functions
pub use composer::{build_prompt, compose_post};
pub use config::{Config, ImageSource, PipelineOptions, PublishMode, TopicSource};
pub use error::{ConfigError, PipelineError};
pub use images::{resolve_image, FALLBACK_IMAGE_URL};
pub use news::{fetch_topic, Topic};
pub use pipeline::{run, RunOutcome};
pub use publisher::{publish, GraphError, PublishOutcome};
