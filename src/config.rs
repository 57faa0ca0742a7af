//! Configuration module for the daily publishing routine.
//!
//! This module contains the configuration structures and environment variable
//! handling for the news, image, generation and Facebook Graph integrations.

use log::{debug, error, info};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub const GNEWS_API_KEY: &str = "GNEWS_API_KEY";
pub const PEXELS_API_KEY: &str = "PEXELS_API_KEY";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const FACEBOOK_PAGE_ID: &str = "FACEBOOK_PAGE_ID";
pub const FACEBOOK_ACCESS_TOKEN: &str = "FACEBOOK_ACCESS_TOKEN";

/// The five credentials the routine cannot run without, in load order.
pub const REQUIRED_VARS: [&str; 5] = [
    GEMINI_API_KEY,
    GNEWS_API_KEY,
    PEXELS_API_KEY,
    FACEBOOK_PAGE_ID,
    FACEBOOK_ACCESS_TOKEN,
];

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GNEWS_BASE_URL: &str = "https://gnews.io/api/v4";
const DEFAULT_PEXELS_BASE_URL: &str = "https://api.pexels.com/v1";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Where the topic of the day comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicSource {
    /// Keyword search over recent articles.
    #[default]
    Search,
    /// Top headlines of a fixed category.
    TopHeadlines,
}

/// Where the post image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSource {
    /// Photo search keyed on the topic title.
    #[default]
    Search,
    /// Always the fallback image, no network call.
    Fixed,
}

/// Which Graph API endpoint shape the post is published with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishMode {
    /// `/{page}/photos` with `caption` and `url`.
    #[default]
    Photo,
    /// `/{page}/feed` with `message` and `link`.
    Feed,
}

impl FromStr for TopicSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(TopicSource::Search),
            "top-headlines" | "top_headlines" | "headlines" => Ok(TopicSource::TopHeadlines),
            _ => Err(()),
        }
    }
}

impl FromStr for ImageSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(ImageSource::Search),
            "fixed" => Ok(ImageSource::Fixed),
            _ => Err(()),
        }
    }
}

impl FromStr for PublishMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" => Ok(PublishMode::Photo),
            "feed" => Ok(PublishMode::Feed),
            _ => Err(()),
        }
    }
}

/// Selects one of the pipeline variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    pub topic_source: TopicSource,
    pub image_source: ImageSource,
    pub publish_mode: PublishMode,
}

/// Base URLs of the four external APIs, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub gnews: String,
    pub pexels: String,
    pub gemini: String,
    pub graph: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            gnews: DEFAULT_GNEWS_BASE_URL.to_string(),
            pexels: DEFAULT_PEXELS_BASE_URL.to_string(),
            gemini: DEFAULT_GEMINI_BASE_URL.to_string(),
            graph: DEFAULT_GRAPH_BASE_URL.to_string(),
        }
    }
}

/// Everything one run of the routine needs, loaded once at startup.
///
/// The struct is immutable after loading and passed by reference to each
/// stage. Secrets are redacted from its `Debug` output.
#[derive(Clone)]
pub struct Config {
    pub gnews_api_key: String,
    pub pexels_api_key: String,
    pub gemini_api_key: String,
    pub facebook_page_id: String,
    pub facebook_access_token: String,
    pub gemini_model: String,
    pub options: PipelineOptions,
    pub endpoints: Endpoints,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gnews_api_key", &"[REDACTED]")
            .field("pexels_api_key", &"[REDACTED]")
            .field("gemini_api_key", &"[REDACTED]")
            .field("facebook_page_id", &self.facebook_page_id)
            .field("facebook_access_token", &"[REDACTED]")
            .field("gemini_model", &self.gemini_model)
            .field("options", &self.options)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// Masks a secret for logging, keeping at most eight leading and eight
/// trailing characters.
///
/// # Example
///
/// ```rust
/// use dailypost::config::mask_secret;
///
/// assert_eq!(mask_secret("abcdefghijklmnopqrstuvwxyz"), "abcdefgh...stuvwxyz");
/// assert_eq!(mask_secret("short"), "short...");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();

    let prefix: String = chars.iter().take(8).collect();
    if len > 16 {
        let suffix: String = chars[len - 8..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// # Required Environment Variables
    ///
    /// - `GEMINI_API_KEY`: key for the text generation API
    /// - `GNEWS_API_KEY`: key for the news API
    /// - `PEXELS_API_KEY`: key for the photo search API
    /// - `FACEBOOK_PAGE_ID`: the page the post is published to
    /// - `FACEBOOK_ACCESS_TOKEN`: page access token
    ///
    /// # Optional Environment Variables
    ///
    /// - `TOPIC_SOURCE`: `search` (default) or `top-headlines`
    /// - `IMAGE_SOURCE`: `search` (default) or `fixed`
    /// - `PUBLISH_MODE`: `photo` (default) or `feed`
    /// - `GEMINI_MODEL`: defaults to `gemini-1.5-flash`
    /// - `GNEWS_BASE_URL`, `PEXELS_BASE_URL`, `GEMINI_BASE_URL`, `GRAPH_BASE_URL`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first required variable that is
    /// unset or empty, and `ConfigError::Invalid` for an unrecognized variant name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// ```rust
    /// use dailypost::Config;
    ///
    /// let config = Config::from_lookup(|name| match name {
    ///     "PUBLISH_MODE" => Some("feed".to_string()),
    ///     name if name.ends_with("_KEY") || name.starts_with("FACEBOOK_") => {
    ///         Some("secret-value".to_string())
    ///     }
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.options.publish_mode, dailypost::config::PublishMode::Feed);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading configuration from environment variables");

        let required = |name: &str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => {
                    info!("Found {} environment variable with length: {}", name, value.len());
                    debug!("{} (masked): {}", name, mask_secret(&value));
                    Ok(value)
                }
                Some(_) => {
                    error!("{} environment variable is empty", name);
                    Err(ConfigError::Missing(name.to_string()))
                }
                None => {
                    error!("Make sure the {} environment variable is set", name);
                    Err(ConfigError::Missing(name.to_string()))
                }
            }
        };

        let gemini_api_key = required(GEMINI_API_KEY)?;
        let gnews_api_key = required(GNEWS_API_KEY)?;
        let pexels_api_key = required(PEXELS_API_KEY)?;
        let facebook_page_id = required(FACEBOOK_PAGE_ID)?;
        let facebook_access_token = required(FACEBOOK_ACCESS_TOKEN)?;

        let options = PipelineOptions {
            topic_source: parse_optional(&lookup, "TOPIC_SOURCE")?,
            image_source: parse_optional(&lookup, "IMAGE_SOURCE")?,
            publish_mode: parse_optional(&lookup, "PUBLISH_MODE")?,
        };

        let gemini_model = optional_string(&lookup, "GEMINI_MODEL")
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let defaults = Endpoints::default();
        let base_url = |name: &str, default: String| -> String {
            match optional_string(&lookup, name) {
                Some(url) => {
                    info!("Using {} override: {}", name, url);
                    url.trim_end_matches('/').to_string()
                }
                None => default,
            }
        };
        let endpoints = Endpoints {
            gnews: base_url("GNEWS_BASE_URL", defaults.gnews),
            pexels: base_url("PEXELS_BASE_URL", defaults.pexels),
            gemini: base_url("GEMINI_BASE_URL", defaults.gemini),
            graph: base_url("GRAPH_BASE_URL", defaults.graph),
        };

        let config = Config {
            gnews_api_key,
            pexels_api_key,
            gemini_api_key,
            facebook_page_id,
            facebook_access_token,
            gemini_model,
            options,
            endpoints,
        };

        info!(
            "Configuration loaded: topic source {:?}, image source {:?}, publish mode {:?}",
            config.options.topic_source, config.options.image_source, config.options.publish_mode
        );
        Ok(config)
    }
}

fn optional_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_optional<F, T>(lookup: &F, name: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default,
{
    match optional_string(lookup, name) {
        Some(value) => value.parse().map_err(|_| {
            error!("Unrecognized value '{}' for {}", value, name);
            ConfigError::Invalid {
                name: name.to_string(),
                value,
            }
        }),
        None => Ok(T::default()),
    }
}
