//! Topic fetching from the GNews API.
//!
//! The topic of the day is the first article the news API returns. There is
//! no ranking or deduplication.

use log::{debug, error, info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::{Config, TopicSource};
use crate::error::PipelineError;
use crate::http::{decode, send_request};

/// Keyword query used by the search variant.
pub const SEARCH_QUERY: &str = "\"lançamento de jogo\" OR \"games\"";
/// Category used by the top-headlines variant.
pub const HEADLINES_CATEGORY: &str = "technology";
pub const LANGUAGE: &str = "pt";
pub const COUNTRY: &str = "br";
pub const MAX_ARTICLES: u32 = 10;

/// The headline a post is written about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    /// Source article, cited at the end of the post when present.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    url: Option<String>,
}

/// Fetches today's topic.
///
/// # Returns
///
/// - `Some(Topic)`: the first article's title, and its URL
/// - `None`: on transport or HTTP failure, an undecodable body, an empty
///   article list, or a first article without a title. The search variant
///   also requires a URL, since its post cites the source.
pub async fn fetch_topic(client: &Client, config: &Config) -> Option<Topic> {
    match try_fetch_topic(client, config).await {
        Ok(topic) => {
            info!("Topic found: {}", topic.title);
            if let Some(url) = &topic.url {
                info!("Article URL: {}", url);
            }
            Some(topic)
        }
        Err(PipelineError::Empty(_)) => {
            warn!("No usable article in today's news results");
            None
        }
        Err(e) => {
            error!("Failed to fetch news topic: {}", e);
            None
        }
    }
}

async fn try_fetch_topic(client: &Client, config: &Config) -> Result<Topic, PipelineError> {
    let source = config.options.topic_source;
    let max = MAX_ARTICLES.to_string();

    let request_builder = match source {
        TopicSource::Search => {
            info!("Searching news for: {}", SEARCH_QUERY);
            client
                .get(format!("{}/search", config.endpoints.gnews))
                .query(&[
                    ("q", SEARCH_QUERY),
                    ("lang", LANGUAGE),
                    ("country", COUNTRY),
                    ("max", max.as_str()),
                    ("apikey", config.gnews_api_key.as_str()),
                ])
        }
        TopicSource::TopHeadlines => {
            info!("Fetching top headlines for category: {}", HEADLINES_CATEGORY);
            client
                .get(format!("{}/top-headlines", config.endpoints.gnews))
                .query(&[
                    ("category", HEADLINES_CATEGORY),
                    ("lang", LANGUAGE),
                    ("country", COUNTRY),
                    ("max", max.as_str()),
                    ("apikey", config.gnews_api_key.as_str()),
                ])
        }
    };

    let body = send_request(request_builder, "fetch_topic").await?;
    let response: NewsResponse = decode(&body, "fetch_topic")?;
    debug!("News API returned {} articles", response.articles.len());

    select_topic(response.articles, source).ok_or(PipelineError::Empty("fetch_topic"))
}

fn select_topic(articles: Vec<Article>, source: TopicSource) -> Option<Topic> {
    let first = articles.into_iter().next()?;
    let title = first.title.filter(|t| !t.trim().is_empty())?;
    let url = first.url.filter(|u| !u.trim().is_empty());

    if source == TopicSource::Search && url.is_none() {
        return None;
    }

    Some(Topic { title, url })
}
