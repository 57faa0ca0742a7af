//! Post text generation through the Gemini `generateContent` API.

use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::PipelineError;
use crate::http::{decode, send_request};
use crate::news::Topic;

/// Name of the page the posts are written for.
pub const PAGE_NAME: &str = "Franatyco";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Builds the generation prompt for a topic.
///
/// The call to action citing the source is only requested when the topic
/// carries an article URL.
pub fn build_prompt(topic: &Topic) -> String {
    let mut prompt = format!(
        "Você é um criador de conteúdo para a página de games \"{page}\".\n\
         Sua tarefa é criar um post para o Facebook, curto e empolgante, sobre a seguinte notícia do mundo dos games: \"{title}\".\n\
         O post deve ter um tom casual e divertido, como se estivesse conversando com outros gamers. Inclua 2 ou 3 emojis relevantes 🎮🔥.\n",
        page = PAGE_NAME,
        title = topic.title,
    );

    if topic.url.is_some() {
        prompt.push_str(
            "No final do post, adicione uma chamada para ação como \"Confira a matéria completa na fonte:\" e então insira a URL da notícia.\n",
        );
    }

    prompt.push_str(
        "Termine com 3 hashtags relevantes como #Games, #GamingBrasil e uma terceira relacionada ao jogo ou console da notícia.\n",
    );

    if let Some(url) = &topic.url {
        prompt.push_str(&format!("\nA URL da notícia para incluir no final é: {}\n", url));
    }

    prompt.push_str("\nResponda apenas com o texto do post.");
    prompt
}

/// Generates the post text for `topic`.
///
/// The model's answer is returned verbatim. Any failure, including an empty
/// answer, yields `None`.
pub async fn compose_post(client: &Client, config: &Config, topic: &Topic) -> Option<String> {
    info!("Generating post text with model {}", config.gemini_model);
    match generate(client, config, &build_prompt(topic)).await {
        Ok(text) => {
            info!("Post text generated successfully ({} characters)", text.chars().count());
            Some(text)
        }
        Err(e) => {
            error!("Failed to generate post text: {}", e);
            None
        }
    }
}

async fn generate(client: &Client, config: &Config, prompt: &str) -> Result<String, PipelineError> {
    let url = format!(
        "{}/models/{}:generateContent",
        config.endpoints.gemini, config.gemini_model
    );
    debug!("Sending generation request to: {}", url);

    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    };

    let request_builder = client
        .post(&url)
        .query(&[("key", config.gemini_api_key.as_str())])
        .json(&request);

    let body = send_request(request_builder, "generate_post").await?;
    let response: GenerateResponse = decode(&body, "generate_post")?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(PipelineError::Empty("generate_post"))?;
    debug!("Finish reason: {:?}", candidate.finish_reason);

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(PipelineError::Empty("generate_post"));
    }
    Ok(text)
}
