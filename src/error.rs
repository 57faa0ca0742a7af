//! Error types for the daily publishing routine.
//!
//! Configuration errors are fatal and end the process. Pipeline errors never
//! leave the stage that produced them: each stage logs the error and turns it
//! into an absent value.

use thiserror::Error;

/// A required setting is missing or cannot be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(String),

    #[error("invalid value '{value}' for environment variable {name}")]
    Invalid { name: String, value: String },
}

/// A failure inside one stage of the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("request for '{operation}' failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{operation}' returned HTTP {status}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode '{operation}' response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{0}' returned no usable result")]
    Empty(&'static str),
}
