//! Contract with the hosted text/vision model.
//!
//! The orchestration layer only knows about [`CompletionProvider`]: asking it
//! for a client is where a missing credential surfaces, before any request is
//! built. [`CompletionClient::complete`] is the single suspension point of a
//! user action.

use crate::error::SvgResult;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    Text(String),
    /// Base64 payload without the `data:` prefix.
    InlineImage { mime_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    Text(String),
    Parts(Vec<PromptPart>),
}

impl Prompt {
    pub fn into_parts(self) -> Vec<PromptPart> {
        match self {
            Prompt::Text(text) => vec![PromptPart::Text(text)],
            Prompt::Parts(parts) => parts,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub system_instruction: Option<String>,
    pub temperature: Option<f32>,
}

impl GenerationOptions {
    pub fn new(system_instruction: &str, temperature: f32) -> Self {
        Self {
            system_instruction: Some(system_instruction.to_string()),
            temperature: Some(temperature),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("model API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

pub trait CompletionClient: Send + Sync {
    fn complete(
        &self,
        prompt: Prompt,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}

pub trait CompletionProvider: Send + Sync {
    type Client: CompletionClient;

    /// Builds a client for one request. Fails with
    /// [`SvgError::MissingCredential`](crate::SvgError::MissingCredential)
    /// when no credential is configured.
    fn connect(&self) -> SvgResult<Self::Client>;

    fn model(&self) -> &str;
}
