use crate::config::Config;
use crate::credential_store::CredentialStore;
use domain::completion::{
    CompletionClient, CompletionError, CompletionProvider, GenerationOptions, Prompt, PromptPart,
};
use domain::{SvgError, SvgResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl From<PromptPart> for Part {
    fn from(part: PromptPart) -> Self {
        match part {
            PromptPart::Text(text) => Part::Text(text),
            PromptPart::InlineImage { mime_type, data } => {
                Part::InlineData(InlineData { mime_type, data })
            }
        }
    }
}

fn build_request(prompt: Prompt, options: GenerationOptions) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user"),
            parts: prompt.into_parts().into_iter().map(Part::from).collect(),
        }],
        system_instruction: options.system_instruction.map(|text| Content {
            role: None,
            parts: vec![Part::Text(text)],
        }),
        generation_config: options
            .temperature
            .map(|temperature| GenerationConfig { temperature }),
    }
}

/// Joins the text parts of the first candidate.
fn response_text(body: &str) -> Result<String, CompletionError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("no candidates in response".into()))?;
    Ok(candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default())
}

/// One-request Gemini client. Built per user action from the current
/// credential, so a key changed mid-session takes effect on the next send.
#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(client: Arc<Client>, base_url: &str, model: &str, api_key: &str) -> SvgResult<Self> {
        if api_key.trim().is_empty() {
            return Err(SvgError::MissingCredential);
        }
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        prompt: Prompt,
        options: GenerationOptions,
    ) -> Result<String, CompletionError> {
        let request = build_request(prompt, options);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }
        debug!(model = %self.model, bytes = text.len(), "gemini response received");
        response_text(&text)
    }
}

/// Hands out [`GeminiClient`]s bound to whatever credential is current.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Arc<Client>,
    base_url: String,
    model: String,
    credentials: Arc<CredentialStore>,
}

impl GeminiProvider {
    pub fn new(config: &Config, credentials: Arc<CredentialStore>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            credentials,
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }
}

impl CompletionProvider for GeminiProvider {
    type Client = GeminiClient;

    fn connect(&self) -> SvgResult<GeminiClient> {
        GeminiClient::new(
            Arc::clone(&self.client),
            &self.base_url,
            &self.model,
            &self.credentials.get(),
        )
    }

    fn model(&self) -> &str {
        &self.model
    }
}
