//! Test doubles shared by the integration suites.

use domain::app_state::AppState;
use domain::completion::{
    CompletionClient, CompletionError, CompletionProvider, GenerationOptions, Prompt,
};
use domain::mode::{AppMode, CredentialSource};
use domain::{SvgError, SvgResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

pub type Reply = Result<String, CompletionError>;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: Prompt,
    pub options: GenerationOptions,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    calls: Vec<RecordedCall>,
    credential: Option<String>,
}

/// Provider whose clients answer from a queue of canned replies and record
/// every request.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    pub fn with_credential() -> Self {
        let provider = Self::default();
        provider.set_credential(Some("test-key"));
        provider
    }

    pub fn without_credential() -> Self {
        Self::default()
    }

    pub fn set_credential(&self, key: Option<&str>) {
        self.script.lock().credential = key.map(String::from);
    }

    pub fn reply(&self, text: &str) -> &Self {
        self.script.lock().replies.push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(&self, error: CompletionError) -> &Self {
        self.script.lock().replies.push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().calls.clone()
    }
}

pub struct ScriptedClient {
    script: Arc<Mutex<Script>>,
}

impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: Prompt, options: GenerationOptions) -> Reply {
        let mut script = self.script.lock();
        script.calls.push(RecordedCall { prompt, options });
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Transport("script exhausted".into())))
    }
}

impl CompletionProvider for ScriptedProvider {
    type Client = ScriptedClient;

    fn connect(&self) -> SvgResult<ScriptedClient> {
        if self.script.lock().credential.is_none() {
            return Err(SvgError::MissingCredential);
        }
        Ok(ScriptedClient {
            script: Arc::clone(&self.script),
        })
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

pub fn history_mode() -> AppMode {
    AppMode {
        persist_history: true,
        credential_source: CredentialSource::Storage,
    }
}

pub fn plain_mode() -> AppMode {
    AppMode {
        persist_history: false,
        credential_source: CredentialSource::Env,
    }
}

pub fn fresh_state(mode: AppMode) -> AppState {
    AppState::new(mode, "12:00:00")
}
