//! Drives [`AppState`] through a user action.
//!
//! Every handler takes the state by `&mut`. A send or prompt rewrite flips
//! `is_loading` for the duration of its single completion and refuses to
//! start while another one holds the flag.

use crate::display_timestamp;
use crate::svg_service::SvgService;
use domain::app_state::AppState;
use domain::completion::CompletionProvider;
use domain::conversation::ChatMessage;
use domain::extract::strip_code_fences;
use domain::routing::{route_message, Route};
use domain::{SvgError, SvgResult};
use tracing::info;

pub const DONE_MESSAGE: &str = "Done! Here is the new SVG.";
pub const REVERTED_MESSAGE: &str = "Reverted to a previous version.";
pub const SAVED_MESSAGE: &str = "Manually saved current SVG as a new version.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty text and no image.
    Ignored,
    Updated(Route),
}

pub struct ChatController<P> {
    service: SvgService<P>,
}

impl<P: CompletionProvider> ChatController<P> {
    pub fn new(service: SvgService<P>) -> Self {
        Self { service }
    }

    /// Routes a chat send: image attached → trace it; "optimize"/"simplify" →
    /// optimize the current document; anything else → generate from text.
    ///
    /// On failure the document is untouched, the error is appended to the
    /// transcript and stored in `last_error`, and returned as well.
    pub async fn send_message(
        &self,
        state: &mut AppState,
        text: &str,
        image: Option<String>,
    ) -> SvgResult<SendOutcome> {
        let image = image.filter(|uri| !uri.is_empty());
        if text.trim().is_empty() && image.is_none() {
            return Ok(SendOutcome::Ignored);
        }
        if state.is_loading {
            return Err(SvgError::Busy);
        }

        state.last_error = None;
        let history = state.conversation.transcript();
        let route = route_message(text, image.is_some());
        state.conversation.push_user(text, image.clone());
        state.is_loading = true;
        state.conversation.push_ai(route.working_notice());

        let current = state.document.as_str().to_string();
        let result = match (route, image) {
            (Route::Image, Some(uri)) => self.service.generate_from_image(&uri, text).await,
            (Route::Optimize, _) => self.service.optimize_svg(&current, text).await,
            _ => self.service.generate_from_text(text, &history, &current).await,
        };
        state.is_loading = false;

        match result {
            Ok(svg) => {
                let cleaned = strip_code_fences(&svg);
                state.document.replace(cleaned.clone());
                if let Some(history) = state.history.as_mut() {
                    history.record(&cleaned, display_timestamp());
                }
                state.conversation.settle(ChatMessage::ai(DONE_MESSAGE));
                info!(?route, bytes = cleaned.len(), "document updated");
                Ok(SendOutcome::Updated(route))
            }
            Err(err) => {
                let message = err.to_string();
                state
                    .conversation
                    .push_ai(&format!("Sorry, something went wrong: {message}"));
                state.last_error = Some(message);
                Err(err)
            }
        }
    }

    /// Rewrites a terse description into a detailed one. Returns `Ok(None)`
    /// for blank input. Failures land in the transcript only, not in
    /// `last_error`.
    pub async fn optimize_prompt(
        &self,
        state: &mut AppState,
        prompt: &str,
    ) -> SvgResult<Option<String>> {
        if prompt.trim().is_empty() {
            return Ok(None);
        }
        if state.is_loading {
            return Err(SvgError::Busy);
        }

        state.is_loading = true;
        let result = self.service.optimize_prompt(prompt).await;
        state.is_loading = false;

        match result {
            Ok(optimized) => {
                state
                    .conversation
                    .push_user(&format!("Optimize this prompt: \"{prompt}\""), None);
                state
                    .conversation
                    .push_ai(&format!("Here's an optimized version: \"{optimized}\""));
                Ok(Some(optimized))
            }
            Err(err) => {
                state
                    .conversation
                    .push_ai(&format!("Sorry, couldn't optimize the prompt: {err}"));
                Err(err)
            }
        }
    }

    /// Snapshot the current document by hand. `Ok(false)` when it matched the
    /// latest snapshot; the confirmation message is posted either way.
    pub fn save_version(&self, state: &mut AppState) -> SvgResult<bool> {
        let history = state.history.as_mut().ok_or(SvgError::HistoryDisabled)?;
        let added = history
            .record(state.document.as_str(), display_timestamp())
            .is_some();
        state.conversation.push_ai(SAVED_MESSAGE);
        Ok(added)
    }

    pub fn revert_to(&self, state: &mut AppState, id: u64) -> SvgResult<()> {
        let history = state.history.as_ref().ok_or(SvgError::HistoryDisabled)?;
        let code = history
            .get(id)
            .map(|entry| entry.code.clone())
            .ok_or(SvgError::UnknownVersion(id))?;
        state.document.replace(code);
        state.conversation.push_ai(REVERTED_MESSAGE);
        Ok(())
    }

    /// Direct user edit: replaces the document silently.
    pub fn edit_document(&self, state: &mut AppState, code: &str) {
        state.document.replace(code);
    }
}
