use application::chat_controller::{
    ChatController, SendOutcome, DONE_MESSAGE, REVERTED_MESSAGE, SAVED_MESSAGE,
};
use application::svg_service::SvgService;
use domain::completion::{CompletionError, Prompt};
use domain::conversation::Role;
use domain::document::DEFAULT_SVG;
use domain::routing::Route;
use domain::SvgError;
use tests::{fresh_state, history_mode, plain_mode, ScriptedProvider};

fn controller(provider: &ScriptedProvider) -> ChatController<ScriptedProvider> {
    ChatController::new(SvgService::new(provider.clone()))
}

fn prompt_text(prompt: &Prompt) -> String {
    match prompt {
        Prompt::Text(text) => text.clone(),
        Prompt::Parts(_) => panic!("expected a text prompt"),
    }
}

#[tokio::test]
async fn generate_updates_document_history_and_transcript() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("Here it is:\n<svg viewBox=\"0 0 24 24\"><circle r=\"5\"/></svg>");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let outcome = ctl
        .send_message(&mut state, "make a sun", None)
        .await
        .expect("send");

    assert_eq!(outcome, SendOutcome::Updated(Route::Generate));
    assert_eq!(
        state.document.as_str(),
        "<svg viewBox=\"0 0 24 24\"><circle r=\"5\"/></svg>"
    );
    assert!(!state.is_loading);
    assert_eq!(state.last_error, None);

    let messages = state.conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].text, "make a sun");
    assert_eq!(messages[2].text, DONE_MESSAGE);

    let history = state.history.as_ref().expect("history on");
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().map(|e| e.code.as_str()), Some(state.document.as_str()));
}

#[tokio::test]
async fn transcript_sent_to_the_model_excludes_the_current_turn() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("<svg>1</svg>").reply("<svg>2</svg>");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    ctl.send_message(&mut state, "make a sun", None).await.expect("first");
    ctl.send_message(&mut state, "add a face", None).await.expect("second");

    let calls = provider.calls();
    let second = prompt_text(&calls[1].prompt);
    assert!(second.contains("user: make a sun\nai: Done! Here is the new SVG.\n"));
    assert!(!second.contains("user: add a face"));
    assert!(second.contains("Current SVG Code:\n<svg>1</svg>"));
    assert!(second.contains("User Request: \"add a face\""));
}

#[tokio::test]
async fn optimize_keyword_routes_to_the_optimizer() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("<svg><path d=\"M0 0h1\"/></svg>");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let outcome = ctl
        .send_message(&mut state, "Optimize this please", None)
        .await
        .expect("send");
    assert_eq!(outcome, SendOutcome::Updated(Route::Optimize));

    let calls = provider.calls();
    assert_eq!(calls[0].options.temperature, Some(0.0));
    let prompt = prompt_text(&calls[0].prompt);
    assert!(prompt.contains("User request: \"Optimize this please\""));
    assert!(prompt.contains(DEFAULT_SVG));
}

#[tokio::test]
async fn image_send_traces_the_attachment() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("<svg viewBox=\"0 0 24 24\"/></svg>");
    let ctl = controller(&provider);
    let mut state = fresh_state(plain_mode());

    let uri = "data:image/png;base64,iVBORw0KGgo=".to_string();
    let outcome = ctl
        .send_message(&mut state, "", Some(uri.clone()))
        .await
        .expect("send");
    assert_eq!(outcome, SendOutcome::Updated(Route::Image));
    assert_eq!(state.conversation.messages()[1].image.as_deref(), Some(uri.as_str()));
    assert!(matches!(provider.calls()[0].prompt, Prompt::Parts(ref p) if p.len() == 2));
}

#[tokio::test]
async fn empty_send_is_a_no_op() {
    let provider = ScriptedProvider::with_credential();
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let outcome = ctl.send_message(&mut state, "   ", None).await.expect("no-op");
    assert_eq!(outcome, SendOutcome::Ignored);
    assert_eq!(state.conversation.len(), 1);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn empty_image_string_counts_as_no_attachment() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("<svg>sun</svg>");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let outcome = ctl
        .send_message(&mut state, "", Some(String::new()))
        .await
        .expect("no-op");
    assert_eq!(outcome, SendOutcome::Ignored);
    assert_eq!(state.conversation.len(), 1);
    assert!(provider.calls().is_empty());

    let outcome = ctl
        .send_message(&mut state, "make a sun", Some(String::new()))
        .await
        .expect("send");
    assert_eq!(outcome, SendOutcome::Updated(Route::Generate));
    assert_eq!(state.conversation.messages()[1].image, None);
    assert!(matches!(provider.calls()[0].prompt, Prompt::Text(_)));
}

#[tokio::test]
async fn missing_credential_leaves_document_alone() {
    let provider = ScriptedProvider::without_credential();
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let err = ctl
        .send_message(&mut state, "make a sun", None)
        .await
        .expect_err("no key");
    assert!(matches!(err, SvgError::MissingCredential));
    assert_eq!(state.document.as_str(), DEFAULT_SVG);
    assert!(provider.calls().is_empty());
    assert!(!state.is_loading);
    assert!(state
        .last_error
        .as_deref()
        .is_some_and(|e| e.starts_with("No API key provided")));
}

#[tokio::test]
async fn prose_reply_reports_error_and_keeps_document() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("I'm not able to draw that.");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let err = ctl
        .send_message(&mut state, "make a sun", None)
        .await
        .expect_err("no svg");
    assert!(matches!(err, SvgError::EmptyGenerationResult(_)));
    assert_eq!(state.document.as_str(), DEFAULT_SVG);
    assert_eq!(state.history.as_ref().map(|h| h.len()), Some(1));

    // user, working notice, error notice
    let messages = state.conversation.messages();
    assert_eq!(messages.len(), 4);
    assert!(messages[2].is_placeholder());
    assert_eq!(
        messages[3].text,
        "Sorry, something went wrong: Failed to generate valid SVG. The AI response did not contain SVG code."
    );
}

#[tokio::test]
async fn upstream_failure_sets_the_banner() {
    let provider = ScriptedProvider::with_credential();
    provider.fail(CompletionError::Upstream {
        status: 500,
        body: "boom".into(),
    });
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let err = ctl
        .send_message(&mut state, "make a sun", None)
        .await
        .expect_err("upstream");
    assert!(matches!(err, SvgError::GenerationFailed { .. }));
    assert_eq!(
        state.last_error.as_deref(),
        Some("The AI service failed to process the text prompt.")
    );
}

#[tokio::test]
async fn next_send_clears_a_previous_error() {
    let provider = ScriptedProvider::with_credential();
    provider
        .fail(CompletionError::Transport("down".into()))
        .reply("<svg/>");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let _ = ctl.send_message(&mut state, "make a sun", None).await;
    assert!(state.last_error.is_some());
    ctl.send_message(&mut state, "make a sun", None).await.expect("retry by hand");
    assert_eq!(state.last_error, None);
}

#[tokio::test]
async fn busy_state_rejects_new_work_without_side_effects() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("<svg/>");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());
    state.is_loading = true;

    let err = ctl
        .send_message(&mut state, "make a sun", None)
        .await
        .expect_err("busy");
    assert!(matches!(err, SvgError::Busy));
    assert_eq!(state.conversation.len(), 1);

    let err = ctl
        .optimize_prompt(&mut state, "sun")
        .await
        .expect_err("busy");
    assert!(matches!(err, SvgError::Busy));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn fenced_reply_is_cleaned_before_it_lands() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("<svg width=\"10\" height=\"10\">\n```");
    let ctl = controller(&provider);
    let mut state = fresh_state(plain_mode());

    ctl.send_message(&mut state, "make a box", None).await.expect("send");
    assert_eq!(state.document.as_str(), "<svg width=\"10\" height=\"10\">");
}

#[tokio::test]
async fn optimize_prompt_appends_the_exchange() {
    let provider = ScriptedProvider::with_credential();
    provider.reply("  A flat sun icon, 2px stroke  ");
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let optimized = ctl
        .optimize_prompt(&mut state, "sun")
        .await
        .expect("optimize");
    assert_eq!(optimized.as_deref(), Some("A flat sun icon, 2px stroke"));

    let messages = state.conversation.messages();
    assert_eq!(messages[1].text, "Optimize this prompt: \"sun\"");
    assert_eq!(
        messages[2].text,
        "Here's an optimized version: \"A flat sun icon, 2px stroke\""
    );
    assert_eq!(state.document.as_str(), DEFAULT_SVG);
}

#[tokio::test]
async fn optimize_prompt_failure_does_not_raise_the_banner() {
    let provider = ScriptedProvider::with_credential();
    provider.fail(CompletionError::Transport("reset".into()));
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    let err = ctl.optimize_prompt(&mut state, "sun").await.expect_err("fail");
    assert_eq!(err.to_string(), "Failed to optimize the prompt.");
    assert_eq!(state.last_error, None);
    assert_eq!(
        state.conversation.last().map(|m| m.text.as_str()),
        Some("Sorry, couldn't optimize the prompt: Failed to optimize the prompt.")
    );
}

#[test]
fn manual_saves_deduplicate_against_the_latest_snapshot() {
    let provider = ScriptedProvider::with_credential();
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());
    // drop the seeded default snapshot for a clean sequence
    state.history = Some(Default::default());

    for code in ["<svg/>", "<svg/>", "<svg>X</svg>"] {
        ctl.edit_document(&mut state, code);
        ctl.save_version(&mut state).expect("history on");
    }

    let history = state.history.as_ref().expect("history");
    let codes: Vec<_> = history.entries().iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, ["<svg/>", "<svg>X</svg>"]);
    let saved = state
        .conversation
        .messages()
        .iter()
        .filter(|m| m.text == SAVED_MESSAGE)
        .count();
    assert_eq!(saved, 3);
}

#[test]
fn revert_restores_a_saved_version() {
    let provider = ScriptedProvider::with_credential();
    let ctl = controller(&provider);
    let mut state = fresh_state(history_mode());

    ctl.edit_document(&mut state, "<svg>edited</svg>");
    ctl.revert_to(&mut state, 1).expect("revert");
    assert_eq!(state.document.as_str(), DEFAULT_SVG);
    assert_eq!(
        state.conversation.last().map(|m| m.text.as_str()),
        Some(REVERTED_MESSAGE)
    );

    assert!(matches!(
        ctl.revert_to(&mut state, 42),
        Err(SvgError::UnknownVersion(42))
    ));
}

#[test]
fn history_commands_fail_when_history_is_off() {
    let provider = ScriptedProvider::with_credential();
    let ctl = controller(&provider);
    let mut state = fresh_state(plain_mode());

    assert!(matches!(
        ctl.save_version(&mut state),
        Err(SvgError::HistoryDisabled)
    ));
    assert!(matches!(
        ctl.revert_to(&mut state, 1),
        Err(SvgError::HistoryDisabled)
    ));
}
