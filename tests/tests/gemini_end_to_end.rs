use application::chat_controller::{ChatController, SendOutcome};
use application::svg_service::SvgService;
use domain::document::DEFAULT_SVG;
use domain::mode::CredentialSource;
use domain::routing::Route;
use domain::SvgError;
use infrastructure::config::Config;
use infrastructure::credential_store::{CredentialStore, SettingsStorage};
use infrastructure::gemini_client::GeminiProvider;
use serde_json::json;
use std::sync::Arc;
use tests::{fresh_state, history_mode};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer, key: Option<&str>) -> GeminiProvider {
    let uri = server.uri();
    let config = Config::from_lookup(move |name| match name {
        "GEMINI_BASE_URL" => Some(uri.clone()),
        _ => None,
    });
    let store = CredentialStore::new(
        SettingsStorage::in_memory().expect("db"),
        CredentialSource::Storage,
        key.map(String::from),
    )
    .expect("store");
    GeminiProvider::new(&config, Arc::new(store))
}

#[tokio::test]
async fn chat_send_goes_through_gemini_and_updates_the_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "env-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.0 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "```svg\n<svg viewBox=\"0 0 24 24\"><path d=\"M1 1\"/></svg>\n```" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctl = ChatController::new(SvgService::new(provider_for(&server, Some("env-key"))));
    let mut state = fresh_state(history_mode());

    let outcome = ctl
        .send_message(&mut state, "simplify the paths", None)
        .await
        .expect("send");
    assert_eq!(outcome, SendOutcome::Updated(Route::Optimize));
    assert_eq!(
        state.document.as_str(),
        "<svg viewBox=\"0 0 24 24\"><path d=\"M1 1\"/></svg>"
    );
}

#[tokio::test]
async fn no_key_means_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctl = ChatController::new(SvgService::new(provider_for(&server, None)));
    let mut state = fresh_state(history_mode());

    let err = ctl
        .send_message(&mut state, "make a sun", None)
        .await
        .expect_err("no key");
    assert!(matches!(err, SvgError::MissingCredential));
    assert_eq!(state.document.as_str(), DEFAULT_SVG);
}

#[tokio::test]
async fn rejected_key_surfaces_as_generation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API_KEY_INVALID"))
        .mount(&server)
        .await;

    let ctl = ChatController::new(SvgService::new(provider_for(&server, Some("bad"))));
    let mut state = fresh_state(history_mode());

    let err = ctl
        .send_message(&mut state, "make a sun", None)
        .await
        .expect_err("403");
    assert!(matches!(err, SvgError::GenerationFailed { .. }));
    assert_eq!(state.document.as_str(), DEFAULT_SVG);
    assert!(state.last_error.is_some());
}
