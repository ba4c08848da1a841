use crate::conversation::Conversation;
use crate::document::SvgDocument;
use crate::history::VersionHistory;
use crate::mode::AppMode;

/// Everything a session mutates, handed to each handler by `&mut`.
///
/// `is_loading` and `last_error` are the whole state machine: idle is
/// `is_loading == false`, and `last_error` holds the banner text of the most
/// recent failed send.
#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: AppMode,
    pub conversation: Conversation,
    pub document: SvgDocument,
    /// `None` when the mode has no history panel.
    pub history: Option<VersionHistory>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl AppState {
    /// Fresh session: greeting, default canvas, and (with history on) the
    /// default canvas as snapshot #1.
    pub fn new(mode: AppMode, timestamp: &str) -> Self {
        let document = SvgDocument::default();
        let history = mode.persist_history.then(|| {
            let mut history = VersionHistory::new();
            history.record(document.as_str(), timestamp);
            history
        });
        Self {
            mode,
            conversation: Conversation::with_greeting(),
            document,
            history,
            is_loading: false,
            last_error: None,
        }
    }
}
