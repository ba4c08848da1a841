use crate::completion::CompletionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("No API key provided. Please configure your Gemini API key in settings.")]
    MissingCredential,

    /// Upstream or transport failure, tagged with the operation that hit it.
    #[error("{context}")]
    GenerationFailed {
        context: &'static str,
        #[source]
        source: CompletionError,
    },

    /// The model answered but nothing SVG-like could be recovered.
    #[error("{0}")]
    EmptyGenerationResult(&'static str),

    #[error("A request is already in progress.")]
    Busy,

    #[error("Unsupported image: {0}")]
    InvalidImage(String),

    #[error("Version history is disabled.")]
    HistoryDisabled,

    #[error("No saved version with id {0}.")]
    UnknownVersion(u64),
}

pub type SvgResult<T> = std::result::Result<T, SvgError>;
