pub mod app_state;
pub mod attachment;
pub mod completion;
pub mod conversation;
pub mod document;
pub mod error;
pub mod extract;
pub mod history;
pub mod mode;
pub mod prompts;
pub mod routing;

pub use error::{SvgError, SvgResult};
