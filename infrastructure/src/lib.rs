pub mod config;
pub mod credential_store;
pub mod export;
pub mod gemini_client;
pub mod image_loader;
