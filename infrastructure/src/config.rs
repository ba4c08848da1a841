use domain::mode::{AppMode, CredentialSource};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// Startup fallback credential; see [`CredentialSource`] for when it applies.
    pub default_api_key: Option<String>,
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
    pub mode: AppMode,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let persist_history = match lookup("SVGSMITH_HISTORY") {
            Some(v) => parse_flag(&v).unwrap_or_else(|| {
                warn!(value = %v, "ignoring unrecognised SVGSMITH_HISTORY");
                true
            }),
            None => true,
        };
        let credential_source = match lookup("SVGSMITH_CREDENTIAL_SOURCE") {
            Some(v) => v.parse::<CredentialSource>().unwrap_or_else(|e| {
                warn!("{e}; using storage");
                CredentialSource::Storage
            }),
            None => CredentialSource::Storage,
        };
        Self {
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            default_api_key: lookup("GEMINI_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            db_path: lookup("SVGSMITH_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| Self::default_db_path(lookup("HOME"))),
            export_dir: lookup("SVGSMITH_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            mode: AppMode {
                persist_history,
                credential_source,
            },
        }
    }

    fn default_db_path(home: Option<String>) -> PathBuf {
        let mut path = PathBuf::from(home.unwrap_or_else(|| ".".to_string()));
        path.push(".config");
        path.push("svgsmith");
        path.push("settings.db");
        path
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
