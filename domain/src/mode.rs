use std::fmt;
use std::str::FromStr;

/// Where the API key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialSource {
    /// Environment only; never persisted.
    Env,
    /// Persisted key, falling back to the environment default.
    #[default]
    Storage,
    /// As `Storage`, but ask interactively when nothing resolves.
    Prompt,
}

impl FromStr for CredentialSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "env" => Ok(Self::Env),
            "storage" => Ok(Self::Storage),
            "prompt" => Ok(Self::Prompt),
            other => Err(format!(
                "unknown credential source '{other}' (expected env, storage or prompt)"
            )),
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Env => "env",
            Self::Storage => "storage",
            Self::Prompt => "prompt",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppMode {
    pub persist_history: bool,
    pub credential_source: CredentialSource,
}

impl Default for AppMode {
    fn default() -> Self {
        Self {
            persist_history: true,
            credential_source: CredentialSource::Storage,
        }
    }
}
