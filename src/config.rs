use std::fmt;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process-wide settings for the relay. Built once at startup and shared
/// read-only with every handler through `AppState`.
#[derive(Clone)]
pub struct RelayConfig {
    api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub bind_addr: String,
}

impl RelayConfig {
    /// Reads `GEMINI_API_KEY`, `GEMINI_API_BASE`, `GEMINI_MODEL` and
    /// `BIND_ADDR`, honouring a `.env` file when present.
    pub fn from_env() -> Self {
        let api_key = dotenvy::var("GEMINI_API_KEY").ok();
        let api_base =
            dotenvy::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = dotenvy::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let bind_addr =
            dotenvy::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self::new(api_key, api_base, model, bind_addr)
    }

    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
        bind_addr: impl Into<String>,
    ) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            api_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            bind_addr: bind_addr.into(),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
