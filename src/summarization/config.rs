//! Startup configuration for the summarizer.
//!
//! Read once from the environment and handed to constructors explicitly.

use std::time::Duration;

use tracing::warn;

use super::error::ConfigError;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Timeout applied to every outbound provider call.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote summary providers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProviderKind {
    /// Google Generative Language `generateContent` API.
    Gemini,
    /// `OpenAI`-compatible chat completions API.
    OpenAi,
}

impl ProviderKind {
    /// Display name of the provider.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }

    /// Model used when none is configured.
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-pro",
            Self::OpenAi => "gpt-4o-mini",
        }
    }

    /// API root used when none is configured.
    #[must_use]
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::OpenAi => "https://api.openai.com",
        }
    }

    const fn env_prefix(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI",
            Self::OpenAi => "OPENAI",
        }
    }
}

/// Everything needed to talk to one provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Which API this is.
    pub kind: ProviderKind,
    /// Credential. Never has a built-in default.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// API root, without a trailing path.
    pub base_url: String,
    /// Outbound call timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Create a provider config with the provider's default model and URL.
    #[must_use]
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: api_key.into(),
            model: kind.default_model().to_string(),
            base_url: kind.default_base_url().to_string(),
            timeout: PROVIDER_TIMEOUT,
        }
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the outbound timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Process-wide summarizer configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Active provider, `None` for fallback-only mode.
    pub provider: Option<ProviderConfig>,
    /// Listening port.
    pub port: Option<u16>,
}

impl SummarizerConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if `SUMMARIZER_PROVIDER` or the port is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset. When both credentials are present and no
    /// provider is named explicitly, `OpenAI` wins.
    ///
    /// # Errors
    /// Returns an error if `SUMMARIZER_PROVIDER` or the port is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider_for = |kind: ProviderKind| {
            let prefix = kind.env_prefix();
            get(&format!("{prefix}_API_KEY")).map(|key| {
                let mut config = ProviderConfig::new(kind, key);
                if let Some(model) = get(&format!("{prefix}_MODEL")) {
                    config = config.with_model(model);
                }
                if let Some(base_url) = get(&format!("{prefix}_BASE_URL")) {
                    config = config.with_base_url(base_url);
                }
                config
            })
        };

        let provider = match get("SUMMARIZER_PROVIDER").map(|v| v.to_ascii_lowercase()) {
            None => provider_for(ProviderKind::OpenAi).or_else(|| provider_for(ProviderKind::Gemini)),
            Some(name) => {
                let kind = match name.as_str() {
                    "none" | "fallback" => None,
                    "gemini" => Some(ProviderKind::Gemini),
                    "openai" => Some(ProviderKind::OpenAi),
                    _ => return Err(ConfigError::UnknownProvider(name)),
                };
                kind.and_then(|kind| {
                    let config = provider_for(kind);
                    if config.is_none() {
                        warn!(
                            "SUMMARIZER_PROVIDER={} but no {}_API_KEY is set, using fallback only",
                            kind.name(),
                            kind.env_prefix()
                        );
                    }
                    config
                })
            }
        };

        let port = get("SUMMARIZER_PORT")
            .or_else(|| get("PORT"))
            .map(|raw| raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw)))
            .transpose()?;

        Ok(Self { provider, port })
    }

    /// Listening port with the default applied.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}
