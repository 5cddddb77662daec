use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Missing API key for {service_name}: set {env_var}")]
    MissingApiKey {
        service_name: String,
        env_var: String,
    },

    #[error("Missing account name for {service_name}: set {env_var}")]
    MissingUsername {
        service_name: String,
        env_var: String,
    },
}

/// External services the pipeline authenticates against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiService {
    Openai,
    ElevenLabs,
    NewsApi,
    Github,
    Kaggle,
}

pub struct ServiceConfig {
    pub api_url: &'static str,
    /// Checked in order; the first one set wins.
    pub env_vars: &'static [&'static str],
    /// Account name required next to the key, for services that want one.
    pub username_var: Option<&'static str>,
}

/// Resolved credentials for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub username: Option<String>,
}

impl ApiService {
    pub const ALL: [ApiService; 5] = [
        ApiService::Openai,
        ApiService::ElevenLabs,
        ApiService::NewsApi,
        ApiService::Github,
        ApiService::Kaggle,
    ];

    pub fn config(&self) -> ServiceConfig {
        match self {
            ApiService::Openai => ServiceConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                env_vars: &["OPENAI_API_KEY"],
                username_var: None,
            },
            ApiService::ElevenLabs => ServiceConfig {
                api_url: "https://api.elevenlabs.io/v1/text-to-speech",
                env_vars: &["ELEVENLABS_API_KEY"],
                username_var: None,
            },
            ApiService::NewsApi => ServiceConfig {
                api_url: "https://newsapi.org/v2",
                env_vars: &["NEWSAPI_KEY", "NEWS_API_KEY"],
                username_var: None,
            },
            ApiService::Github => ServiceConfig {
                api_url: "https://api.github.com",
                env_vars: &["GITHUB_API_KEY"],
                username_var: None,
            },
            ApiService::Kaggle => ServiceConfig {
                api_url: "https://www.kaggle.com/api/v1",
                env_vars: &["KAGGLE_API_KEY"],
                username_var: Some("KAGGLE_USERNAME"),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiService::Openai => "OpenAI",
            ApiService::ElevenLabs => "ElevenLabs",
            ApiService::NewsApi => "NewsAPI",
            ApiService::Github => "GitHub",
            ApiService::Kaggle => "Kaggle",
        }
    }

    /// Validate that the credentials for this service are set
    pub fn validate_credentials(&self) -> Result<Credentials, ProviderError> {
        self.credentials_from(|var| std::env::var(var).ok())
    }

    pub fn credentials_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials, ProviderError> {
        let api_key = self.api_key_from(&lookup)?;
        let username = match self.config().username_var {
            Some(var) => Some(
                lookup(var)
                    .filter(|name| !name.trim().is_empty())
                    .ok_or_else(|| ProviderError::MissingUsername {
                        service_name: self.name().to_string(),
                        env_var: var.to_string(),
                    })?,
            ),
            None => None,
        };
        Ok(Credentials { api_key, username })
    }

    /// Resolve the key through `lookup`, skipping empty values.
    pub fn api_key_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ProviderError> {
        let config = self.config();
        config
            .env_vars
            .iter()
            .filter_map(|&var| lookup(var))
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey {
                service_name: self.name().to_string(),
                env_var: config.env_vars.join(" or "),
            })
    }
}

/// Language model settings for script drafting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptModel {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ScriptModel {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

/// Text-to-speech settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub model: String,
    pub preferences: VoicePreferences,
    pub settings: VoiceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoicePreferences {
    pub preferred_voice: String,
    pub gender: String,
    pub accent: String,
    pub style: String,
}

/// Voice tuning knobs, each in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
    pub style: f64,
    pub use_speaker_boost: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            model: "eleven_multilingual_v2".to_string(),
            preferences: VoicePreferences {
                preferred_voice: "Lyra".to_string(),
                gender: "female".to_string(),
                accent: "british".to_string(),
                style: "conversational".to_string(),
            },
            settings: VoiceSettings {
                stability: 0.6,
                similarity_boost: 0.8,
                style: 0.3,
                use_speaker_boost: true,
            },
        }
    }
}
