//! Layered settings.
//!
//! Precedence, lowest to highest: compiled defaults, the TOML settings file,
//! then `DECODED_`-prefixed environment variables. Nested keys use `__`, so
//! `DECODED_OPTIONAL_SECTIONS__DEEP_DIVE=true` switches the deep dive on.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{
    allocation::OptionalSections,
    duration::{DEFAULT_DURATION_MINUTES, check_non_negative},
    error::ConfigError,
    provider::{ScriptModel, VoiceConfig},
    publishing::PublishingConfig,
    script::{OutputFormats, ScriptSettings},
    sources::ContentSources,
    topics::TopicSelection,
};

pub const ENV_PREFIX: &str = "DECODED_";

/// Values accepted for `log_level`.
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    /// Requested runtime. Normalized onto a tier when the episode is built.
    pub duration_minutes: i64,
    pub optional_sections: OptionalSections,
    /// Comma-separated topic names; empty selects every topic.
    pub episode_topics: String,
    /// Base log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    pub openai: ScriptModel,
    pub elevenlabs: VoiceConfig,
    pub script: ScriptSettings,
    pub output_formats: OutputFormats,
    pub sources: ContentSources,
    pub publishing: PublishingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Decoded: AI, Big Data, and Tech Futures".to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            optional_sections: OptionalSections::default(),
            episode_topics: String::new(),
            log_level: "info".to_string(),
            openai: ScriptModel::default(),
            elevenlabs: VoiceConfig::default(),
            script: ScriptSettings::default(),
            output_formats: OutputFormats::default(),
            sources: ContentSources::default(),
            publishing: PublishingConfig::default(),
        }
    }
}

impl Settings {
    /// The provider stack for a settings file. The file may be absent.
    pub fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(config_file: &Path) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(config_file))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract()?;
        tracing::debug!("Loaded settings: {:?}", &settings);
        settings.validate()?;
        Ok(settings)
    }

    /// Checks values that deserialize fine but make no sense:
    /// - `duration_minutes` must not be negative
    /// - `title` and `openai.model` must not be blank
    /// - `log_level` must name a level
    /// - `openai.temperature` in 0..=2, `openai.max_tokens` > 0
    /// - voice settings in 0..=1
    /// - article length bounds ordered
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(self.duration_minutes)?;

        if self.title.trim().is_empty() {
            return Err(ConfigError::Empty { field: "title" });
        }
        if self.openai.model.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "openai.model",
            });
        }

        if !LOG_LEVELS
            .iter()
            .any(|level| level.eq_ignore_ascii_case(self.log_level.trim()))
        {
            return Err(ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            });
        }

        check_range("openai.temperature", self.openai.temperature, 0.0, 2.0)?;
        if self.openai.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens { value: 0 });
        }

        let voice = &self.elevenlabs.settings;
        check_range("elevenlabs.settings.stability", voice.stability, 0.0, 1.0)?;
        check_range(
            "elevenlabs.settings.similarity_boost",
            voice.similarity_boost,
            0.0,
            1.0,
        )?;
        check_range("elevenlabs.settings.style", voice.style, 0.0, 1.0)?;

        if self.script.min_article_length > self.script.max_article_length {
            return Err(ConfigError::InvalidArticleLength {
                min: self.script.min_article_length,
                max: self.script.max_article_length,
            });
        }

        Ok(())
    }

    pub fn topics(&self) -> TopicSelection {
        TopicSelection::parse(&self.episode_topics)
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons and is rejected too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::DurationError, topics::Topic};

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        Settings::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Settings::default()))
                .merge(Toml::string(toml)),
        )
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.duration_minutes, 30);
        assert!(!settings.optional_sections.deep_dive);
        assert_eq!(settings.topics(), TopicSelection::all());
    }

    #[test]
    fn test_toml_overrides() {
        let settings = from_toml(
            r#"
            duration_minutes = 45
            episode_topics = "ai"

            [optional_sections]
            expert_interview = true

            [script]
            single_host_mode = true

            [publishing]
            max_episodes_in_feed = 0
            "#,
        )
        .unwrap();

        assert_eq!(settings.duration_minutes, 45);
        assert!(settings.optional_sections.expert_interview);
        assert!(!settings.optional_sections.deep_dive);
        assert!(settings.script.single_host_mode);
        assert_eq!(settings.script.max_articles_per_section, 3);
        assert_eq!(settings.publishing.feed_limit(), None);
        assert_eq!(settings.topics().topics(), &[Topic::Ai]);
    }

    #[test]
    fn test_non_integer_duration_is_rejected() {
        let err = from_toml(r#"duration_minutes = "thirty""#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));

        let err = from_toml("duration_minutes = 30.5").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let err = from_toml("duration_minutes = -30").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Duration(DurationError::Negative { minutes: -30 })
        ));
    }

    #[test]
    fn test_out_of_range_duration_is_accepted() {
        // Normalized later, not rejected here.
        let settings = from_toml("duration_minutes = 100").unwrap();
        assert_eq!(settings.duration_minutes, 100);
    }

    #[test]
    fn test_voice_settings_range() {
        let err = from_toml("[elevenlabs.settings]\nstability = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "elevenlabs.settings.stability",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_model_settings() {
        assert!(matches!(
            from_toml("[openai]\nmax_tokens = 0").unwrap_err(),
            ConfigError::InvalidMaxTokens { value: 0 }
        ));
        assert!(matches!(
            from_toml("[openai]\ntemperature = 3.0").unwrap_err(),
            ConfigError::OutOfRange { .. }
        ));
        assert!(matches!(
            from_toml("[openai]\nmodel = \" \"").unwrap_err(),
            ConfigError::Empty {
                field: "openai.model"
            }
        ));
    }

    #[test]
    fn test_article_bounds_ordered() {
        let err = from_toml("[script]\nmin_article_length = 5000").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidArticleLength {
                min: 5000,
                max: 2000
            }
        ));
    }

    #[test]
    fn test_log_level_must_be_known() {
        assert!(from_toml(r#"log_level = "DEBUG""#).is_ok());
        let err = from_toml(r#"log_level = "verbose""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { value } if value == "verbose"));
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "decoded.toml",
                r#"
                duration_minutes = 45
                log_level = "warn"

                [optional_sections]
                expert_interview = true
                "#,
            )?;
            jail.set_env("DECODED_DURATION_MINUTES", "20");
            jail.set_env("DECODED_OPTIONAL_SECTIONS__DEEP_DIVE", "true");
            jail.set_env("DECODED_OPENAI__MAX_TOKENS", "1500");

            let settings = Settings::load(Path::new("decoded.toml")).map_err(|e| e.to_string())?;
            assert_eq!(settings.duration_minutes, 20);
            assert!(settings.optional_sections.deep_dive);
            assert!(settings.optional_sections.expert_interview);
            assert_eq!(settings.log_level, "warn");
            assert_eq!(settings.openai.max_tokens, 1500);
            assert_eq!(settings.openai.model, "gpt-4o");
            Ok(())
        });
    }

    #[test]
    fn test_negative_env_duration_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DECODED_DURATION_MINUTES", "-3");

            let err = Settings::load(Path::new("decoded.toml")).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Duration(DurationError::Negative { minutes: -3 })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Settings::default()))
                .merge(Toml::file("/nonexistent/decoded.toml")),
        )
        .unwrap();
        assert_eq!(settings, Settings::default());
    }
}
