//! Script drafting and output format settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    pub max_articles_per_section: u32,
    pub min_article_length: usize,
    pub max_article_length: usize,
    pub include_quotes: bool,
    pub include_statistics: bool,
    pub tone: String,
    pub style: String,
    pub use_optimized_prompt: bool,
    /// Insert `[pause]` markers for delivery.
    pub include_pauses: bool,
    /// Insert bracketed placeholders the host can fill in.
    pub include_placeholders: bool,
    pub single_host_mode: bool,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            max_articles_per_section: 3,
            min_article_length: 200,
            max_article_length: 2000,
            include_quotes: true,
            include_statistics: true,
            tone: "conversational".to_string(),
            style: "engaging and accessible".to_string(),
            use_optimized_prompt: true,
            include_pauses: true,
            include_placeholders: true,
            single_host_mode: false,
        }
    }
}

impl ScriptSettings {
    /// Whether an article body is long enough to use and short enough to
    /// fit in a prompt.
    pub fn accepts_article(&self, length: usize) -> bool {
        (self.min_article_length..=self.max_article_length).contains(&length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    Markdown,
    PlainText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFormat {
    pub format: TextFormat,
    pub include_timestamps: bool,
    pub include_word_count: bool,
    pub include_sources: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioNotesFormat {
    pub format: TextFormat,
    pub include_pauses: bool,
    pub include_emphasis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFormats {
    pub script: ScriptFormat,
    pub audio_notes: AudioNotesFormat,
}

impl Default for OutputFormats {
    fn default() -> Self {
        Self {
            script: ScriptFormat {
                format: TextFormat::Markdown,
                include_timestamps: true,
                include_word_count: true,
                include_sources: true,
            },
            audio_notes: AudioNotesFormat {
                format: TextFormat::PlainText,
                include_pauses: true,
                include_emphasis: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_article_bounds_inclusive() {
        let settings = ScriptSettings::default();
        assert!(!settings.accepts_article(199));
        assert!(settings.accepts_article(200));
        assert!(settings.accepts_article(2000));
        assert!(!settings.accepts_article(2001));
    }

    #[test]
    fn test_output_formats_serialize_snake_case() {
        let json = serde_json::to_value(OutputFormats::default()).unwrap();
        assert_eq!(json["script"]["format"], "markdown");
        assert_eq!(json["audio_notes"]["format"], "plain_text");
    }
}
