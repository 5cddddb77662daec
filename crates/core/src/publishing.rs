//! Feed metadata for podcast distribution.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastCategory {
    pub category: String,
    pub subcategory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishingConfig {
    pub podcast_title: String,
    pub podcast_description: String,
    pub podcast_author: String,
    pub podcast_language: String,
    /// Defaults to the current year when unset.
    pub podcast_copyright: Option<String>,
    pub podcast_categories: Vec<PodcastCategory>,
    pub podcast_explicit: bool,
    /// Public URL the audio files are served from.
    pub base_url: String,
    pub website_url: String,
    pub cover_art_url: String,
    pub rss_feed_url: String,
    pub rss_feed_filename: String,
    pub cover_art_filename: String,
    pub podcast_email: String,
    /// 0 keeps every episode in the feed.
    pub max_episodes_in_feed: usize,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            podcast_title: "DECODED".to_string(),
            podcast_description: "Weekly podcast covering the latest developments in AI, Big Data, \
                 and technology futures. Exploring cutting-edge research, industry trends, and \
                 their real-world implications."
                .to_string(),
            podcast_author: "AIPodCast Generator".to_string(),
            podcast_language: "en-US".to_string(),
            podcast_copyright: None,
            podcast_categories: vec![
                PodcastCategory {
                    category: "Technology".to_string(),
                    subcategory: "Tech News".to_string(),
                },
                PodcastCategory {
                    category: "Science".to_string(),
                    subcategory: "Natural Sciences".to_string(),
                },
            ],
            podcast_explicit: false,
            base_url: "https://your-domain.com/podcast".to_string(),
            website_url: "https://your-website.com".to_string(),
            cover_art_url: "https://your-domain.com/podcast/cover-art.jpg".to_string(),
            rss_feed_url: "https://your-domain.com/podcast/feed.xml".to_string(),
            rss_feed_filename: "podcast_feed.xml".to_string(),
            cover_art_filename: "cover_art.png".to_string(),
            podcast_email: String::new(),
            max_episodes_in_feed: 50,
        }
    }
}

impl PublishingConfig {
    pub fn copyright(&self) -> String {
        self.podcast_copyright
            .clone()
            .unwrap_or_else(|| format!("Copyright {}", chrono::Local::now().year()))
    }

    /// Number of episodes to keep in the feed, `None` for all of them.
    pub fn feed_limit(&self) -> Option<usize> {
        (self.max_episodes_in_feed > 0).then_some(self.max_episodes_in_feed)
    }

    /// Public URL of an episode file under `base_url`.
    pub fn episode_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file_name)
    }

    pub fn owner_email(&self) -> Option<&str> {
        let email = self.podcast_email.trim();
        (!email.is_empty()).then_some(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copyright_defaults_to_current_year() {
        let config = PublishingConfig::default();
        let expected = format!("Copyright {}", chrono::Local::now().year());
        assert_eq!(config.copyright(), expected);

        let config = PublishingConfig {
            podcast_copyright: Some("CC BY 4.0".to_string()),
            ..Default::default()
        };
        assert_eq!(config.copyright(), "CC BY 4.0");
    }

    #[test]
    fn test_feed_limit_zero_means_all() {
        let mut config = PublishingConfig::default();
        assert_eq!(config.feed_limit(), Some(50));
        config.max_episodes_in_feed = 0;
        assert_eq!(config.feed_limit(), None);
    }

    #[test]
    fn test_episode_url_joins_once() {
        let mut config = PublishingConfig::default();
        assert_eq!(
            config.episode_url("ep1.mp3"),
            "https://your-domain.com/podcast/ep1.mp3"
        );
        config.base_url.push('/');
        assert_eq!(
            config.episode_url("ep1.mp3"),
            "https://your-domain.com/podcast/ep1.mp3"
        );
    }

    #[test]
    fn test_owner_email_blank_is_none() {
        let mut config = PublishingConfig::default();
        assert_eq!(config.owner_email(), None);
        config.podcast_email = "host@example.com".to_string();
        assert_eq!(config.owner_email(), Some("host@example.com"));
    }
}
