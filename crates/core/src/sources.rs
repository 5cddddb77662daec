//! Content source catalog.
//!
//! Describes where stories come from. Nothing here performs network access;
//! fetchers read these settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSources {
    pub rss_feeds: Vec<String>,
    pub arxiv: ArxivSource,
    pub ieee_spectrum: FeedSource,
    pub github: GithubSource,
    pub kaggle: KaggleSource,
    pub datagov: PortalSource,
    pub worldbank: PortalSource,
    pub newsletters: NewsletterSource,
    pub newsapi: NewsApiSource,
    pub reddit: RedditSource,
    pub web_scraping: ScrapeSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArxivSource {
    pub enabled: bool,
    pub categories: Vec<String>,
    pub max_results: u32,
    pub days_back: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSource {
    pub enabled: bool,
    pub rss_feed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubSource {
    pub enabled: bool,
    pub topics: Vec<String>,
    pub languages: Vec<String>,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KaggleSource {
    pub enabled: bool,
    /// Relative paths resolve against the deployment base directory.
    pub kaggle_json_path: PathBuf,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSource {
    pub enabled: bool,
    pub max_results: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSource {
    pub enabled: bool,
    pub feeds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsApiSource {
    pub enabled: bool,
    pub endpoints: Vec<String>,
    pub query: NewsApiQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiQuery {
    pub q: String,
    pub language: String,
    pub sort_by: String,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditSource {
    pub enabled: bool,
    pub subreddits: Vec<String>,
    pub sort: String,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeSource {
    pub enabled: bool,
    pub sources: Vec<String>,
}

impl Default for ContentSources {
    fn default() -> Self {
        Self {
            rss_feeds: strings(&[
                "https://feeds.feedburner.com/oreilly/radar",
                "https://www.wired.com/feed/rss",
                "https://techcrunch.com/feed/",
                "https://www.theverge.com/rss/index.xml",
                "https://feeds.feedburner.com/venturebeat/SZYF",
                "https://www.artificialintelligence-news.com/feed/",
                "https://www.datasciencecentral.com/feed/",
                "https://bigdata-madesimple.com/feed/",
                "https://spectrum.ieee.org/rss",
                "https://ieeexplore.ieee.org/rss/TOC.jsp?punumber=5",
            ]),
            arxiv: ArxivSource {
                enabled: true,
                categories: strings(&["cs.AI", "cs.LG", "cs.CL", "stat.ML", "cs.CV", "cs.NE"]),
                max_results: 50,
                days_back: 14,
            },
            ieee_spectrum: FeedSource {
                enabled: true,
                rss_feed: "https://spectrum.ieee.org/rss".to_string(),
            },
            github: GithubSource {
                enabled: true,
                topics: strings(&[
                    "machine-learning",
                    "artificial-intelligence",
                    "deep-learning",
                    "data-science",
                ]),
                languages: strings(&["python", "javascript", "julia", "r"]),
                max_results: 20,
            },
            kaggle: KaggleSource {
                enabled: true,
                kaggle_json_path: PathBuf::from("kaggle").join("kaggle.json"),
                max_results: 10,
            },
            datagov: PortalSource {
                enabled: true,
                max_results: 20,
            },
            worldbank: PortalSource {
                enabled: true,
                max_results: 20,
            },
            // No newsletter feeds are known yet; alerts can be routed here.
            newsletters: NewsletterSource {
                enabled: true,
                feeds: Vec::new(),
            },
            newsapi: NewsApiSource {
                enabled: true,
                endpoints: strings(&[
                    "https://newsapi.org/v2/everything",
                    "https://newsapi.org/v2/top-headlines",
                ]),
                query: NewsApiQuery {
                    q: "AI OR artificial intelligence OR machine learning OR big data OR data science"
                        .to_string(),
                    language: "en".to_string(),
                    sort_by: "publishedAt".to_string(),
                    page_size: 50,
                },
            },
            reddit: RedditSource {
                enabled: true,
                subreddits: strings(&[
                    "r/MachineLearning",
                    "r/artificial",
                    "r/datascience",
                    "r/bigdata",
                    "r/technology",
                    "r/Futurology",
                ]),
                sort: "hot".to_string(),
                limit: 10,
            },
            web_scraping: ScrapeSource {
                enabled: true,
                sources: strings(&[
                    "https://www.technologyreview.com/topic/artificial-intelligence/",
                    "https://www.technologyreview.com/topic/data/",
                    "https://www.technologyreview.com/topic/computing/",
                ]),
            },
        }
    }
}

impl ContentSources {
    /// Every RSS URL from enabled feed-based sources, without duplicates,
    /// in declaration order.
    pub fn enabled_feed_urls(&self) -> Vec<&str> {
        let ieee = self
            .ieee_spectrum
            .enabled
            .then_some(&self.ieee_spectrum.rss_feed);
        let newsletters = self
            .newsletters
            .feeds
            .iter()
            .filter(|_| self.newsletters.enabled);

        let mut urls: Vec<&str> = Vec::new();
        for url in self.rss_feeds.iter().chain(ieee).chain(newsletters) {
            if !urls.contains(&url.as_str()) {
                urls.push(url);
            }
        }
        urls
    }

    /// Subreddit names without the `r/` prefix, as the Reddit API expects.
    pub fn subreddit_names(&self) -> impl Iterator<Item = &str> {
        self.reddit
            .subreddits
            .iter()
            .map(|s| s.strip_prefix("r/").unwrap_or(s))
    }

    /// Names of the sources that are switched on.
    pub fn enabled_sources(&self) -> Vec<&'static str> {
        [
            ("rss", !self.rss_feeds.is_empty()),
            ("arxiv", self.arxiv.enabled),
            ("ieee_spectrum", self.ieee_spectrum.enabled),
            ("github", self.github.enabled),
            ("kaggle", self.kaggle.enabled),
            ("datagov", self.datagov.enabled),
            ("worldbank", self.worldbank.enabled),
            ("newsletters", self.newsletters.enabled),
            ("newsapi", self.newsapi.enabled),
            ("reddit", self.reddit.enabled),
            ("web_scraping", self.web_scraping.enabled),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let sources = ContentSources::default();
        assert_eq!(sources.rss_feeds.len(), 10);
        assert_eq!(sources.arxiv.max_results, 50);
        assert_eq!(sources.arxiv.days_back, 14);
        assert_eq!(sources.newsapi.query.page_size, 50);
        assert_eq!(sources.reddit.limit, 10);
        assert!(sources.newsletters.feeds.is_empty());
    }

    #[test]
    fn test_feed_urls_are_deduplicated() {
        let sources = ContentSources::default();
        let urls = sources.enabled_feed_urls();
        // IEEE Spectrum is listed both as a plain feed and as its own source.
        assert_eq!(urls.len(), 10);
        assert_eq!(
            urls.iter()
                .filter(|u| **u == "https://spectrum.ieee.org/rss")
                .count(),
            1
        );
    }

    #[test]
    fn test_newsletter_feeds_only_when_enabled() {
        let mut sources = ContentSources::default();
        sources.newsletters.feeds.push("https://example.com/alerts.xml".to_string());
        assert!(sources.enabled_feed_urls().contains(&"https://example.com/alerts.xml"));

        sources.newsletters.enabled = false;
        assert!(!sources.enabled_feed_urls().contains(&"https://example.com/alerts.xml"));
    }

    #[test]
    fn test_subreddit_names() {
        let sources = ContentSources::default();
        let names: Vec<&str> = sources.subreddit_names().collect();
        assert_eq!(names[0], "MachineLearning");
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_enabled_sources_tracks_flags() {
        let mut sources = ContentSources::default();
        assert_eq!(sources.enabled_sources().len(), 11);
        sources.reddit.enabled = false;
        sources.kaggle.enabled = false;
        let enabled = sources.enabled_sources();
        assert!(!enabled.contains(&"reddit"));
        assert!(!enabled.contains(&"kaggle"));
        assert_eq!(enabled.len(), 9);
    }

    #[test]
    fn test_newsapi_query_uses_api_field_names() {
        let json = serde_json::to_value(&ContentSources::default().newsapi.query).unwrap();
        assert_eq!(json["sortBy"], "publishedAt");
        assert_eq!(json["pageSize"], 50);
    }
}
