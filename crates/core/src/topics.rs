//! Topic keyword tables and per-episode topic selection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Ai,
    BigData,
    TechFutures,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Ai, Topic::BigData, Topic::TechFutures];

    pub fn name(self) -> &'static str {
        match self {
            Topic::Ai => "ai",
            Topic::BigData => "big_data",
            Topic::TechFutures => "tech_futures",
        }
    }

    /// Phrases that mark an article as belonging to this topic.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Ai => &[
                "artificial intelligence",
                "machine learning",
                "deep learning",
                "neural network",
                "GPT",
                "LLM",
                "ChatGPT",
                "AI model",
                "AGI",
                "computer vision",
                "NLP",
                "natural language processing",
            ],
            Topic::BigData => &[
                "big data",
                "data analytics",
                "data science",
                "data warehouse",
                "data lake",
                "ETL",
                "data pipeline",
                "data engineering",
                "Apache Spark",
                "Hadoop",
                "data processing",
            ],
            Topic::TechFutures => &[
                "quantum computing",
                "blockchain",
                "Web3",
                "metaverse",
                "IoT",
                "edge computing",
                "5G",
                "6G",
                "autonomous vehicles",
                "robotics",
                "biotechnology",
                "nanotechnology",
                "future tech",
            ],
        }
    }

    /// Case-insensitive keyword match against already-lowercased text.
    fn matches_lowercase(self, text: &str) -> bool {
        self.keywords()
            .iter()
            .any(|keyword| text.contains(&keyword.to_lowercase()))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.name() == s)
            .ok_or_else(|| format!("unknown topic: {s}"))
    }
}

/// Topics covered by one episode. Never empty.
///
/// Serialized as a plain list of topic names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Topic>", into = "Vec<Topic>")]
pub struct TopicSelection {
    topics: Vec<Topic>,
}

impl TryFrom<Vec<Topic>> for TopicSelection {
    type Error = PlanError;

    fn try_from(list: Vec<Topic>) -> Result<Self, Self::Error> {
        let mut topics = Vec::with_capacity(list.len());
        for topic in list {
            if !topics.contains(&topic) {
                topics.push(topic);
            }
        }
        if topics.is_empty() {
            return Err(PlanError::NoTopics);
        }
        Ok(Self { topics })
    }
}

impl From<TopicSelection> for Vec<Topic> {
    fn from(selection: TopicSelection) -> Self {
        selection.topics
    }
}

impl Default for TopicSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl TopicSelection {
    pub fn all() -> Self {
        Self {
            topics: Topic::ALL.to_vec(),
        }
    }

    /// Parse a comma-separated list such as `"ai,big_data"`.
    ///
    /// Names are lowercased and trimmed; empty entries are skipped and unknown
    /// ones are logged and ignored. If nothing usable remains, every topic is
    /// selected.
    pub fn parse(list: &str) -> Self {
        let mut topics = Vec::new();
        for name in list.split(',').map(|n| n.trim().to_lowercase()) {
            if name.is_empty() {
                continue;
            }
            match name.parse::<Topic>() {
                Ok(topic) if !topics.contains(&topic) => topics.push(topic),
                Ok(_) => {}
                Err(e) => tracing::warn!("Ignoring episode topic: {}", e),
            }
        }

        if topics.is_empty() {
            return Self::all();
        }
        Self { topics }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn contains(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }

    /// Every keyword of the selected topics.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.topics.iter().flat_map(|topic| topic.keywords().iter().copied())
    }

    /// Selected topics mentioned in `text`.
    pub fn matches(&self, text: &str) -> Vec<Topic> {
        let lowered = text.to_lowercase();
        self.topics
            .iter()
            .copied()
            .filter(|topic| topic.matches_lowercase(&lowered))
            .collect()
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        !self.matches(text).is_empty()
    }
}

impl fmt::Display for TopicSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.topics.iter().map(|t| t.name()).collect();
        f.write_str(&names.join(","))
    }
}
