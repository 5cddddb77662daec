//! Decoded Core Library
//!
//! Episode planning for an AI and technology news podcast: duration tiers,
//! per-section time and word budgets, and the settings the drafting, voice
//! and publishing stages read.

pub mod allocation;
pub mod config;
pub mod duration;
pub mod episode;
pub mod error;
pub mod format;
pub mod paths;
pub mod provider;
pub mod publishing;
pub mod script;
pub mod sources;
pub mod store;
pub mod topics;

// Re-export commonly used items at crate root
pub use allocation::{
    Allocation, BASE_SECTION_WEIGHTS, EpisodePlan, OptionalSections, SectionKey, SectionPlan,
    SectionWeights, allocate, allocate_minutes,
};
pub use config::Settings;
pub use duration::{
    AdjustmentKind, DurationAdjustment, EpisodeDuration, Normalized, WORDS_PER_MINUTE,
    parse_minutes,
};
pub use episode::EpisodeConfig;
pub use error::{ConfigError, DecodedError, DurationError, PlanError, Result};
pub use format::{format_plan_readable, format_timestamp};
pub use paths::{Layout, default_base_dir};
pub use provider::{ApiService, Credentials, ProviderError, ScriptModel, VoiceConfig};
pub use publishing::PublishingConfig;
pub use script::{OutputFormats, ScriptSettings};
pub use sources::ContentSources;
pub use store::{load_plan, save_plan};
pub use topics::{Topic, TopicSelection};
