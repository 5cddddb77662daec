//! Duration-to-section allocation.
//!
//! Converts a tier into a rundown of named sections, each with a time budget,
//! a share of the runtime and (for spoken sections) a word budget. Pure
//! computation over the constant [`BASE_SECTION_WEIGHTS`].

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    duration::{DurationAdjustment, EpisodeDuration},
    error::PlanError,
};

/// Share of the runtime assigned to each kind of section.
///
/// The shares add up to more than 1.0: `main_stories` is split across the
/// story slots, and `deep_dive`/`expert_interview` are opt-in overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionWeights {
    pub intro: f64,
    pub main_stories: f64,
    pub tech_spotlight: f64,
    pub listener_questions: f64,
    pub deep_dive: f64,
    pub expert_interview: f64,
    pub outro: f64,
    pub transitions: f64,
}

pub const BASE_SECTION_WEIGHTS: SectionWeights = SectionWeights {
    intro: 0.05,
    main_stories: 0.65,
    tech_spotlight: 0.15,
    listener_questions: 0.08,
    deep_dive: 0.10,
    expert_interview: 0.10,
    outro: 0.05,
    transitions: 0.07,
};

impl SectionWeights {
    /// Weight of a single section key. Main-story slots get their even share
    /// of `main_stories` for the given number of slots.
    pub fn weight_for(&self, key: SectionKey, num_main_stories: u8) -> f64 {
        match key {
            SectionKey::Intro => self.intro,
            SectionKey::MainStory(_) => self.main_stories / f64::from(num_main_stories),
            SectionKey::TechSpotlight => self.tech_spotlight,
            SectionKey::ListenerQuestions => self.listener_questions,
            SectionKey::DeepDive => self.deep_dive,
            SectionKey::ExpertInterview => self.expert_interview,
            SectionKey::Outro => self.outro,
            SectionKey::Transitions => self.transitions,
        }
    }
}

/// Identifier of a section in an [`EpisodePlan`].
///
/// Ordering follows the on-air rundown, so a `BTreeMap` keyed by it iterates
/// in broadcast order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Intro,
    /// 1-based story slot.
    MainStory(u8),
    TechSpotlight,
    DeepDive,
    ExpertInterview,
    ListenerQuestions,
    Outro,
    Transitions,
}

impl SectionKey {
    /// Sections with a fixed weight, in the order they are allocated.
    pub const FIXED: [SectionKey; 7] = [
        SectionKey::Intro,
        SectionKey::Outro,
        SectionKey::TechSpotlight,
        SectionKey::ListenerQuestions,
        SectionKey::Transitions,
        SectionKey::DeepDive,
        SectionKey::ExpertInterview,
    ];

    /// Whether the section carries its own spoken-word budget.
    /// Transitions are connective audio cues and have none.
    pub fn is_spoken(self) -> bool {
        !matches!(self, SectionKey::Transitions)
    }

    /// Default value of the `enabled` flag, for sections that have one.
    pub fn default_enabled(self) -> Option<bool> {
        match self {
            SectionKey::ListenerQuestions => Some(true),
            SectionKey::DeepDive | SectionKey::ExpertInterview => Some(false),
            _ => None,
        }
    }

    pub fn is_main_story(self) -> bool {
        matches!(self, SectionKey::MainStory(_))
    }

    pub fn title(self) -> String {
        match self {
            SectionKey::Intro => "Intro".to_string(),
            SectionKey::MainStory(n) => format!("Main story {n}"),
            SectionKey::TechSpotlight => "Tech spotlight".to_string(),
            SectionKey::DeepDive => "Deep dive".to_string(),
            SectionKey::ExpertInterview => "Expert interview".to_string(),
            SectionKey::ListenerQuestions => "Listener questions".to_string(),
            SectionKey::Outro => "Outro".to_string(),
            SectionKey::Transitions => "Transitions".to_string(),
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKey::Intro => f.write_str("intro"),
            SectionKey::MainStory(n) => write!(f, "main_story_{n}"),
            SectionKey::TechSpotlight => f.write_str("tech_spotlight"),
            SectionKey::DeepDive => f.write_str("deep_dive"),
            SectionKey::ExpertInterview => f.write_str("expert_interview"),
            SectionKey::ListenerQuestions => f.write_str("listener_questions"),
            SectionKey::Outro => f.write_str("outro"),
            SectionKey::Transitions => f.write_str("transitions"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section key: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionKey {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "intro" => SectionKey::Intro,
            "tech_spotlight" => SectionKey::TechSpotlight,
            "deep_dive" => SectionKey::DeepDive,
            "expert_interview" => SectionKey::ExpertInterview,
            "listener_questions" => SectionKey::ListenerQuestions,
            "outro" => SectionKey::Outro,
            "transitions" => SectionKey::Transitions,
            other => {
                let n = other
                    .strip_prefix("main_story_")
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| UnknownSection(other.to_string()))?;
                SectionKey::MainStory(n)
            }
        };
        Ok(key)
    }
}

impl Serialize for SectionKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SectionKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}

/// Budget for one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPlan {
    pub duration_seconds: u32,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count_target: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl SectionPlan {
    /// Sections without an `enabled` flag always air.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Opt-in sections toggled per episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalSections {
    #[serde(default)]
    pub deep_dive: bool,
    #[serde(default)]
    pub expert_interview: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodePlan {
    pub duration: EpisodeDuration,
    pub total_seconds: u32,
    pub target_word_count: u32,
    pub num_main_stories: u8,
    pub sections: BTreeMap<SectionKey, SectionPlan>,
}

/// A plan together with the substitution made to reach its tier, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub plan: EpisodePlan,
    pub adjustment: Option<DurationAdjustment>,
}

fn scaled(base: u32, weight: f64) -> u32 {
    // Budgets are non-negative, so truncation is floor.
    (f64::from(base) * weight) as u32
}

/// Build the section plan for a tier.
pub fn allocate(duration: EpisodeDuration) -> EpisodePlan {
    allocate_with(duration, &BASE_SECTION_WEIGHTS)
}

/// Normalize an arbitrary minute count, then allocate.
pub fn allocate_minutes(minutes: i64) -> Allocation {
    let normalized = EpisodeDuration::normalize(minutes);
    if let Some(adjustment) = &normalized.adjustment {
        tracing::warn!("Episode duration adjusted: {}", adjustment);
    }
    Allocation {
        plan: allocate(normalized.duration),
        adjustment: normalized.adjustment,
    }
}

pub fn allocate_with(duration: EpisodeDuration, weights: &SectionWeights) -> EpisodePlan {
    let total_seconds = duration.total_seconds();
    let target_word_count = duration.target_word_count();
    let num_main_stories = duration.num_main_stories();

    let section = |key: SectionKey| {
        let weight = weights.weight_for(key, num_main_stories);
        SectionPlan {
            duration_seconds: scaled(total_seconds, weight),
            weight,
            word_count_target: key
                .is_spoken()
                .then(|| scaled(target_word_count, weight)),
            enabled: key.default_enabled(),
        }
    };

    let sections = SectionKey::FIXED
        .into_iter()
        .chain((1..=num_main_stories).map(SectionKey::MainStory))
        .map(|key| (key, section(key)))
        .collect();

    EpisodePlan {
        duration,
        total_seconds,
        target_word_count,
        num_main_stories,
        sections,
    }
}

impl EpisodePlan {
    pub fn get(&self, key: SectionKey) -> Option<&SectionPlan> {
        self.sections.get(&key)
    }

    /// Look a section up by its wire name, e.g. `"main_story_2"`.
    pub fn section(&self, name: &str) -> Option<&SectionPlan> {
        name.parse().ok().and_then(|key| self.get(key))
    }

    pub fn main_stories(&self) -> impl Iterator<Item = (SectionKey, &SectionPlan)> {
        self.sections
            .iter()
            .filter(|(key, _)| key.is_main_story())
            .map(|(key, plan)| (*key, plan))
    }

    /// Share of the runtime given to each main-story slot.
    pub fn per_story_weight(&self) -> f64 {
        self.main_stories()
            .next()
            .map(|(_, plan)| plan.weight)
            .unwrap_or_default()
    }

    /// Override the `enabled` flag of a section. Returns `false` when the
    /// section is absent or always airs.
    pub fn set_enabled(&mut self, key: SectionKey, enabled: bool) -> bool {
        match self.sections.get_mut(&key) {
            Some(plan) if plan.enabled.is_some() => {
                plan.enabled = Some(enabled);
                true
            }
            _ => false,
        }
    }

    pub fn with_optional_sections(mut self, optional: OptionalSections) -> Self {
        self.set_enabled(SectionKey::DeepDive, optional.deep_dive);
        self.set_enabled(SectionKey::ExpertInterview, optional.expert_interview);
        self
    }

    /// Sections that air, in rundown order.
    pub fn enabled_sections(&self) -> impl Iterator<Item = (SectionKey, &SectionPlan)> {
        self.sections
            .iter()
            .filter(|(_, plan)| plan.is_enabled())
            .map(|(key, plan)| (*key, plan))
    }

    /// Sum of the time budgets of every airing section. Truncation drift is
    /// not corrected, so this rarely equals `total_seconds`.
    pub fn scheduled_seconds(&self) -> u32 {
        self.enabled_sections()
            .map(|(_, plan)| plan.duration_seconds)
            .sum()
    }

    pub fn scheduled_words(&self) -> u32 {
        self.enabled_sections()
            .filter_map(|(_, plan)| plan.word_count_target)
            .sum()
    }

    /// Check a plan read from outside against its own tier: budgets and
    /// story count must match, stories must be numbered `1..=N` and every
    /// fixed section must be present.
    pub fn validate(&self) -> Result<(), PlanError> {
        let duration = self.duration;
        check_field(
            "total_seconds",
            duration,
            duration.total_seconds(),
            self.total_seconds,
        )?;
        check_field(
            "target_word_count",
            duration,
            duration.target_word_count(),
            self.target_word_count,
        )?;
        check_field(
            "num_main_stories",
            duration,
            u32::from(duration.num_main_stories()),
            u32::from(self.num_main_stories),
        )?;

        let slots: Vec<u8> = self
            .main_stories()
            .filter_map(|(key, _)| match key {
                SectionKey::MainStory(n) => Some(n),
                _ => None,
            })
            .collect();
        if !slots.iter().copied().eq(1..=self.num_main_stories) {
            return Err(PlanError::MainStoryNumbering {
                expected: self.num_main_stories,
                found: slots,
            });
        }

        if let Some(missing) = SectionKey::FIXED
            .into_iter()
            .find(|key| !self.sections.contains_key(key))
        {
            return Err(PlanError::MissingSection(missing));
        }
        Ok(())
    }
}

fn check_field(
    field: &'static str,
    duration: EpisodeDuration,
    expected: u32,
    found: u32,
) -> Result<(), PlanError> {
    if expected == found {
        Ok(())
    } else {
        Err(PlanError::Mismatch {
            field,
            duration,
            expected,
            found,
        })
    }
}
