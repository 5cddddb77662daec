//! Per-episode configuration handed to the script-drafting stage.

use serde::{Deserialize, Serialize};

use crate::{
    allocation::{EpisodePlan, OptionalSections, SectionKey, SectionPlan, allocate_minutes},
    config::Settings,
    duration::{DurationAdjustment, EpisodeDuration},
    error::PlanError,
    topics::TopicSelection,
};

/// The plan's tier, budgets and `sections` map are flattened into the top
/// level of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    pub title: String,
    /// Present when the requested runtime was clamped or rounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_adjustment: Option<DurationAdjustment>,
    pub optional_sections: OptionalSections,
    pub episode_topics: TopicSelection,
    #[serde(flatten)]
    pub plan: EpisodePlan,
}

impl EpisodeConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::build(
            &settings.title,
            settings.duration_minutes,
            settings.optional_sections,
            settings.topics(),
        )
    }

    pub fn build(
        title: &str,
        duration_minutes: i64,
        optional_sections: OptionalSections,
        episode_topics: TopicSelection,
    ) -> Self {
        let allocation = allocate_minutes(duration_minutes);
        let plan = allocation.plan.with_optional_sections(optional_sections);
        tracing::debug!(
            "Built {} plan with {} main stories for topics {}",
            plan.duration,
            plan.num_main_stories,
            episode_topics
        );

        Self {
            title: title.to_string(),
            duration_adjustment: allocation.adjustment,
            optional_sections,
            episode_topics,
            plan,
        }
    }

    pub fn duration(&self) -> EpisodeDuration {
        self.plan.duration
    }

    pub fn target_word_count(&self) -> u32 {
        self.plan.target_word_count
    }

    pub fn num_main_stories(&self) -> u8 {
        self.plan.num_main_stories
    }

    /// Sections the script must contain, in rundown order. Transitions are
    /// audio cues rather than written segments and are left out.
    pub fn enabled_sections(&self) -> impl Iterator<Item = (SectionKey, &SectionPlan)> {
        self.plan
            .enabled_sections()
            .filter(|(key, _)| key.is_spoken())
    }

    /// Check an episode read back from disk. On top of [`EpisodePlan::validate`],
    /// the optional-section flags and any recorded adjustment must agree with
    /// the plan.
    pub fn validate(&self) -> Result<(), PlanError> {
        self.plan.validate()?;

        let flags = [
            (SectionKey::DeepDive, self.optional_sections.deep_dive),
            (SectionKey::ExpertInterview, self.optional_sections.expert_interview),
        ];
        for (section, wanted) in flags {
            if self.plan.get(section).map(SectionPlan::is_enabled) != Some(wanted) {
                return Err(PlanError::FlagMismatch { section });
            }
        }

        if let Some(adjustment) = &self.duration_adjustment
            && adjustment.duration != self.plan.duration
        {
            return Err(PlanError::AdjustmentMismatch {
                adjusted: adjustment.duration,
                planned: self.plan.duration,
            });
        }
        Ok(())
    }
}
