//! Episode duration tiers.
//!
//! Only three runtimes are produced: 15, 30 and 45 minutes. Any requested
//! integer is mapped onto one of them by [`EpisodeDuration::normalize`], which
//! also reports whether the request had to be clamped or rounded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DurationError;

/// Average speaking pace used for word budgets.
pub const WORDS_PER_MINUTE: u32 = 150;

/// Runtime used when nothing is configured.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

const MIN_MINUTES: i64 = 15;
const MAX_MINUTES: i64 = 45;

/// Off-tier requests below this round to 15 minutes.
const SHORT_UPPER_BOUND: i64 = 22;
/// Off-tier requests below this (and at least [`SHORT_UPPER_BOUND`]) round to 30 minutes.
const STANDARD_UPPER_BOUND: i64 = 37;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum EpisodeDuration {
    Short,
    #[default]
    Standard,
    Extended,
}

/// How a requested duration was changed to land on a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Below the shortest tier.
    ClampedUp,
    /// Above the longest tier.
    ClampedDown,
    /// Inside the supported range but between tiers.
    Rounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationAdjustment {
    pub requested_minutes: i64,
    pub duration: EpisodeDuration,
    pub kind: AdjustmentKind,
}

impl fmt::Display for DurationAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            AdjustmentKind::ClampedUp | AdjustmentKind::ClampedDown => "clamped",
            AdjustmentKind::Rounded => "rounded",
        };
        write!(
            f,
            "requested {} minutes, {} to {} minutes",
            self.requested_minutes,
            verb,
            self.duration.minutes()
        )
    }
}

/// Result of mapping an arbitrary minute count onto a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub duration: EpisodeDuration,
    pub adjustment: Option<DurationAdjustment>,
}

impl EpisodeDuration {
    pub const ALL: [EpisodeDuration; 3] = [
        EpisodeDuration::Short,
        EpisodeDuration::Standard,
        EpisodeDuration::Extended,
    ];

    /// Map any integer onto a tier.
    ///
    /// Clamping wins over rounding: 50 becomes 45 because it is above the
    /// range, not because it is close to 45. Only values inside 15..=45 that
    /// are not a tier are rounded, with cut points at 22 and 37.
    pub fn normalize(minutes: i64) -> Normalized {
        let (duration, kind) = if minutes < MIN_MINUTES {
            (EpisodeDuration::Short, Some(AdjustmentKind::ClampedUp))
        } else if minutes > MAX_MINUTES {
            (EpisodeDuration::Extended, Some(AdjustmentKind::ClampedDown))
        } else if let Some(tier) = Self::from_exact(minutes) {
            (tier, None)
        } else if minutes < SHORT_UPPER_BOUND {
            (EpisodeDuration::Short, Some(AdjustmentKind::Rounded))
        } else if minutes < STANDARD_UPPER_BOUND {
            (EpisodeDuration::Standard, Some(AdjustmentKind::Rounded))
        } else {
            (EpisodeDuration::Extended, Some(AdjustmentKind::Rounded))
        };

        Normalized {
            duration,
            adjustment: kind.map(|kind| DurationAdjustment {
                requested_minutes: minutes,
                duration,
                kind,
            }),
        }
    }

    fn from_exact(minutes: i64) -> Option<Self> {
        match minutes {
            15 => Some(EpisodeDuration::Short),
            30 => Some(EpisodeDuration::Standard),
            45 => Some(EpisodeDuration::Extended),
            _ => None,
        }
    }

    pub fn minutes(self) -> u32 {
        match self {
            EpisodeDuration::Short => 15,
            EpisodeDuration::Standard => 30,
            EpisodeDuration::Extended => 45,
        }
    }

    pub fn total_seconds(self) -> u32 {
        self.minutes() * 60
    }

    pub fn target_word_count(self) -> u32 {
        self.minutes() * WORDS_PER_MINUTE
    }

    /// Number of main-story slots for this tier.
    pub fn num_main_stories(self) -> u8 {
        match self {
            EpisodeDuration::Short => 2,
            EpisodeDuration::Standard => 3,
            EpisodeDuration::Extended => 4,
        }
    }
}

impl fmt::Display for EpisodeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes())
    }
}

impl From<EpisodeDuration> for u32 {
    fn from(duration: EpisodeDuration) -> Self {
        duration.minutes()
    }
}

impl TryFrom<u32> for EpisodeDuration {
    type Error = DurationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_exact(i64::from(minutes)).ok_or(DurationError::NotATier { minutes })
    }
}

/// Parse a user-supplied minute count.
///
/// Accepts optional surrounding whitespace and a leading sign. Empty input,
/// anything that is not a whole number, and negative values are rejected.
/// Out-of-range non-negative values are accepted here and normalized later.
pub fn parse_minutes(input: &str) -> Result<i64, DurationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationError::Missing);
    }
    let minutes: i64 = trimmed.parse().map_err(|_| DurationError::NotAnInteger {
        input: input.to_string(),
    })?;
    check_non_negative(minutes)
}

pub fn check_non_negative(minutes: i64) -> Result<i64, DurationError> {
    if minutes < 0 {
        return Err(DurationError::Negative { minutes });
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(minutes: i64) -> u32 {
        EpisodeDuration::normalize(minutes).duration.minutes()
    }

    #[test]
    fn test_exact_tiers_are_unchanged() {
        for minutes in [15, 30, 45] {
            let normalized = EpisodeDuration::normalize(minutes);
            assert_eq!(i64::from(normalized.duration.minutes()), minutes);
            assert!(normalized.adjustment.is_none());
        }
    }

    #[test]
    fn test_rounding_boundaries() {
        assert_eq!(tier(16), 15);
        assert_eq!(tier(21), 15);
        assert_eq!(tier(22), 30);
        assert_eq!(tier(29), 30);
        assert_eq!(tier(31), 30);
        assert_eq!(tier(36), 30);
        assert_eq!(tier(37), 45);
        assert_eq!(tier(44), 45);
    }

    #[test]
    fn test_clamp_takes_precedence() {
        assert_eq!(tier(100), 45);
        assert_eq!(tier(46), 45);
        assert_eq!(tier(5), 15);
        assert_eq!(tier(0), 15);
        assert_eq!(tier(-10), 15);
        assert_eq!(tier(i64::MIN), 15);
        assert_eq!(tier(i64::MAX), 45);
    }

    #[test]
    fn test_adjustment_kinds() {
        let kind = |m| EpisodeDuration::normalize(m).adjustment.map(|a| a.kind);
        assert_eq!(kind(5), Some(AdjustmentKind::ClampedUp));
        assert_eq!(kind(50), Some(AdjustmentKind::ClampedDown));
        assert_eq!(kind(40), Some(AdjustmentKind::Rounded));
        assert_eq!(kind(30), None);
    }

    #[test]
    fn test_adjustment_display() {
        let adjustment = EpisodeDuration::normalize(50).adjustment.unwrap();
        assert_eq!(
            adjustment.to_string(),
            "requested 50 minutes, clamped to 45 minutes"
        );
        let adjustment = EpisodeDuration::normalize(20).adjustment.unwrap();
        assert_eq!(
            adjustment.to_string(),
            "requested 20 minutes, rounded to 15 minutes"
        );
    }

    #[test]
    fn test_derived_constants() {
        assert_eq!(EpisodeDuration::Short.total_seconds(), 900);
        assert_eq!(EpisodeDuration::Standard.target_word_count(), 4500);
        assert_eq!(EpisodeDuration::Extended.target_word_count(), 6750);
        assert_eq!(EpisodeDuration::Short.num_main_stories(), 2);
        assert_eq!(EpisodeDuration::Standard.num_main_stories(), 3);
        assert_eq!(EpisodeDuration::Extended.num_main_stories(), 4);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("30"), Ok(30));
        assert_eq!(parse_minutes(" 50 \n"), Ok(50));
        assert_eq!(parse_minutes("0"), Ok(0));
        assert_eq!(parse_minutes(""), Err(DurationError::Missing));
        assert_eq!(parse_minutes("   "), Err(DurationError::Missing));
        assert_eq!(
            parse_minutes("30.5"),
            Err(DurationError::NotAnInteger {
                input: "30.5".to_string()
            })
        );
        assert!(matches!(
            parse_minutes("thirty"),
            Err(DurationError::NotAnInteger { .. })
        ));
        assert_eq!(
            parse_minutes("-5"),
            Err(DurationError::Negative { minutes: -5 })
        );
    }

    #[test]
    fn test_serde_uses_minutes() {
        let json = serde_json::to_string(&EpisodeDuration::Extended).unwrap();
        assert_eq!(json, "45");
        let parsed: EpisodeDuration = serde_json::from_str("15").unwrap();
        assert_eq!(parsed, EpisodeDuration::Short);
        assert!(serde_json::from_str::<EpisodeDuration>("20").is_err());
    }
}
