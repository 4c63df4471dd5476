//! Domain types shared across crates: patterns, response modes, entries.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spiral levels at or above this count as "high intensity" everywhere:
/// template bucket selection, mirror-mode resolution, trend aggregation.
pub const HIGH_SPIRAL_THRESHOLD: i64 = 6;

/// Timestamps are truncated to minute resolution at entry construction.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One of six fixed categories describing a style of overthinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralPattern {
    CatastrophicThinking,
    Rumination,
    SelfDoubt,
    AnxietySpiral,
    DecisionParalysis,
    NormalReflection,
}

impl SpiralPattern {
    pub const ALL: [SpiralPattern; 6] = [
        SpiralPattern::CatastrophicThinking,
        SpiralPattern::Rumination,
        SpiralPattern::SelfDoubt,
        SpiralPattern::AnxietySpiral,
        SpiralPattern::DecisionParalysis,
        SpiralPattern::NormalReflection,
    ];

    /// The label form fed to the zero-shot classifier and stored on disk.
    pub fn as_label(&self) -> &'static str {
        match self {
            SpiralPattern::CatastrophicThinking => "catastrophic thinking",
            SpiralPattern::Rumination => "rumination",
            SpiralPattern::SelfDoubt => "self-doubt",
            SpiralPattern::AnxietySpiral => "anxiety spiral",
            SpiralPattern::DecisionParalysis => "decision paralysis",
            SpiralPattern::NormalReflection => "normal reflection",
        }
    }
}

impl fmt::Display for SpiralPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for SpiralPattern {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpiralPattern::ALL
            .iter()
            .find(|p| p.as_label() == s)
            .copied()
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

/// Response tone used to pick a reply template. `MirrorMe` is a meta-mode
/// resolved at processing time to the user's historically preferred base mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    Validation,
    ToughLove,
    Humor,
    Distraction,
    MirrorMe,
}

impl ResponseMode {
    /// The four concrete tones, in the fixed tie-breaking order used by
    /// mirror-mode resolution.
    pub const BASE: [ResponseMode; 4] = [
        ResponseMode::Validation,
        ResponseMode::ToughLove,
        ResponseMode::Humor,
        ResponseMode::Distraction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Validation => "validation",
            ResponseMode::ToughLove => "tough_love",
            ResponseMode::Humor => "humor",
            ResponseMode::Distraction => "distraction",
            ResponseMode::MirrorMe => "mirror_me",
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validation" => Ok(ResponseMode::Validation),
            "tough_love" => Ok(ResponseMode::ToughLove),
            "humor" => Ok(ResponseMode::Humor),
            "distraction" => Ok(ResponseMode::Distraction),
            "mirror_me" => Ok(ResponseMode::MirrorMe),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct ParseModeError(pub String);

/// Classification result: the detected pattern and the classifier's (or the
/// keyword fallback's fixed) confidence for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch {
    pub pattern: SpiralPattern,
    pub confidence: f32,
}

/// One user submission. Append-only: created, persisted, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Minute-resolution local timestamp, [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    pub input_text: String,
    /// Emoji-labeled mood string from the mood heuristic.
    pub mood: String,
    /// Heuristic intensity, 1 to 10.
    pub spiral_level: i64,
    pub pattern: SpiralPattern,
    /// Serialized emotion vector (JSON object of five weights).
    pub emotion: String,
    /// The resolved base tone this entry was answered with.
    pub response_type: ResponseMode,
}

impl JournalEntry {
    /// Current local time formatted at minute resolution.
    pub fn now_timestamp() -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn is_high_spiral(&self) -> bool {
        self.spiral_level >= HIGH_SPIRAL_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_label_roundtrip() {
        for pattern in SpiralPattern::ALL {
            let parsed: SpiralPattern = pattern.as_label().parse().unwrap();
            assert_eq!(parsed, pattern);
        }
    }

    #[test]
    fn test_mode_roundtrip() {
        for mode in [
            ResponseMode::Validation,
            ResponseMode::ToughLove,
            ResponseMode::Humor,
            ResponseMode::Distraction,
            ResponseMode::MirrorMe,
        ] {
            let parsed: ResponseMode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn test_unknown_mode_errors() {
        assert!("mirror_you".parse::<ResponseMode>().is_err());
        assert!("".parse::<SpiralPattern>().is_err());
    }

    #[test]
    fn test_timestamp_is_minute_resolution() {
        let ts = JournalEntry::now_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_high_spiral_boundary() {
        let mut entry = JournalEntry {
            timestamp: JournalEntry::now_timestamp(),
            input_text: "x".into(),
            mood: "🌼 Neutral".into(),
            spiral_level: 5,
            pattern: SpiralPattern::NormalReflection,
            emotion: "{}".into(),
            response_type: ResponseMode::Validation,
        };
        assert!(!entry.is_high_spiral());
        entry.spiral_level = 6;
        assert!(entry.is_high_spiral());
    }
}
