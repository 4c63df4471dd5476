//! Keyword + polarity emotion vector.
//!
//! A heuristic mapping of five emotion names to normalized weights in [0, 1].
//! In production this would be replaced with an ML model; the keyword lists
//! are shared here so other crates don't duplicate them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const POSITIVE: [&str; 8] = [
    "happy", "joy", "excited", "love", "grateful", "great", "good", "calm",
];
const NEGATIVE: [&str; 8] = [
    "sad", "angry", "hate", "awful", "terrible", "worried", "scared", "lonely",
];

const JOY_WORDS: [&str; 6] = ["happy", "excited", "love", "grateful", "smile", "laugh"];
const SADNESS_WORDS: [&str; 5] = ["sad", "lonely", "cry", "miss", "empty"];
const ANGER_WORDS: [&str; 5] = ["angry", "mad", "hate", "annoyed", "frustrated"];
const FEAR_WORDS: [&str; 5] = ["worried", "anxious", "scared", "panic", "fear"];
const GUILT_WORDS: [&str; 4] = ["sorry", "regret", "guilty", "ashamed"];

/// Lowercased word set, punctuation trimmed from both ends.
fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Sentiment polarity in [-1, 1] from keyword counting.
pub fn sentiment_polarity(text: &str) -> f32 {
    let words = word_set(text);
    let pos = POSITIVE.iter().filter(|w| words.contains(**w)).count() as f32;
    let neg = NEGATIVE.iter().filter(|w| words.contains(**w)).count() as f32;
    (pos - neg) / (pos + neg + 1.0)
}

/// Five emotion weights, normalized to [0, 1] and rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionVector {
    pub joy: f32,
    pub sadness: f32,
    pub anger: f32,
    pub fear: f32,
    pub guilt: f32,
}

impl EmotionVector {
    pub fn from_text(text: &str) -> Self {
        let words = word_set(text);
        let polarity = sentiment_polarity(text);
        let hit = |list: &[&str]| list.iter().any(|w| words.contains(*w));

        let mut v = EmotionVector::default();
        if hit(&JOY_WORDS) {
            v.joy += 0.5 + polarity.max(0.0);
        }
        if hit(&SADNESS_WORDS) {
            v.sadness += 0.5 - polarity.min(0.0);
        }
        if hit(&ANGER_WORDS) {
            v.anger += 0.6;
        }
        if hit(&FEAR_WORDS) {
            v.fear += 0.6;
        }
        if hit(&GUILT_WORDS) {
            v.guilt += 0.7;
        }

        v.normalize();
        v
    }

    fn normalize(&mut self) {
        // Normalizing by the max keeps the dominant emotion at 1.0; a flat
        // zero vector stays zero.
        let max = self.weights().into_iter().fold(0.0f32, f32::max);
        let max = if max > 0.0 { max } else { 1.0 };
        self.joy = round2(self.joy / max);
        self.sadness = round2(self.sadness / max);
        self.anger = round2(self.anger / max);
        self.fear = round2(self.fear / max);
        self.guilt = round2(self.guilt / max);
    }

    fn weights(&self) -> [f32; 5] {
        [self.joy, self.sadness, self.anger, self.fear, self.guilt]
    }

    /// The highest-weight emotion name. Ties resolve in field order.
    pub fn dominant(&self) -> &'static str {
        const NAMES: [&str; 5] = ["joy", "sadness", "anger", "fear", "guilt"];
        let mut best = 0;
        for (i, w) in self.weights().iter().enumerate() {
            if *w > self.weights()[best] {
                best = i;
            }
        }
        NAMES[best]
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize emotion vector")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse emotion vector")
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_bounds() {
        assert!(sentiment_polarity("happy great love") > 0.0);
        assert!(sentiment_polarity("sad awful terrible") < 0.0);
        assert_eq!(sentiment_polarity("the weather outside"), 0.0);
    }

    #[test]
    fn test_polarity_word_boundaries() {
        // "madrid" must not count as "mad"; word-level matching, not substring.
        assert_eq!(sentiment_polarity("visiting madrid"), 0.0);
    }

    #[test]
    fn test_joy_dominates_happy_text() {
        let v = EmotionVector::from_text("I'm so happy and grateful today");
        assert_eq!(v.dominant(), "joy");
        assert_eq!(v.joy, 1.0);
    }

    #[test]
    fn test_guilt_weighting() {
        let v = EmotionVector::from_text("I regret what I said, I feel guilty");
        assert_eq!(v.dominant(), "guilt");
    }

    #[test]
    fn test_weights_normalized() {
        let v = EmotionVector::from_text("sad and angry and scared and sorry");
        for w in v.weights() {
            assert!((0.0..=1.0).contains(&w), "weight out of range: {}", w);
        }
        assert!(v.weights().iter().any(|w| (*w - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_neutral_text_is_zero_vector() {
        let v = EmotionVector::from_text("thinking about the commute");
        assert_eq!(v, EmotionVector::default());
        assert_eq!(v.dominant(), "joy"); // tie resolves in field order
    }

    #[test]
    fn test_json_roundtrip() {
        let v = EmotionVector::from_text("worried and a bit sad");
        let restored = EmotionVector::from_json(&v.to_json().unwrap()).unwrap();
        assert_eq!(v, restored);
    }
}
