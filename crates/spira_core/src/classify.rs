//! Zero-shot classification seam and the keyword fallback.
//!
//! The external model is a pluggable capability: (text, labels) in, ranked
//! labels with scores out. Every failure of the primary path degrades to a
//! local heuristic; nothing retries and nothing surfaces to the caller.

use crate::entry::{PatternMatch, SpiralPattern};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Candidate labels for overthinking pattern detection.
pub const PATTERN_LABELS: [&str; 6] = [
    "catastrophic thinking",
    "rumination",
    "self-doubt",
    "anxiety spiral",
    "decision paralysis",
    "normal reflection",
];

/// Candidate labels for the emotional-tone call. A separate label set from
/// pattern detection; the top label is interpolated into response templates.
pub const EMOTION_LABELS: [&str; 7] = [
    "fear", "anger", "sadness", "joy", "love", "surprise", "anxiety",
];

/// Placeholder substituted when the emotion call fails or no model is wired.
pub const EMOTION_PLACEHOLDER: &str = "emotion";

#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// A pretrained zero-shot text classifier.
///
/// Implementations rank the given candidate labels by relevance to the text,
/// highest score first.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<LabelScore>>;
}

/// Keyword lists for the fallback path. First matching category wins, so the
/// order here is part of the contract.
const FALLBACK_KEYWORDS: [(SpiralPattern, &[&str]); 5] = [
    (
        SpiralPattern::CatastrophicThinking,
        &["worst", "disaster", "terrible", "awful", "horrible"],
    ),
    (
        SpiralPattern::Rumination,
        &["over and over", "can't stop thinking", "keep thinking"],
    ),
    (
        SpiralPattern::SelfDoubt,
        &["not good enough", "can't do this", "failure", "stupid"],
    ),
    (
        SpiralPattern::AnxietySpiral,
        &["what if", "anxious", "nervous", "scared", "panic"],
    ),
    (
        SpiralPattern::DecisionParalysis,
        &["can't decide", "don't know", "what should", "which one"],
    ),
];

/// Deterministic pattern detection for when no model is available.
///
/// Case-insensitive substring match; a hit carries a fixed 0.8 confidence,
/// no hit means normal reflection at 0.5.
pub fn fallback_pattern(text: &str) -> PatternMatch {
    let lower = text.to_lowercase();
    for (pattern, keywords) in FALLBACK_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return PatternMatch {
                pattern,
                confidence: 0.8,
            };
        }
    }
    PatternMatch {
        pattern: SpiralPattern::NormalReflection,
        confidence: 0.5,
    }
}

/// Pattern detection front door: model first, keyword fallback on any failure.
#[derive(Clone)]
pub struct PatternDetector {
    classifier: Option<Arc<dyn ZeroShotClassifier>>,
}

impl PatternDetector {
    pub fn new(classifier: Option<Arc<dyn ZeroShotClassifier>>) -> Self {
        Self { classifier }
    }

    /// Keyword-only detector; useful for tests and offline runs.
    pub fn offline() -> Self {
        Self { classifier: None }
    }

    pub async fn detect(&self, text: &str) -> PatternMatch {
        let Some(classifier) = &self.classifier else {
            return fallback_pattern(text);
        };

        match classifier.classify(text, &PATTERN_LABELS).await {
            Ok(ranked) => match ranked.first() {
                Some(top) => match top.label.parse::<SpiralPattern>() {
                    Ok(pattern) => PatternMatch {
                        pattern,
                        confidence: top.score,
                    },
                    Err(_) => {
                        tracing::warn!("Classifier returned unknown label '{}'", top.label);
                        fallback_pattern(text)
                    }
                },
                None => fallback_pattern(text),
            },
            Err(e) => {
                tracing::warn!("Pattern detection failed ({}), using keyword fallback", e);
                fallback_pattern(text)
            }
        }
    }

    /// Emotional-tone classification for response templating.
    ///
    /// Returns `(label, confidence)`; any failure substitutes the placeholder
    /// label at zero confidence.
    pub async fn classify_emotion(&self, text: &str) -> (String, f32) {
        let Some(classifier) = &self.classifier else {
            return (EMOTION_PLACEHOLDER.to_string(), 0.0);
        };

        match classifier.classify(text, &EMOTION_LABELS).await {
            Ok(ranked) => match ranked.into_iter().next() {
                Some(top) => (top.label, top.score),
                None => (EMOTION_PLACEHOLDER.to_string(), 0.0),
            },
            Err(e) => {
                tracing::warn!("Emotion classification failed ({}), using placeholder", e);
                (EMOTION_PLACEHOLDER.to_string(), 0.0)
            }
        }
    }
}

/// Deterministic classifier for tests and offline demos.
///
/// Ranks a preferred label first when present in the candidate set, the rest
/// in candidate order with decaying scores. `failing()` errors on every call
/// to exercise the degradation paths.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    preferred: Option<String>,
    fail: bool,
}

impl MockClassifier {
    pub fn ranking_first(label: &str) -> Self {
        Self {
            preferred: Some(label.to_string()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            preferred: None,
            fail: true,
        }
    }
}

#[async_trait]
impl ZeroShotClassifier for MockClassifier {
    async fn classify(&self, _text: &str, labels: &[&str]) -> Result<Vec<LabelScore>> {
        if self.fail {
            anyhow::bail!("mock classifier configured to fail");
        }

        let mut ordered: Vec<&str> = Vec::with_capacity(labels.len());
        if let Some(preferred) = &self.preferred {
            if labels.contains(&preferred.as_str()) {
                ordered.push(preferred.as_str());
            }
        }
        let head = ordered.first().copied();
        for label in labels {
            if Some(*label) != head {
                ordered.push(label);
            }
        }

        Ok(ordered
            .into_iter()
            .enumerate()
            .map(|(i, label)| LabelScore {
                label: label.to_string(),
                score: 0.9 / (i as f32 + 1.0),
            })
            .collect())
    }
}
