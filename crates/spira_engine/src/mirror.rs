//! Mirror-mode resolution: the adaptive meta-tone.
//!
//! `mirror_me` resolves to whichever base tone occurs most frequently in the
//! session history, weighted by recency so later entries count more. This is
//! the single contract for preferred-tone resolution; everything that needs
//! it goes through this module.

use crate::session::SessionItem;
use spira_core::ResponseMode;

/// Recency-weighted majority tone over the session history.
///
/// Entry `i` of `n` weighs `1 + i/n`. Ties resolve in [`ResponseMode::BASE`]
/// order; an empty history defaults to validation.
pub fn preferred_response_mode(history: &[SessionItem]) -> ResponseMode {
    if history.is_empty() {
        return ResponseMode::Validation;
    }

    let total = history.len() as f64;
    let mut weights = [0.0f64; 4];
    for (i, item) in history.iter().enumerate() {
        if let Some(idx) = ResponseMode::BASE
            .iter()
            .position(|m| *m == item.entry.response_type)
        {
            weights[idx] += 1.0 + i as f64 / total;
        }
    }

    let mut best = 0;
    for i in 1..weights.len() {
        if weights[i] > weights[best] {
            best = i;
        }
    }
    ResponseMode::BASE[best]
}

/// Resolve the session's chosen mode to a concrete base tone.
pub fn resolve_mode(mode: ResponseMode, history: &[SessionItem]) -> ResponseMode {
    match mode {
        ResponseMode::MirrorMe => {
            let resolved = preferred_response_mode(history);
            tracing::debug!("mirror_me resolved to {}", resolved);
            resolved
        }
        base => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spira_core::{JournalEntry, SpiralPattern};

    fn item(mode: ResponseMode, level: i64) -> SessionItem {
        SessionItem {
            entry: JournalEntry {
                timestamp: "2026-08-24 10:00".into(),
                input_text: "x".into(),
                mood: "🌼 Neutral".into(),
                spiral_level: level,
                pattern: SpiralPattern::Rumination,
                emotion: "{}".into(),
                response_type: mode,
            },
            response: String::new(),
        }
    }

    #[test]
    fn test_empty_history_defaults_to_validation() {
        assert_eq!(preferred_response_mode(&[]), ResponseMode::Validation);
    }

    #[test]
    fn test_uniform_history_resolves_to_that_mode() {
        let history = vec![
            item(ResponseMode::ToughLove, 7),
            item(ResponseMode::ToughLove, 8),
            item(ResponseMode::ToughLove, 9),
        ];
        assert_eq!(preferred_response_mode(&history), ResponseMode::ToughLove);
    }

    #[test]
    fn test_recency_outweighs_ties() {
        // Two of each, but the humor entries are later, so they weigh more.
        let history = vec![
            item(ResponseMode::Validation, 3),
            item(ResponseMode::Validation, 3),
            item(ResponseMode::Humor, 3),
            item(ResponseMode::Humor, 3),
        ];
        assert_eq!(preferred_response_mode(&history), ResponseMode::Humor);
    }

    #[test]
    fn test_majority_wins_over_single_recent() {
        let history = vec![
            item(ResponseMode::Distraction, 3),
            item(ResponseMode::Distraction, 3),
            item(ResponseMode::Distraction, 3),
            item(ResponseMode::Humor, 3),
        ];
        assert_eq!(preferred_response_mode(&history), ResponseMode::Distraction);
    }

    #[test]
    fn test_resolve_passes_base_modes_through() {
        let history = vec![item(ResponseMode::ToughLove, 7)];
        assert_eq!(
            resolve_mode(ResponseMode::Humor, &history),
            ResponseMode::Humor
        );
        assert_eq!(
            resolve_mode(ResponseMode::MirrorMe, &history),
            ResponseMode::ToughLove
        );
    }
}
