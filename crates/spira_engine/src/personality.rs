//! Overthinking personality typing from pattern history.

use spira_core::SpiralPattern;

/// Named personality type for the dominant pattern in history.
///
/// Ties resolve in [`SpiralPattern::ALL`] order; an empty history gets the
/// newcomer type.
pub fn personality_type<'a>(patterns: impl IntoIterator<Item = &'a SpiralPattern>) -> &'static str {
    let mut counts = [0usize; SpiralPattern::ALL.len()];
    for pattern in patterns {
        if let Some(idx) = SpiralPattern::ALL.iter().position(|p| p == pattern) {
            counts[idx] += 1;
        }
    }

    if counts.iter().all(|c| *c == 0) {
        return "The New Overthinker";
    }

    let mut best = 0;
    for i in 1..counts.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }

    match SpiralPattern::ALL[best] {
        SpiralPattern::CatastrophicThinking => "The Catastrophizer",
        SpiralPattern::Rumination => "The Retrospective Overanalyzer",
        SpiralPattern::SelfDoubt => "The Self-Doubt Ninja",
        SpiralPattern::AnxietySpiral => "The Spiral Queen",
        SpiralPattern::DecisionParalysis => "The Indecisive Icon",
        SpiralPattern::NormalReflection => "The Balanced Thinker",
    }
}
