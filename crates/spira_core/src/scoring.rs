//! Surface-feature heuristics: spiral intensity and mood labels.

use rand::seq::SliceRandom;
use rand::Rng;

/// Negative words that raise the intensity score. Fixed list of seven.
const NEGATIVE_WORDS: [&str; 7] = [
    "worried", "anxious", "scared", "terrible", "awful", "hate", "stupid",
];

const POSITIVE_MOOD_WORDS: [&str; 6] = ["happy", "joy", "excited", "good", "great", "love"];
const NEGATIVE_MOOD_WORDS: [&str; 5] = ["sad", "angry", "hate", "awful", "terrible"];

const POSITIVE_MOODS: [&str; 3] = ["🌈 Hopeful", "✨ Excited", "🌸 Peaceful"];
const NEGATIVE_MOODS: [&str; 3] = ["🌀 Anxious", "🌧️ Sad", "🌪️ Overwhelmed"];
const NEUTRAL_MOODS: [&str; 3] = ["🌼 Neutral", "🌿 Contemplative", "☁️ Pensive"];

/// Overthinking intensity, 1 to 10.
///
/// Deterministic function of the text alone: length contributes up to 5,
/// question marks up to 3, negative keywords up to 2. The sum is truncated
/// to an integer and clamped into [1, 10].
pub fn spiral_level(text: &str) -> i64 {
    let lower = text.to_lowercase();

    let base = (text.chars().count() / 50).min(5) as f64;
    let questions = text.matches('?').count() as f64;
    let negatives = NEGATIVE_WORDS
        .iter()
        .filter(|w| lower.contains(*w))
        .count() as f64;

    let total = (base + (questions * 1.5).min(3.0) + (negatives * 0.5).min(2.0)) as i64;
    total.clamp(1, 10)
}

/// Coarse mood label from keyword presence.
///
/// The label within each valence group is picked at random for variety, so
/// this is not a deterministic function of the text. Callers inject the Rng
/// so tests can seed it.
pub fn mood_label<R: Rng + ?Sized>(text: &str, rng: &mut R) -> &'static str {
    let lower = text.to_lowercase();

    let group: &[&str] = if POSITIVE_MOOD_WORDS.iter().any(|w| lower.contains(w)) {
        &POSITIVE_MOODS
    } else if NEGATIVE_MOOD_WORDS.iter().any(|w| lower.contains(w)) {
        &NEGATIVE_MOODS
    } else {
        &NEUTRAL_MOODS
    };

    group.choose(rng).copied().unwrap_or("🌼 Neutral")
}
