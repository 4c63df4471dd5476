//! Canned response templates, keyed by (tone, intensity bucket).
//!
//! Each base tone carries three templates per bucket; selection among the
//! three is uniform random with an injected Rng. The `{emotion}` placeholder
//! is filled with the dominant emotion label from the classifier (or the
//! placeholder word when classification failed).

use rand::seq::SliceRandom;
use rand::Rng;
use spira_core::{ResponseMode, HIGH_SPIRAL_THRESHOLD};

static VALIDATION_LOW: [&str; 3] = [
    "I sense {emotion} in your words, and that's completely valid. It's okay to feel what you're feeling. No judgment here.",
    "Your feelings of {emotion} make total sense in this situation. You're not overreacting, you're reacting. Whatever you're carrying right now is real.",
    "I hear you, and this {emotion} is a normal response. You don't need to justify it. Let's just sit with it together for a moment.",
];

static VALIDATION_HIGH: [&str; 3] = [
    "This {emotion} feels overwhelming, I can tell, and that's completely valid. Sometimes the weight of things hits like a wave. I'm right here with you in this.",
    "Your {emotion} is coming through strongly, and that sounds really exhausting. You're allowed to just exist right now. No fixing, no faking.",
    "I can feel the intensity of this {emotion}, and you don't have to go through it alone. Whatever triggered this, it matters because you matter.",
];

static TOUGH_LOVE_LOW: [&str; 3] = [
    "That {emotion} is real, and I'm not dismissing it. But let's gently ask: is this thought helping you or hurting you?",
    "I see the {emotion}, and it's okay to feel it. But is this worry based on solid ground? Let's look at what's true, not just what's loud.",
    "Your {emotion} is valid, truly. But I want to challenge you: is this belief serving your peace, or stealing it?",
];

static TOUGH_LOVE_HIGH: [&str; 3] = [
    "This {emotion} storm is loud, but you are not powerless inside it. Let's anchor in one small fact we know is true. Start there, gently.",
    "Your brain is turning up the volume on this {emotion}, and that's okay. But let's not take every thought as gospel. You've faced harder things before, haven't you?",
    "That {emotion} is shouting right now, but it's not the whole truth. Take a deep breath. What would you say to a friend thinking this?",
];

static HUMOR_LOW: [&str; 3] = [
    "Okay but... your brain really said 'let me feel *all* the {emotion} today'? 😅 Honestly, same. Emotions can be drama queens sometimes.",
    "Plot twist: what if this {emotion} is just your inner drama director yelling 'Action!' again? Maybe give them a coffee and tell them to chill. ☕️",
    "Your {emotion} deserves an Oscar for Most Dramatic Performance. 🏆 Should we name the production? The Spiral Saga?",
];

static HUMOR_HIGH: [&str; 3] = [
    "Breaking news: local brain declares national {emotion} emergency! 🗞️ No survivors... except you, because you're strong and slightly sarcastic. You got this.",
    "Your {emotion} just wrote a full-on Netflix drama. Season 2 pending. But maybe you can take back the director's chair today. 🎬",
    "Okay, this {emotion} is working *overtime*. Someone give it a lunch break. You, on the other hand, deserve peace... and probably a cookie. 🍪",
];

static DISTRACTION_LOW: [&str; 3] = [
    "Let's take a little break from this {emotion}. What's something small that brought you even 2% joy this week?",
    "Your {emotion} might just need a pause, not a solution. So, tell me: what's your comfort food? Or the last movie that made you laugh out loud?",
    "Mental reset time: what's something unrelated to this {emotion}? Maybe a silly childhood memory? Something that reminds you who you are beyond the spiral?",
];

static DISTRACTION_HIGH: [&str; 3] = [
    "EMERGENCY DISTRACTION 🚨 Your {emotion} is looping. Name 5 things you can see, 4 you can touch, 3 you can hear... you know the drill. Ground yourself.",
    "Your {emotion} is like a playlist on repeat. Let's skip to a better track: tell me your favorite feel-good memory or comfort series to binge.",
    "Spiral interrupt in progress! 🛑 What's a place you dream of visiting? Let's talk about that instead. Sometimes the brain just needs new scenery, even imaginary.",
];

/// The three templates for a base tone and intensity bucket.
///
/// High bucket means spiral level at or above [`HIGH_SPIRAL_THRESHOLD`].
/// `MirrorMe` must be resolved to a base tone before lookup; if it leaks
/// through, a warning is logged and the validation bucket is used.
pub fn templates_for(mode: ResponseMode, spiral_level: i64) -> &'static [&'static str; 3] {
    let high = spiral_level >= HIGH_SPIRAL_THRESHOLD;
    match (mode, high) {
        (ResponseMode::Validation, false) => &VALIDATION_LOW,
        (ResponseMode::Validation, true) => &VALIDATION_HIGH,
        (ResponseMode::ToughLove, false) => &TOUGH_LOVE_LOW,
        (ResponseMode::ToughLove, true) => &TOUGH_LOVE_HIGH,
        (ResponseMode::Humor, false) => &HUMOR_LOW,
        (ResponseMode::Humor, true) => &HUMOR_HIGH,
        (ResponseMode::Distraction, false) => &DISTRACTION_LOW,
        (ResponseMode::Distraction, true) => &DISTRACTION_HIGH,
        (ResponseMode::MirrorMe, false) => {
            tracing::warn!("mirror_me reached template lookup unresolved");
            &VALIDATION_LOW
        }
        (ResponseMode::MirrorMe, true) => {
            tracing::warn!("mirror_me reached template lookup unresolved");
            &VALIDATION_HIGH
        }
    }
}

/// Pick one template for the bucket and interpolate the emotion label.
pub fn pick<R: Rng + ?Sized>(
    mode: ResponseMode,
    spiral_level: i64,
    emotion: &str,
    rng: &mut R,
) -> String {
    let templates = templates_for(mode, spiral_level);
    let template = templates.choose(rng).copied().unwrap_or(templates[0]);
    template.replace("{emotion}", emotion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_template_has_emotion_placeholder() {
        for mode in ResponseMode::BASE {
            for level in [1, 10] {
                for template in templates_for(mode, level) {
                    assert!(
                        template.contains("{emotion}"),
                        "missing placeholder in {mode}/{level}: {template}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bucket_boundary_at_threshold() {
        assert_eq!(
            templates_for(ResponseMode::Humor, 5) as *const _,
            &HUMOR_LOW as *const _
        );
        assert_eq!(
            templates_for(ResponseMode::Humor, 6) as *const _,
            &HUMOR_HIGH as *const _
        );
    }

    #[test]
    fn test_unresolved_mirror_falls_back_to_validation() {
        assert_eq!(
            templates_for(ResponseMode::MirrorMe, 3) as *const _,
            &VALIDATION_LOW as *const _
        );
        assert_eq!(
            templates_for(ResponseMode::MirrorMe, 8) as *const _,
            &VALIDATION_HIGH as *const _
        );
    }

    #[test]
    fn test_pick_interpolates_emotion() {
        let mut rng = StdRng::seed_from_u64(1);
        let response = pick(ResponseMode::Validation, 8, "sadness", &mut rng);
        assert!(response.contains("sadness"));
        assert!(!response.contains("{emotion}"));
    }

    #[test]
    fn test_pick_comes_from_bucket() {
        let mut rng = StdRng::seed_from_u64(1);
        let response = pick(ResponseMode::Distraction, 9, "fear", &mut rng);
        assert!(DISTRACTION_HIGH
            .iter()
            .any(|t| t.replace("{emotion}", "fear") == response));
    }

    #[test]
    fn test_pick_deterministic_with_seed() {
        let a = pick(ResponseMode::Humor, 3, "anger", &mut StdRng::seed_from_u64(5));
        let b = pick(ResponseMode::Humor, 3, "anger", &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
