//! Per-entry processing pipeline.
//!
//! One submission flows classify → score → mood → emotion vector → tone
//! resolution → template → persist → trend check, synchronously within one
//! call. Model failures degrade to local heuristics; only the database can
//! fail the call.

use crate::mirror::resolve_mode;
use crate::session::SessionContext;
use crate::templates;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spira_core::{
    mood_label, spiral_level, EmotionVector, JournalEntry, JournalStore, PatternDetector,
    ResponseMode, ZeroShotClassifier,
};
use spira_memory::{spiral_hotspot, SpiralHotspot};
use std::sync::Arc;

/// Shown by callers when processing itself errors out.
pub const FALLBACK_RESPONSE: &str =
    "I'm here for you. Whatever you're feeling is valid. Try taking three deep breaths with me?";

/// Everything one processed submission produced.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub entry: JournalEntry,
    pub response: String,
    pub pattern_confidence: f32,
    pub dominant_emotion: String,
    pub emotion_confidence: f32,
    /// Present once enough high-spiral history exists to correlate.
    pub hotspot: Option<SpiralHotspot>,
}

pub struct CompanionEngine {
    store: Arc<dyn JournalStore>,
    detector: PatternDetector,
    session: SessionContext,
    rng: StdRng,
}

impl CompanionEngine {
    /// Open an engine over the store, rebuilding the session from the most
    /// recent `history_limit` persisted entries.
    pub async fn new(
        store: Arc<dyn JournalStore>,
        classifier: Option<Arc<dyn ZeroShotClassifier>>,
        mode: ResponseMode,
        history_limit: u32,
    ) -> Result<Self> {
        let session = SessionContext::restore(store.as_ref(), mode, history_limit).await?;
        tracing::info!(
            "Session restored: {} entries, mode={}",
            session.len(),
            session.mode()
        );
        Ok(Self {
            store,
            detector: PatternDetector::new(classifier),
            session,
            rng: StdRng::from_entropy(),
        })
    }

    /// Fix the randomness source so mood and template choices are repeatable.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn set_mode(&mut self, mode: ResponseMode) {
        self.session.set_mode(mode);
    }

    /// Process one reflection end to end.
    pub async fn process(&mut self, text: &str) -> Result<EntryOutcome> {
        let text = text.trim();
        anyhow::ensure!(!text.is_empty(), "nothing to process: empty input");

        let matched = self.detector.detect(text).await;
        let level = spiral_level(text);
        let mood = mood_label(text, &mut self.rng).to_string();
        let vector = EmotionVector::from_text(text);

        let resolved = resolve_mode(self.session.mode(), self.session.items());
        let (dominant_emotion, emotion_confidence) = self.detector.classify_emotion(text).await;
        let response = templates::pick(resolved, level, &dominant_emotion, &mut self.rng);

        let entry = JournalEntry {
            timestamp: JournalEntry::now_timestamp(),
            input_text: text.to_string(),
            mood,
            spiral_level: level,
            pattern: matched.pattern,
            emotion: vector.to_json()?,
            response_type: resolved,
        };

        self.store.append(&entry).await?;
        self.session.push(entry.clone(), response.clone());

        // The trend check is advisory; a read failure after a successful
        // write must not fail the whole interaction.
        let hotspot = match spiral_hotspot(self.store.as_ref()).await {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!("Trend check failed: {}", e);
                None
            }
        };

        tracing::debug!(
            "Processed entry: pattern={} level={} tone={}",
            entry.pattern,
            entry.spiral_level,
            entry.response_type
        );

        Ok(EntryOutcome {
            entry,
            response,
            pattern_confidence: matched.confidence,
            dominant_emotion,
            emotion_confidence,
            hotspot,
        })
    }
}
