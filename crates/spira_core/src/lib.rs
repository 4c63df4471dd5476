pub mod classify;
pub mod config;
pub mod emotion;
pub mod entry;
pub mod scoring;

pub use classify::{
    fallback_pattern, LabelScore, MockClassifier, PatternDetector, ZeroShotClassifier,
    EMOTION_LABELS, EMOTION_PLACEHOLDER, PATTERN_LABELS,
};
pub use config::SpiraConfig;
pub use emotion::{sentiment_polarity, EmotionVector};
pub use entry::{
    JournalEntry, ParseModeError, PatternMatch, ResponseMode, SpiralPattern,
    HIGH_SPIRAL_THRESHOLD, TIMESTAMP_FORMAT,
};
pub use scoring::{mood_label, spiral_level};

use async_trait::async_trait;

/// Append-only persistence for journal entries.
///
/// Entries are created on submission and never mutated; reads exist only for
/// session reconstruction and aggregate trend queries.
#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn append(&self, entry: &JournalEntry) -> anyhow::Result<()>;

    /// Most recent `limit` entries, returned oldest-first (chronological).
    async fn recent(&self, limit: u32) -> anyhow::Result<Vec<JournalEntry>>;

    /// Entries at or above [`HIGH_SPIRAL_THRESHOLD`].
    async fn high_spiral_entries(&self) -> anyhow::Result<Vec<JournalEntry>>;

    async fn all_entries(&self) -> anyhow::Result<Vec<JournalEntry>>;
}
