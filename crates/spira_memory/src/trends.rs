//! Read-side trend aggregation over the journal.
//!
//! No caching: every invocation re-scans the qualifying subset. At journal
//! scale (one table, one user) this is fine.

use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};
use spira_core::{EmotionVector, JournalEntry, JournalStore, SpiralPattern, TIMESTAMP_FORMAT};
use std::collections::BTreeMap;

/// When and how the user tends to spiral hardest.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralHotspot {
    /// Most frequent hour-of-day among high-spiral entries.
    pub hour: u32,
    /// Most frequent weekday name ("Monday", ...).
    pub day: String,
    /// Most frequent dominant emotion, if any entry carried a parseable vector.
    pub emotion: Option<String>,
}

/// Correlate high-intensity entries with time of day and day of week.
///
/// Returns `None` when no entry reaches the high-spiral threshold, which the
/// caller should surface as "insufficient data".
pub async fn spiral_hotspot(store: &dyn JournalStore) -> Result<Option<SpiralHotspot>> {
    let entries = store.high_spiral_entries().await?;
    Ok(hotspot_from(&entries))
}

fn hotspot_from(entries: &[JournalEntry]) -> Option<SpiralHotspot> {
    let mut hours: BTreeMap<u32, usize> = BTreeMap::new();
    let mut days: BTreeMap<String, usize> = BTreeMap::new();
    let mut emotions: BTreeMap<String, usize> = BTreeMap::new();

    for entry in entries {
        let Ok(dt) = NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT) else {
            tracing::warn!("Skipping entry with unparseable timestamp: {}", entry.timestamp);
            continue;
        };
        *hours.entry(dt.hour()).or_default() += 1;
        *days.entry(dt.format("%A").to_string()).or_default() += 1;
        if let Ok(vector) = EmotionVector::from_json(&entry.emotion) {
            *emotions.entry(vector.dominant().to_string()).or_default() += 1;
        }
    }

    let hour = most_common(&hours)?;
    let day = most_common(&days)?;
    Some(SpiralHotspot {
        hour,
        day,
        emotion: most_common(&emotions),
    })
}

/// Key with the highest count; ties resolve to the smallest key so results
/// are stable across runs.
fn most_common<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Option<K> {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(k, _)| k.clone())
}

/// Summary statistics over the full journal, for the trends report.
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub total_entries: usize,
    pub average_spiral: f64,
    pub most_common_mood: String,
    pub most_common_pattern: SpiralPattern,
    pub mood_counts: BTreeMap<String, usize>,
    pub pattern_counts: BTreeMap<String, usize>,
    /// Weekday with the highest average spiral level.
    pub worst_day: Option<String>,
    /// Hour-of-day with the highest average spiral level.
    pub worst_hour: Option<u32>,
}

impl TrendReport {
    /// Build the report over all entries; `None` when the journal is empty.
    pub fn build(entries: &[JournalEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let total_entries = entries.len();
        let average_spiral =
            entries.iter().map(|e| e.spiral_level as f64).sum::<f64>() / total_entries as f64;

        let mut mood_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut pattern_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut day_levels: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut hour_levels: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

        for entry in entries {
            *mood_counts.entry(entry.mood.clone()).or_default() += 1;
            *pattern_counts
                .entry(entry.pattern.as_label().to_string())
                .or_default() += 1;

            if let Ok(dt) = NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT) {
                let day = day_levels.entry(dt.format("%A").to_string()).or_default();
                day.0 += entry.spiral_level as f64;
                day.1 += 1;
                let hour = hour_levels.entry(dt.hour()).or_default();
                hour.0 += entry.spiral_level as f64;
                hour.1 += 1;
            }
        }

        let most_common_mood = most_common(&mood_counts).unwrap_or_default();
        let most_common_pattern = most_common(&pattern_counts)
            .and_then(|label| label.parse().ok())
            .unwrap_or(SpiralPattern::NormalReflection);

        Some(Self {
            total_entries,
            average_spiral,
            most_common_mood,
            most_common_pattern,
            mood_counts,
            pattern_counts,
            worst_day: highest_average(&day_levels),
            worst_hour: highest_average(&hour_levels),
        })
    }
}

fn highest_average<K: Ord + Clone>(sums: &BTreeMap<K, (f64, usize)>) -> Option<K> {
    sums.iter()
        .filter(|(_, (_, n))| *n > 0)
        .max_by(|a, b| {
            let avg_a = a.1 .0 / a.1 .1 as f64;
            let avg_b = b.1 .0 / b.1 .1 as f64;
            avg_a
                .partial_cmp(&avg_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(a.0))
        })
        .map(|(k, _)| k.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spira_core::ResponseMode;

    fn entry(timestamp: &str, level: i64, emotion_json: &str) -> JournalEntry {
        JournalEntry {
            timestamp: timestamp.to_string(),
            input_text: "test".to_string(),
            mood: "🌼 Neutral".to_string(),
            spiral_level: level,
            pattern: SpiralPattern::Rumination,
            emotion: emotion_json.to_string(),
            response_type: ResponseMode::Validation,
        }
    }

    #[test]
    fn test_hotspot_empty_is_none() {
        assert_eq!(hotspot_from(&[]), None);
    }

    #[test]
    fn test_hotspot_counts_most_frequent() {
        let fearful = r#"{"joy":0.0,"sadness":0.0,"anger":0.0,"fear":1.0,"guilt":0.0}"#;
        let entries = vec![
            // Two Mondays at 22:00, one Tuesday at 09:00.
            entry("2026-08-17 22:10", 8, fearful),
            entry("2026-08-10 22:45", 7, fearful),
            entry("2026-08-11 09:00", 9, "not json"),
        ];
        let hotspot = hotspot_from(&entries).unwrap();
        assert_eq!(hotspot.hour, 22);
        assert_eq!(hotspot.day, "Monday");
        assert_eq!(hotspot.emotion.as_deref(), Some("fear"));
    }

    #[test]
    fn test_hotspot_without_vectors_has_no_emotion() {
        let entries = vec![entry("2026-08-17 22:10", 8, "")];
        let hotspot = hotspot_from(&entries).unwrap();
        assert_eq!(hotspot.emotion, None);
    }

    #[test]
    fn test_hotspot_skips_bad_timestamps() {
        let entries = vec![entry("not a timestamp", 8, "")];
        assert_eq!(hotspot_from(&entries), None);
    }

    #[test]
    fn test_most_common_tie_breaks_to_smallest_key() {
        let mut counts = BTreeMap::new();
        counts.insert(9u32, 2);
        counts.insert(3u32, 2);
        assert_eq!(most_common(&counts), Some(3));
    }

    #[test]
    fn test_report_empty_is_none() {
        assert!(TrendReport::build(&[]).is_none());
    }

    #[test]
    fn test_report_averages_and_modes() {
        let entries = vec![
            entry("2026-08-17 22:10", 8, ""),
            entry("2026-08-18 09:00", 2, ""),
        ];
        let report = TrendReport::build(&entries).unwrap();
        assert_eq!(report.total_entries, 2);
        assert!((report.average_spiral - 5.0).abs() < 1e-9);
        assert_eq!(report.most_common_pattern, SpiralPattern::Rumination);
        assert_eq!(report.worst_day.as_deref(), Some("Monday"));
        assert_eq!(report.worst_hour, Some(22));
    }
}
