//! SQLite-backed journal store.
//!
//! A single `journal` table holds every entry. The write and read paths share
//! this one schema; entries are append-only with no update or delete path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use spira_core::{
    JournalEntry, JournalStore, ResponseMode, SpiralPattern, HIGH_SPIRAL_THRESHOLD,
};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

#[derive(Clone)]
pub struct SqliteJournal {
    pool: Pool<Sqlite>,
}

impl SqliteJournal {
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory: {}", parent.display())
                })?;
            }
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.as_ref().display());
        let pool = SqlitePoolOptions::new()
            .connect(&db_url)
            .await
            .context("Failed to connect to SQLite database")?;

        let journal = Self { pool };
        journal.migrate().await?;
        Ok(journal)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS journal (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                input_text TEXT NOT NULL,
                mood TEXT NOT NULL,
                spiral_level INTEGER NOT NULL,
                pattern TEXT NOT NULL,
                emotion TEXT NOT NULL,
                response_type TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create journal table")?;

        // Trend queries filter on spiral_level on every invocation.
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_journal_spiral ON journal(spiral_level)")
            .execute(&self.pool)
            .await
            .context("Failed to create spiral_level index")?;

        Ok(())
    }

    fn row_to_entry(row: &SqliteRow) -> JournalEntry {
        let pattern: String = row.get("pattern");
        let response_type: String = row.get("response_type");
        JournalEntry {
            timestamp: row.get("timestamp"),
            input_text: row.get("input_text"),
            mood: row.get("mood"),
            spiral_level: row.get("spiral_level"),
            pattern: pattern
                .parse()
                .unwrap_or(SpiralPattern::NormalReflection),
            emotion: row.get("emotion"),
            response_type: response_type.parse().unwrap_or(ResponseMode::Validation),
        }
    }
}

#[async_trait]
impl JournalStore for SqliteJournal {
    async fn append(&self, entry: &JournalEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO journal (timestamp, input_text, mood, spiral_level, pattern, emotion, response_type)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.timestamp)
        .bind(&entry.input_text)
        .bind(&entry.mood)
        .bind(entry.spiral_level)
        .bind(entry.pattern.as_label())
        .bind(&entry.emotion)
        .bind(entry.response_type.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to insert journal entry")?;

        tracing::debug!(
            "Journal entry saved (level={}, pattern={})",
            entry.spiral_level,
            entry.pattern
        );
        Ok(())
    }

    async fn recent(&self, limit: u32) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            "SELECT timestamp, input_text, mood, spiral_level, pattern, emotion, response_type \
             FROM journal ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent journal entries")?;

        let mut entries: Vec<JournalEntry> = rows.iter().map(Self::row_to_entry).collect();
        // Chronological order for session reconstruction: oldest first.
        entries.reverse();
        Ok(entries)
    }

    async fn high_spiral_entries(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            "SELECT timestamp, input_text, mood, spiral_level, pattern, emotion, response_type \
             FROM journal WHERE spiral_level >= ? ORDER BY timestamp, id",
        )
        .bind(HIGH_SPIRAL_THRESHOLD)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch high-spiral entries")?;

        Ok(rows.iter().map(Self::row_to_entry).collect())
    }

    async fn all_entries(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            "SELECT timestamp, input_text, mood, spiral_level, pattern, emotion, response_type \
             FROM journal ORDER BY timestamp, id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch journal entries")?;

        Ok(rows.iter().map(Self::row_to_entry).collect())
    }
}
