use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{LectorError, Result};
use crate::domain::{VocabularyStats, WordRecord};
use crate::store::WordStore;

const WORD_COLUMNS: &str = "word, translate, transcript, trained, trained_at";

/// SQLite-backed word collection.
///
/// Several collections can share one database file; every query is scoped
/// to `collection`.
pub struct SqliteWordStore {
    conn: Mutex<Connection>,
    collection: String,
}

impl SqliteWordStore {
    pub fn open<P: AsRef<Path>>(path: P, collection: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, collection)
    }

    pub fn in_memory(collection: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, collection)
    }

    fn with_connection(conn: Connection, collection: &str) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
            collection: collection.to_string(),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-words/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| LectorError::Migration(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| LectorError::Other(e.to_string()))
    }

    /// Inserts or refreshes a word. Used for seeding; existing training
    /// state is left alone on conflict.
    pub fn insert_word(&self, record: &WordRecord) -> Result<()> {
        let conn = self.lock()?;

        let trained_at = if record.trained {
            Some(record.trained_at.unwrap_or_else(Utc::now).to_rfc3339())
        } else {
            None
        };

        conn.execute(
            "INSERT INTO words (collection, word, translate, transcript, trained, trained_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(collection, word) DO UPDATE
             SET translate = excluded.translate, transcript = excluded.transcript",
            params![
                self.collection,
                record.word,
                record.translate,
                record.transcript,
                record.trained as i32,
                trained_at
            ],
        )?;

        Ok(())
    }

    /// Closes the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|e| LectorError::Other(e.to_string()))?;
        conn.close().map_err(|(_, e)| LectorError::Database(e))
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn map_word(row: &Row<'_>) -> rusqlite::Result<WordRecord> {
        let trained = row.get::<_, i32>(3)? != 0;
        Ok(WordRecord {
            word: row.get(0)?,
            translate: row.get(1)?,
            transcript: row.get(2)?,
            trained,
            trained_at: row
                .get::<_, Option<String>>(4)?
                .and_then(|s| Self::parse_datetime(&s))
                .filter(|_| trained),
        })
    }

    fn query_words(&self, sql: &str, limit: usize, extra: Option<i32>) -> Result<Vec<WordRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = match extra {
            Some(trained) => stmt.query_map(params![self.collection, limit, trained], Self::map_word)?,
            None => stmt.query_map(params![self.collection, limit], Self::map_word)?,
        };

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

impl WordStore for SqliteWordStore {
    fn sample_random(&self, count: usize, trained_only: bool) -> Result<Vec<WordRecord>> {
        if trained_only {
            self.query_words(
                &format!(
                    "SELECT {WORD_COLUMNS} FROM words
                     WHERE collection = ?1 AND trained = ?3
                     ORDER BY RANDOM() LIMIT ?2"
                ),
                count,
                Some(1),
            )
        } else {
            self.query_words(
                &format!(
                    "SELECT {WORD_COLUMNS} FROM words
                     WHERE collection = ?1
                     ORDER BY RANDOM() LIMIT ?2"
                ),
                count,
                None,
            )
        }
    }

    fn untrained_words(&self, count: usize) -> Result<Vec<WordRecord>> {
        self.query_words(
            &format!(
                "SELECT {WORD_COLUMNS} FROM words
                 WHERE collection = ?1 AND trained = ?3
                 ORDER BY rowid LIMIT ?2"
            ),
            count,
            Some(0),
        )
    }

    fn mark_trained(&self, word: &str) -> Result<bool> {
        let conn = self.lock()?;

        let changed = conn.execute(
            "UPDATE words SET trained = 1, trained_at = ?1
             WHERE collection = ?2 AND word = ?3 AND trained = 0",
            params![Utc::now().to_rfc3339(), self.collection, word],
        )?;

        Ok(changed > 0)
    }

    fn find_word(&self, word: &str) -> Result<Option<WordRecord>> {
        let conn = self.lock()?;

        let result = conn
            .query_row(
                &format!("SELECT {WORD_COLUMNS} FROM words WHERE collection = ?1 AND word = ?2"),
                params![self.collection, word],
                Self::map_word,
            )
            .optional()?;

        Ok(result)
    }

    fn stats(&self) -> Result<VocabularyStats> {
        let conn = self.lock()?;

        // One aggregate pass, so the counts come from the same snapshot.
        let (total, trained): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(trained != 0), 0) FROM words WHERE collection = ?1",
            params![self.collection],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(VocabularyStats::from_counts(
            u64::try_from(total).unwrap_or(0),
            u64::try_from(trained).unwrap_or(0),
        ))
    }
}
