//! SQLite-based content cache keyed by feature name
//!
//! Each feature owns one row holding the serialized payload and the epoch-ms
//! timestamp it was stored at. Value and timestamp live in the same row, so a
//! `put` or `clear` is atomic for its key and the two can never drift apart.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheTtl;
use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

type Result<T> = std::result::Result<T, CacheError>;

/// SQLite-backed cache of JSON content with a wall-clock TTL
pub struct CacheStorage {
    conn: Connection,
}

impl CacheStorage {
    /// Open or create cache storage at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/guardop on Linux/macOS)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("guardop"))
    }

    /// Open cache storage at a specific directory (for testing)
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        // cached_at is an epoch-millisecond string. An unparsable timestamp
        // is treated as "no cache" rather than an error.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS content_cache (
                feature TEXT PRIMARY KEY NOT NULL,
                content TEXT NOT NULL,
                cached_at TEXT NOT NULL
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Check whether a stored entry exists and is younger than `ttl`.
    ///
    /// Valid for any query time in `[stored, stored + ttl)`, invalid at and
    /// after `stored + ttl`.
    pub fn is_valid(&self, feature: &str, ttl: Duration) -> bool {
        self.is_valid_at(feature, ttl, Utc::now().timestamp_millis())
    }

    /// TTL check against an explicit clock, used to pin boundary behavior
    /// down in tests.
    pub fn is_valid_at(&self, feature: &str, ttl: Duration, now_ms: i64) -> bool {
        match self.stored_at(feature) {
            Some(stored_ms) => now_ms.saturating_sub(stored_ms) < ttl.as_millis() as i64,
            None => false,
        }
    }

    /// Epoch-ms timestamp of the stored entry, if present and parsable
    pub fn stored_at(&self, feature: &str) -> Option<i64> {
        let raw: String = self
            .conn
            .query_row(
                "SELECT cached_at FROM content_cache WHERE feature = ?1",
                [feature],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()?;

        match raw.parse::<i64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                log::warn!("Discarding cache entry '{}' with bad timestamp", feature);
                let _ = self
                    .conn
                    .execute("DELETE FROM content_cache WHERE feature = ?1", [feature]);
                None
            }
        }
    }

    /// Get cached content if present, unexpired, and deserializable.
    ///
    /// Malformed payloads are a miss, not an error; the row is discarded so
    /// the next load refetches.
    pub fn get<T: DeserializeOwned>(&self, feature: &str, ttl: Duration) -> Option<T> {
        if !self.is_valid(feature, ttl) {
            return None;
        }

        let raw: String = self
            .conn
            .query_row(
                "SELECT content FROM content_cache WHERE feature = ?1",
                [feature],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Discarding malformed cache entry '{}': {}", feature, e);
                let _ = self
                    .conn
                    .execute("DELETE FROM content_cache WHERE feature = ?1", [feature]);
                None
            }
        }
    }

    /// Store content with the current timestamp, replacing any prior entry
    pub fn put<T: Serialize>(&self, feature: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| CacheError::Io(format!("Failed to serialize content: {}", e)))?;
        let now_ms = Utc::now().timestamp_millis();

        self.conn.execute(
            "INSERT OR REPLACE INTO content_cache (feature, content, cached_at)
             VALUES (?1, ?2, ?3)",
            params![feature, json, now_ms.to_string()],
        )?;
        Ok(())
    }

    /// Remove the listed entries unconditionally, expired or not
    pub fn clear(&self, features: &[&str]) -> Result<usize> {
        let mut removed = 0;
        for feature in features {
            removed += self
                .conn
                .execute("DELETE FROM content_cache WHERE feature = ?1", [feature])?;
        }
        Ok(removed)
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM content_cache", [], |r| r.get(0))?;

        self.conn.execute("DELETE FROM content_cache", [])?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    /// Get cache statistics, judging validity by each feature's own TTL
    pub fn stats(&self) -> Result<CacheStats> {
        let now_ms = Utc::now().timestamp_millis();

        let mut stmt = self
            .conn
            .prepare("SELECT feature, cached_at FROM content_cache")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut total = 0usize;
        let mut valid = 0usize;
        let mut oldest: Option<i64> = None;
        let mut newest: Option<i64> = None;

        for row in rows {
            let (feature, raw_ts) = row?;
            total += 1;

            let Ok(stored_ms) = raw_ts.parse::<i64>() else {
                continue;
            };

            let ttl = CacheTtl::for_feature(&feature);
            if now_ms.saturating_sub(stored_ms) < ttl.as_millis() as i64 {
                valid += 1;
                oldest = Some(oldest.map_or(stored_ms, |o| o.min(stored_ms)));
                newest = Some(newest.map_or(stored_ms, |n| n.max(stored_ms)));
            }
        }

        Ok(CacheStats {
            total_entries: total,
            valid_entries: valid,
            expired_entries: total - valid,
            oldest_entry_ms: oldest,
            newest_entry_ms: newest,
        })
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub oldest_entry_ms: Option<i64>,
    pub newest_entry_ms: Option<i64>,
}
