//! SQLite-backed key-value store over the `kv_entries` table.
//!
//! # Invariants
//! - The connection must come from [`crate::db::open_db`] or
//!   [`crate::db::open_db_in_memory`] so `kv_entries` exists.
//! - `set` is an upsert and bumps `updated_at`.

use super::{check_quota, KeyValueStore, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
    quota_bytes: Option<usize>,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    fn bytes_excluding(&self, key: &str) -> StorageResult<usize> {
        let bytes: i64 = self.conn.query_row(
            "SELECT COALESCE(
                SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))),
                0
             )
             FROM kv_entries
             WHERE key <> ?1;",
            [key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(bytes).unwrap_or(0))
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.quota_bytes.is_some() {
            check_quota(self.quota_bytes, self.bytes_excluding(key)?, key, value)?;
        }

        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}
