//! SQLite-backed result store: scored results and verbatim raw log uploads.
//! Ids and creation timestamps are generated here, not by the scoring core.

use crate::scoring::{ScoredResult, Verdict};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;

/// One persisted result row, as returned by the results listing.
#[derive(Debug, Clone, Serialize)]
pub struct StoredResult {
    pub id: i64,
    pub prediction: i64,
    pub confidence: f64,
    pub created_at: String,
}

pub struct ResultStore {
    conn: Mutex<Connection>,
}

impl ResultStore {
    /// Open or create the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                prediction INTEGER NOT NULL,
                confidence REAL NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS raw_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                log_data TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Persist one scored result; returns its generated id.
    pub fn save_result(&self, result: &ScoredResult) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO results (prediction, confidence) VALUES (?1, ?2)",
            params![result.prediction.code(), result.confidence],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Count stored results carrying the given verdict.
    pub fn count_where(&self, verdict: Verdict) -> Result<u64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM results WHERE prediction = ?1",
            params![verdict.code()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// All stored results in insertion order.
    pub fn list_results(&self) -> Result<Vec<StoredResult>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, prediction, confidence, created_at FROM results ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredResult {
                id: row.get(0)?,
                prediction: row.get(1)?,
                confidence: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    /// Persist a raw log payload verbatim; returns its generated id.
    pub fn save_raw_log(&self, payload: &str) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO raw_logs (log_data) VALUES (?1)",
            params![payload],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
