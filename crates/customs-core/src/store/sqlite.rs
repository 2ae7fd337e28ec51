//! SQLite-backed draft store.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{DocumentStatus, DocumentSummary, DraftStore, Result, StoredDocument};
use crate::error::StoreError;

/// Draft store keeping one row per document, draft body as JSON.
pub struct SqliteDraftStore {
    conn: Connection,
}

impl SqliteDraftStore {
    /// Open (or create) a store at the given database path.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Open a throwaway in-memory store.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                type TEXT NOT NULL,
                customer TEXT,
                date TEXT,
                status TEXT,
                data JSON,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_updated_at ON documents(updated_at)",
            [],
        )?;

        info!("Draft store initialized");
        Ok(Self { conn })
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(id: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidData {
            id: id.to_string(),
            reason: format!("bad updated_at {:?}: {}", value, e),
        })
}

impl DraftStore for SqliteDraftStore {
    fn upsert(&self, document: &StoredDocument) -> Result<()> {
        let data = serde_json::to_string(&document.data).map_err(|e| StoreError::InvalidData {
            id: document.id.clone(),
            reason: e.to_string(),
        })?;
        let now = now_timestamp();

        self.conn.execute(
            "INSERT INTO documents (id, type, customer, date, status, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             ON CONFLICT(id) DO UPDATE SET
                type = excluded.type,
                customer = excluded.customer,
                date = excluded.date,
                status = excluded.status,
                data = excluded.data,
                updated_at = excluded.updated_at",
            params![
                document.id,
                document.doc_type,
                document.customer,
                document.date,
                document.status.as_str(),
                data,
                now,
            ],
        )?;

        debug!("Saved document {}", document.id);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<StoredDocument> {
        let row = self
            .conn
            .query_row(
                "SELECT id, type, customer, date, status, data, updated_at
                 FROM documents WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let (id, doc_type, customer, date, status, data, updated_at) =
            row.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let data = match data {
            Some(json) => serde_json::from_str(&json).map_err(|e| StoreError::InvalidData {
                id: id.clone(),
                reason: e.to_string(),
            })?,
            None => Default::default(),
        };
        let updated_at = parse_timestamp(&id, &updated_at)?;

        Ok(StoredDocument {
            id,
            doc_type,
            customer: customer.unwrap_or_default(),
            date: date.unwrap_or_default(),
            status: DocumentStatus::parse_lossy(status.as_deref().unwrap_or_default()),
            data,
            updated_at: Some(updated_at),
        })
    }

    fn list(&self) -> Result<Vec<DocumentSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, type, customer, date, status, updated_at
             FROM documents ORDER BY updated_at DESC, rowid DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (id, doc_type, customer, date, status, updated_at) = row?;
            let updated_at = parse_timestamp(&id, &updated_at)?;
            summaries.push(DocumentSummary {
                id,
                doc_type,
                customer: customer.unwrap_or_default(),
                date: date.unwrap_or_default(),
                status: DocumentStatus::parse_lossy(status.as_deref().unwrap_or_default()),
                updated_at,
            });
        }

        Ok(summaries)
    }
}
