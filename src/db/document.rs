use crate::error::StoreError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;

pub const DOCUMENT_ID_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub collection: String,
    pub data: Value,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub name: String,
    pub documents: usize,
    pub updated_at: i64,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn generate_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LEN)
        .map(char::from)
        .collect()
}

fn check_collection(collection: &str) -> Result<(), StoreError> {
    if collection.trim().is_empty() {
        return Err(StoreError::EmptyCollection);
    }
    Ok(())
}

/// Add `data` to `collection` under a freshly generated id.
pub fn add_document(conn: &Connection, collection: &str, data: &Value) -> Result<String, StoreError> {
    let id = generate_document_id();
    set_document(conn, collection, &id, data)?;
    Ok(id)
}

/// Create or replace the document `id` in `collection`.
pub fn set_document(
    conn: &Connection,
    collection: &str,
    id: &str,
    data: &Value,
) -> Result<(), StoreError> {
    check_collection(collection)?;
    let json = serde_json::to_string(data)?;
    let timestamp = now();

    conn.execute(
        "INSERT INTO documents (collection, doc_id, data, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)
         ON CONFLICT (collection, doc_id) DO UPDATE SET data = ?3, updated_at = ?4",
        rusqlite::params![collection, id, json, timestamp],
    )?;
    Ok(())
}

pub fn get_document(
    conn: &Connection,
    collection: &str,
    id: &str,
) -> Result<Option<Document>, StoreError> {
    let row = conn
        .query_row(
            "SELECT doc_id, collection, data, created_at, updated_at
             FROM documents WHERE collection = ? AND doc_id = ?",
            [collection, id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            },
        )
        .optional()?;

    row.map(into_document).transpose()
}

/// Remove a document. Returns whether anything was deleted.
pub fn delete_document(conn: &Connection, collection: &str, id: &str) -> Result<bool, StoreError> {
    let removed = conn.execute(
        "DELETE FROM documents WHERE collection = ? AND doc_id = ?",
        [collection, id],
    )?;
    Ok(removed > 0)
}

/// Every document in `collection`, oldest first.
pub fn query_collection(conn: &Connection, collection: &str) -> Result<Vec<Document>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT doc_id, collection, data, created_at, updated_at
         FROM documents WHERE collection = ? ORDER BY seq",
    )?;

    let rows = stmt
        .query_map([collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter().map(into_document).collect()
}

pub fn list_collections(conn: &Connection) -> Result<Vec<CollectionSummary>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT collection, COUNT(*), MAX(updated_at)
         FROM documents GROUP BY collection ORDER BY collection",
    )?;

    let collections = stmt
        .query_map([], |row| {
            Ok(CollectionSummary {
                name: row.get(0)?,
                documents: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(collections)
}

fn into_document(
    (id, collection, data, created_at, updated_at): (String, String, String, i64, i64),
) -> Result<Document, StoreError> {
    Ok(Document {
        id,
        collection,
        data: serde_json::from_str(&data)?,
        created_at,
        updated_at,
    })
}
