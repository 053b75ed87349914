// Document collections - one SQLite table per entity, JSON body per row
use std::marker::PhantomData;

use rusqlite::{
    params, Connection, ErrorCode, OptionalExtension, Transaction, TransactionBehavior,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid field name: {0}")]
    InvalidField(String),
}

impl StoreError {
    /// A UNIQUE (or other) constraint rejected the write.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Sql(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation
        )
    }
}

/// A record stored as a JSON document in its own collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Table backing the collection.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);
}

/// Generate a fresh document identifier.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

pub struct Collection<T> {
    pool: DbPool,
    _doc: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _doc: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _doc: PhantomData,
        }
    }

    /// All documents in insertion order.
    pub fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT doc FROM {} ORDER BY rowid",
            T::COLLECTION
        ))?;

        let docs: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        docs.iter()
            .map(|json| serde_json::from_str(json).map_err(StoreError::from))
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let conn = self.pool.get()?;
        self.find_by_id_on(&conn, id)
    }

    /// `find_by_id` on a caller-held connection or transaction.
    pub fn find_by_id_on(&self, conn: &Connection, id: &str) -> Result<Option<T>, StoreError> {
        let json: Option<String> = conn
            .query_row(
                &format!("SELECT doc FROM {} WHERE id = ?1", T::COLLECTION),
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn exists_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            &format!("SELECT COUNT(*) > 0 FROM {} WHERE id = ?1", T::COLLECTION),
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    /// Documents whose top-level `field` equals `value`, in insertion order.
    pub fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StoreError::InvalidField(field.to_string()));
        }

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT doc FROM {} WHERE json_extract(doc, '$.{}') = ?1 ORDER BY rowid",
            T::COLLECTION,
            field
        ))?;

        let docs: Vec<String> = stmt
            .query_map(params![value], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        docs.iter()
            .map(|json| serde_json::from_str(json).map_err(StoreError::from))
            .collect()
    }

    /// Insert or fully overwrite a document. A document without an id gets a
    /// fresh one.
    pub fn save(&self, doc: &mut T) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        self.save_on(&conn, doc)
    }

    /// `save` on a caller-held connection or transaction.
    pub fn save_on(&self, conn: &Connection, doc: &mut T) -> Result<(), StoreError> {
        let id = match doc.id() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = new_id();
                doc.set_id(id.clone());
                id
            }
        };

        let json = serde_json::to_string(doc)?;

        conn.execute(
            &format!(
                "INSERT INTO {} (id, doc, updated_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(id) DO UPDATE SET
                   doc = excluded.doc,
                   updated_at = excluded.updated_at",
                T::COLLECTION
            ),
            params![id, json],
        )?;

        Ok(())
    }

    /// Run `f` inside a `BEGIN IMMEDIATE` transaction. Commits when `f`
    /// returns `Ok`, rolls back otherwise.
    pub fn transaction<R, E>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut conn = self.pool.get().map_err(StoreError::from)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;

        let result = f(&tx)?;
        tx.commit().map_err(StoreError::from)?;
        Ok(result)
    }

    /// Returns whether a document was removed. Missing ids are not an error.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;

        let rows = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", T::COLLECTION),
            params![id],
        )?;

        Ok(rows > 0)
    }
}
