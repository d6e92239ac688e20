//! In-process record store with the same observable behavior as the
//! PostgreSQL one: the table must be created before use, ids come from a
//! sequence and are never reused.

use super::BookStore;
use crate::error::AppError;
use crate::models::{NewRecord, Record};
use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::PoolError;
use tokio::sync::RwLock;

struct Table {
    rows: Vec<Record>,
    next_id: i32,
}

#[derive(Default)]
pub struct MemoryBookStore {
    table: RwLock<Option<Table>>,
    broken: bool,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose table already exists
    pub async fn with_table() -> Self {
        let store = Self::new();
        store
            .create_table()
            .await
            .expect("in-memory table creation cannot fail");
        store
    }

    /// Store that rejects every call, table creation included
    pub fn failing() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// A missing table and a broken store both surface as an unavailable
    /// store; handlers only ever report them as a server error.
    fn unavailable() -> AppError {
        AppError::Pool(PoolError::Closed)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.broken {
            Err(Self::unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create_table(&self) -> Result<(), AppError> {
        self.check()?;
        let mut table = self.table.write().await;
        if table.is_none() {
            *table = Some(Table {
                rows: Vec::new(),
                next_id: 1,
            });
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Record>, AppError> {
        self.check()?;
        let table = self.table.read().await;
        let table = table.as_ref().ok_or_else(Self::unavailable)?;
        Ok(table.rows.clone())
    }

    async fn insert(&self, record: &NewRecord) -> Result<i32, AppError> {
        self.check()?;
        let mut table = self.table.write().await;
        let table = table.as_mut().ok_or_else(Self::unavailable)?;

        let id = table.next_id;
        table.next_id += 1;
        table.rows.push(Record {
            id,
            ques: Some(record.ques.clone()),
            ans: Some(record.ans.clone()),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn update(&self, id: i32, record: &NewRecord) -> Result<u64, AppError> {
        self.check()?;
        let mut table = self.table.write().await;
        let table = table.as_mut().ok_or_else(Self::unavailable)?;

        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|row| row.id == id) {
            row.ques = Some(record.ques.clone());
            row.ans = Some(record.ans.clone());
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        self.check()?;
        let mut table = self.table.write().await;
        let table = table.as_mut().ok_or_else(Self::unavailable)?;

        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn table_ready(&self) -> Result<(), AppError> {
        self.check()?;
        let table = self.table.read().await;
        table.as_ref().map(|_| ()).ok_or_else(Self::unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio_test::{assert_err, assert_ok};

    fn record(ques: &str, ans: &str) -> NewRecord {
        NewRecord {
            ques: ques.to_string(),
            ans: ans.to_string(),
        }
    }

    #[tokio::test]
    async fn test_requires_table() {
        let store = MemoryBookStore::new();
        assert_err!(store.list().await);
        assert_err!(store.insert(&record("q", "a")).await);
        assert_err!(store.table_ready().await);

        assert_ok!(store.create_table().await);
        assert_ok!(store.table_ready().await);
    }

    #[tokio::test]
    async fn test_failing_store_rejects_everything() {
        let store = MemoryBookStore::failing();
        assert_err!(store.create_table().await);
        assert_err!(store.list().await);
        assert_err!(store.update(1, &record("q", "a")).await);
        assert_err!(store.delete(1).await);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryBookStore::with_table().await;
        let first = store.insert(&record("q1", "a1")).await.unwrap();
        store.delete(first).await.unwrap();
        let second = store.insert(&record("q2", "a2")).await.unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[tokio::test]
    async fn test_update_and_delete_report_affected_rows() {
        let store = MemoryBookStore::with_table().await;
        let id = store.insert(&record("q", "a")).await.unwrap();

        assert_eq!(store.update(id, &record("q2", "a2")).await.unwrap(), 1);
        assert_eq!(store.update(id + 1, &record("q3", "a3")).await.unwrap(), 0);
        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert_eq!(store.delete(id).await.unwrap(), 0);
    }
}
