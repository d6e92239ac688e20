// PostgreSQL-backed record store
//
// Each call checks a client out of the shared pool, so concurrent requests
// run their statements on separate connections.

use super::queries;
use super::BookStore;
use crate::error::AppError;
use crate::models::{NewRecord, Record};
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::debug;

// Record store over a deadpool-postgres pool
pub struct PgBookStore {
    pool: Pool,
}

impl PgBookStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl TryFrom<&Row> for Record {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Record {
            id: row.try_get("id")?,
            ques: row.try_get("ques")?,
            ans: row.try_get("ans")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create_table(&self) -> Result<(), AppError> {
        let client = self.pool.get().await?;
        client.batch_execute(queries::CREATE_TABLE).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Record>, AppError> {
        let client = self.pool.get().await?;
        let rows = client.query(queries::SELECT_ALL, &[]).await?;

        rows.iter().map(Record::try_from).collect()
    }

    async fn insert(&self, record: &NewRecord) -> Result<i32, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(queries::INSERT, &[&record.ques, &record.ans])
            .await?;

        let id: i32 = row.try_get("id")?;
        debug!("Inserted record {}", id);
        Ok(id)
    }

    async fn update(&self, id: i32, record: &NewRecord) -> Result<u64, AppError> {
        let client = self.pool.get().await?;
        let affected = client
            .execute(queries::UPDATE, &[&record.ques, &record.ans, &id])
            .await?;

        debug!("Update of record {} affected {} row(s)", id, affected);
        Ok(affected)
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let client = self.pool.get().await?;
        let affected = client.execute(queries::DELETE, &[&id]).await?;

        debug!("Delete of record {} affected {} row(s)", id, affected);
        Ok(affected)
    }

    async fn table_ready(&self) -> Result<(), AppError> {
        let client = self.pool.get().await?;
        client.query(queries::TABLE_READY, &[]).await?;
        Ok(())
    }
}
