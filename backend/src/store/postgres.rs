use std::{str::FromStr, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use uuid::Uuid;

use super::{Document, DocumentStore};
use crate::{config::Config, error::Result};

/// Opens the process-wide pool and brings the schema up to date.
pub async fn connect(cfg: &Config) -> anyhow::Result<PgPool> {
    let mut options = PgConnectOptions::from_str(&cfg.database_url)
        .context("DATABASE_URL is not a valid Postgres connection string")?;
    if let Some(name) = &cfg.database_name {
        options = options.database(name);
    }

    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .context("Failed to connect to the document store")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    Ok(pool)
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Document>> {
        let rows: Vec<(Uuid, Value)> = sqlx::query_as(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            "#,
        )
        .bind(collection)
        .bind(filter)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, body)| Document { id, body })
            .collect())
    }

    async fn find_one(&self, collection: &str, id: Uuid) -> Result<Option<Document>> {
        let row: Option<(Uuid, Value)> =
            sqlx::query_as("SELECT id, body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, body)| Document { id, body }))
    }

    async fn insert_one(&self, collection: &str, body: Value) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(&body)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn replace_one(
        &self,
        collection: &str,
        id: Uuid,
        body: Value,
    ) -> Result<Option<Document>> {
        let row: Option<(Uuid, Value)> = sqlx::query_as(
            r#"
            UPDATE documents
            SET body       = $3,
                updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(&body)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, body)| Document { id, body }))
    }

    async fn delete_one(&self, collection: &str, id: Uuid) -> Result<bool> {
        let rows_affected = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
