pub mod operations;
pub mod schema;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::schema::{split_sql_statements, SCHEMA_SQL};

const SCHEMA_VERSION: &str = "1";

#[derive(Clone)]
pub struct DatabaseProxy {
    pool: SqlitePool,
    url: String,
}

impl DatabaseProxy {
    pub async fn connect(url: &str) -> Result<Arc<Self>, DbInitError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(DbInitError::Sqlx)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(30));

        // A :memory: database is per-connection; a pool with more than one
        // connection would hand each caller a different empty store.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(DbInitError::Sqlx)?;

        let proxy = Arc::new(Self {
            pool,
            url: url.to_string(),
        });

        proxy.run_migrations().await?;

        Ok(proxy)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn connection_string(&self) -> &str {
        &self.url
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn run_migrations(&self) -> Result<(), DbInitError> {
        let version: Option<String> = sqlx::query_scalar(
            r#"SELECT "value" FROM "_db_metadata" WHERE "key" = 'schema_version'"#,
        )
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);

        if version.is_some() {
            return Ok(());
        }

        for stmt in split_sql_statements(SCHEMA_SQL) {
            sqlx::query(&stmt)
                .execute(&self.pool)
                .await
                .map_err(DbInitError::Sqlx)?;
        }

        sqlx::query(
            r#"INSERT OR REPLACE INTO "_db_metadata" ("key", "value") VALUES ('schema_version', ?)"#,
        )
        .bind(SCHEMA_VERSION)
        .execute(&self.pool)
        .await
        .map_err(DbInitError::Sqlx)?;

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
