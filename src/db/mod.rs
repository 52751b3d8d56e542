use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

use crate::config::Config;

pub mod clients;

pub use clients::ClientRepository;

const CREATE_CLIENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS t_client (
    codcli INTEGER PRIMARY KEY,
    nom VARCHAR(40) NOT NULL,
    prenom VARCHAR(30) NOT NULL,
    genre VARCHAR(8),
    adresse VARCHAR(50) NOT NULL,
    complement_adresse VARCHAR(50),
    tel VARCHAR(10),
    email VARCHAR(255),
    newsletter INTEGER DEFAULT 0
)
"#;

const CREATE_CLIENT_NOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_t_client_nom ON t_client (nom)";

/// Database connection pool
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool against `url`, creating the SQLite file if needed
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url {url}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("failed to open database pool")?;

        Ok(Self { pool })
    }

    /// A private in-memory database.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// capped at one connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("failed to open in-memory database")?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check out a connection for the lifetime of one request.
    ///
    /// The connection returns to the pool when the guard drops.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Create `t_client` and its index when absent
    pub async fn create_schema(&self) -> Result<()> {
        sqlx::query(CREATE_CLIENT_TABLE)
            .execute(self.get_pool())
            .await
            .context("failed to create t_client")?;

        sqlx::query(CREATE_CLIENT_NOM_INDEX)
            .execute(self.get_pool())
            .await
            .context("failed to create t_client index")?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Initialize the database connection pool and schema
pub async fn init(config: &Config) -> Result<Database> {
    let url = config.database_url();
    let db = Database::connect(&url, config.database_max_connections).await?;

    db.create_schema().await?;
    tracing::info!(url = %url, "database ready");

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.create_schema().await.unwrap();
        db.create_schema().await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 't_client'",
        )
        .fetch_one(db.get_pool())
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn newsletter_column_defaults_to_zero() {
        let db = Database::in_memory().await.unwrap();
        db.create_schema().await.unwrap();

        sqlx::query("INSERT INTO t_client (nom, prenom, adresse) VALUES ('A', 'B', 'C')")
            .execute(db.get_pool())
            .await
            .unwrap();

        let newsletter: Option<i64> = sqlx::query_scalar("SELECT newsletter FROM t_client")
            .fetch_one(db.get_pool())
            .await
            .unwrap();
        assert_eq!(newsletter, Some(0));
    }

    #[tokio::test]
    async fn connect_creates_missing_file() {
        let path = std::env::temp_dir().join(format!("client_api_{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let url = format!("sqlite://{}", path.display());

        let db = Database::connect(&url, 2).await.unwrap();
        db.create_schema().await.unwrap();
        db.close().await;

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
