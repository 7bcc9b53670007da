pub(crate) mod row_helpers;
mod seeds;

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::inventory::MemoryStore;
use crate::models::*;

use row_helpers::{map_record_row, record_pk};

/// Store persists the inventory in SQLite, one JSON document per record.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations and make sure reference data is present
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;

        self.seed_reference_data().await?;
        Ok(())
    }

    async fn seed_reference_data(&self) -> Result<()> {
        let now = Utc::now();
        let mut inserted = 0;
        for record in seeds::seed_reference_records() {
            let pk = record_pk(&record)?;
            let data = serde_json::to_string(&record)?;
            let result = sqlx::query(
                "INSERT OR IGNORE INTO inventory_records (kind, pk, data, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(record.kind().as_str())
            .bind(&pk)
            .bind(&data)
            .bind(now)
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }

        if inserted > 0 {
            tracing::info!("Seeded {} reference records", inserted);
        }
        Ok(())
    }

    /// Read the whole inventory into memory for an import run
    pub async fn load_inventory(&self) -> Result<MemoryStore> {
        let rows = sqlx::query("SELECT kind, pk, data FROM inventory_records ORDER BY kind, rowid")
            .fetch_all(&self.pool)
            .await?;

        let mut inventory = MemoryStore::new();
        for row in &rows {
            inventory.insert(map_record_row(row)?)?;
        }

        tracing::debug!("Loaded {} inventory records", inventory.len());
        Ok(inventory)
    }

    /// Write a batch of new records in a single transaction.
    /// Either all of them are saved or none are.
    pub async fn save_records(&self, records: &[Record]) -> Result<usize> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.context("Failed to start transaction")?;

        for record in records {
            let pk = record_pk(record)?;
            let data = serde_json::to_string(record)?;
            sqlx::query("INSERT INTO inventory_records (kind, pk, data, created_at) VALUES (?, ?, ?, ?)")
                .bind(record.kind().as_str())
                .bind(&pk)
                .bind(&data)
                .bind(now)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to save {} {}", record.kind(), pk))?;
        }

        tx.commit().await.context("Failed to commit import")?;
        tracing::debug!("Saved {} records", records.len());
        Ok(records.len())
    }

    pub async fn count(&self, kind: EntityKind) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM inventory_records WHERE kind = ?")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
