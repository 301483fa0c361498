use crate::error::{DatabaseError, Result};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One opaque tenant record inside a namespace. Payloads carry no schema.
#[derive(Debug, Clone, FromRow)]
pub struct NamespaceRecord {
    pub record_id: Uuid,
    pub namespace_id: String,
    pub payload: Value,
}

/// Owns the existence and contents of the per-tenant data namespaces.
/// Never touches the organization metadata; that belongs to the
/// directory.
pub struct NamespaceStore {
    pool: PgPool,
}

impl NamespaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure an empty namespace exists. Idempotent.
    pub async fn provision(&self, namespace_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO namespaces (namespace_id) VALUES ($1) ON CONFLICT (namespace_id) DO NOTHING",
        )
        .bind(namespace_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a namespace and everything in it. No-op when absent.
    pub async fn drop(&self, namespace_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM namespaces WHERE namespace_id = $1")
            .bind(namespace_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn exists(&self, namespace_id: &str) -> Result<bool> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT namespace_id FROM namespaces WHERE namespace_id = $1")
                .bind(namespace_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Move every record from `old_namespace_id` into `new_namespace_id`,
    /// then remove the old namespace. Copied rows get fresh record ids;
    /// the target is provisioned here, so there is nothing to collide
    /// with. Copy and drop run in one transaction: an observer sees
    /// either the old namespace intact or the new one fully populated,
    /// never both, never neither.
    pub async fn migrate(&self, old_namespace_id: &str, new_namespace_id: &str) -> Result<()> {
        if old_namespace_id == new_namespace_id {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO namespaces (namespace_id) VALUES ($1) ON CONFLICT (namespace_id) DO NOTHING",
        )
        .bind(new_namespace_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO namespace_records (namespace_id, payload)
            SELECT $1, payload FROM namespace_records WHERE namespace_id = $2
            "#,
        )
        .bind(new_namespace_id)
        .bind(old_namespace_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM namespaces WHERE namespace_id = $1")
            .bind(old_namespace_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Migrated namespace {} -> {}",
            old_namespace_id,
            new_namespace_id
        );

        Ok(())
    }

    /// Store an opaque record in a namespace.
    pub async fn insert_record(&self, namespace_id: &str, payload: &Value) -> Result<Uuid> {
        let record_id: Uuid = sqlx::query_scalar(
            "INSERT INTO namespace_records (namespace_id, payload) VALUES ($1, $2) RETURNING record_id",
        )
        .bind(namespace_id)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some("namespace_records_namespace_id_fkey") {
                    return DatabaseError::NotFound(namespace_id.to_string());
                }
            }
            DatabaseError::ConnectionError(e)
        })?;

        Ok(record_id)
    }

    /// All records in a namespace.
    pub async fn records(&self, namespace_id: &str) -> Result<Vec<NamespaceRecord>> {
        let records = sqlx::query_as::<_, NamespaceRecord>(
            "SELECT record_id, namespace_id, payload FROM namespace_records WHERE namespace_id = $1",
        )
        .bind(namespace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
