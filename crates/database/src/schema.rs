//! Schema bootstrap for the registry tables.
//!
//! The directory relies on named unique constraints: the repositories map
//! constraint violations back to the duplicate-identifier errors, so the
//! constraint names below are part of the contract with
//! `repositories::organizations`.

use crate::error::Result;
use sqlx::PgPool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS organizations (
        org_name            TEXT PRIMARY KEY,
        namespace_id        TEXT NOT NULL,
        admin_email         TEXT NOT NULL,
        admin_password_hash TEXT NOT NULL,
        created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT organizations_admin_email_key UNIQUE (admin_email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS namespaces (
        namespace_id TEXT PRIMARY KEY,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS namespace_records (
        record_id    UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        namespace_id TEXT NOT NULL REFERENCES namespaces (namespace_id) ON DELETE CASCADE,
        payload      JSONB NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_namespace_records_namespace
        ON namespace_records (namespace_id)
    "#,
];

/// Apply the table definitions. Safe to run on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("Database schema ensured");
    Ok(())
}
