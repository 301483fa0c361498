use crate::error::{DatabaseError, Result};
use orgsvc_models::{namespace_id, NewOrganization, OrganizationRecord, ReplaceOrganization};
use sqlx::PgPool;

/// The tenant directory: the authoritative mapping of organization name
/// to metadata. Uniqueness of `org_name` and `admin_email` is enforced by
/// the storage constraints, not by read-then-write checks here.
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new organization. The uniqueness check and the insert
    /// are one atomic statement; a constraint violation surfaces as the
    /// matching duplicate error.
    pub async fn create(&self, request: &NewOrganization) -> Result<OrganizationRecord> {
        let org = sqlx::query_as::<_, OrganizationRecord>(
            r#"
            INSERT INTO organizations (org_name, namespace_id, admin_email, admin_password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&request.org_name)
        .bind(&request.namespace_id)
        .bind(&request.admin_email)
        .bind(&request.admin_password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &request.org_name, &request.admin_email))?;

        Ok(org)
    }

    /// Find an organization by name
    pub async fn find_by_name(&self, org_name: &str) -> Result<Option<OrganizationRecord>> {
        let org = sqlx::query_as::<_, OrganizationRecord>(
            "SELECT * FROM organizations WHERE org_name = $1",
        )
        .bind(org_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(org)
    }

    /// Find an organization by its admin email
    pub async fn find_by_admin(&self, admin_email: &str) -> Result<Option<OrganizationRecord>> {
        let org = sqlx::query_as::<_, OrganizationRecord>(
            "SELECT * FROM organizations WHERE admin_email = $1",
        )
        .bind(admin_email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(org)
    }

    /// Replace the identity of an organization in one update: name,
    /// namespace pointer, admin email and credential move together.
    /// Renaming to the current name touches the same row, so it cannot
    /// trip the uniqueness constraints.
    pub async fn replace(
        &self,
        old_org_name: &str,
        request: &ReplaceOrganization,
    ) -> Result<OrganizationRecord> {
        let new_namespace_id = namespace_id(&request.new_org_name);

        let org = sqlx::query_as::<_, OrganizationRecord>(
            r#"
            UPDATE organizations
            SET org_name = $1,
                namespace_id = $2,
                admin_email = $3,
                admin_password_hash = $4,
                updated_at = NOW()
            WHERE org_name = $5
            RETURNING *
            "#,
        )
        .bind(&request.new_org_name)
        .bind(&new_namespace_id)
        .bind(&request.new_admin_email)
        .bind(&request.new_password_hash)
        .bind(old_org_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &request.new_org_name, &request.new_admin_email))?
        .ok_or_else(|| DatabaseError::NotFound(old_org_name.to_string()))?;

        Ok(org)
    }

    /// Remove an organization record. No-op when the record is absent.
    pub async fn delete(&self, org_name: &str) -> Result<()> {
        sqlx::query("DELETE FROM organizations WHERE org_name = $1")
            .bind(org_name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_unique_violation(err: sqlx::Error, org_name: &str, admin_email: &str) -> DatabaseError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.constraint() {
            Some("organizations_pkey") => {
                return DatabaseError::DuplicateOrgName(org_name.to_string());
            }
            Some("organizations_admin_email_key") => {
                return DatabaseError::DuplicateAdminEmail(admin_email.to_string());
            }
            _ => {}
        }
    }

    DatabaseError::ConnectionError(err)
}
