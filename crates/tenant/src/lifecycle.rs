use crate::error::{Result, TenantError};
use orgsvc_auth::{PasswordHasher, SessionClaim};
use orgsvc_database::{Database, DatabaseError, NamespaceStore, OrganizationRepository};
use orgsvc_models::{
    namespace_id, CreateOrganizationRequest, NewOrganization, OrganizationResponse,
    ReplaceOrganization, UpdateOrganizationRequest,
};

/// Coordinates the directory, the namespace store and credential hashing
/// for organization create/read/rename/delete. Holds its own storage
/// handles for its whole lifetime; nothing here is process-global.
pub struct TenantLifecycle {
    directory: OrganizationRepository,
    namespaces: NamespaceStore,
}

impl TenantLifecycle {
    pub fn new(db: &Database) -> Self {
        let pool = db.pool().clone();

        Self {
            directory: OrganizationRepository::new(pool.clone()),
            namespaces: NamespaceStore::new(pool),
        }
    }

    /// Provision a namespace and register the organization record.
    ///
    /// The lookups are a courtesy for error reporting; the directory's
    /// unique constraints are the real arbiter under concurrency.
    pub async fn create(
        &self,
        request: &CreateOrganizationRequest,
    ) -> Result<OrganizationResponse> {
        if self
            .directory
            .find_by_name(&request.organization_name)
            .await?
            .is_some()
        {
            return Err(TenantError::DuplicateOrgName(
                request.organization_name.clone(),
            ));
        }
        if self.directory.find_by_admin(&request.email).await?.is_some() {
            return Err(TenantError::DuplicateAdminEmail(request.email.clone()));
        }

        let password_hash = PasswordHasher::hash(&request.password)
            .map_err(|e| TenantError::PasswordHash(e.to_string()))?;
        let ns = namespace_id(&request.organization_name);

        self.namespaces.provision(&ns).await?;

        let new_org = NewOrganization {
            org_name: request.organization_name.clone(),
            namespace_id: ns.clone(),
            admin_email: request.email.clone(),
            admin_password_hash: password_hash,
        };

        let record = match self.directory.create(&new_org).await {
            Ok(record) => record,
            Err(e) => {
                // Losing the uniqueness race here strands the namespace
                // provisioned above; there is no rollback for it.
                tracing::warn!(
                    "Organization create failed after provisioning namespace {}: {}",
                    ns,
                    e
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            "Created organization {} with namespace {}",
            record.org_name,
            record.namespace_id
        );

        Ok(record.into())
    }

    /// Public projection of an organization record. No auth required.
    pub async fn read(&self, org_name: &str) -> Result<OrganizationResponse> {
        let record = self
            .directory
            .find_by_name(org_name)
            .await?
            .ok_or_else(|| TenantError::NotFound(org_name.to_string()))?;

        Ok(record.into())
    }

    /// Rename an organization and migrate its namespace. The claim must
    /// resolve to a live record: if the organization vanished underneath
    /// the caller, this is the operation that observes `NotFound`.
    pub async fn rename(
        &self,
        claim: &SessionClaim,
        request: &UpdateOrganizationRequest,
    ) -> Result<OrganizationResponse> {
        let current = self
            .directory
            .find_by_name(&claim.org_name)
            .await?
            .ok_or_else(|| TenantError::NotFound(claim.org_name.clone()))?;

        if current.admin_email != claim.admin_email {
            return Err(TenantError::Unauthorized(
                "Admin email does not match organization".to_string(),
            ));
        }

        // Collisions exclude the record itself: renaming to the current
        // name or keeping the current email is not a conflict.
        if request.organization_name != current.org_name
            && self
                .directory
                .find_by_name(&request.organization_name)
                .await?
                .is_some()
        {
            return Err(TenantError::DuplicateOrgName(
                request.organization_name.clone(),
            ));
        }
        if request.email != current.admin_email
            && self.directory.find_by_admin(&request.email).await?.is_some()
        {
            return Err(TenantError::DuplicateAdminEmail(request.email.clone()));
        }

        let password_hash = PasswordHasher::hash(&request.password)
            .map_err(|e| TenantError::PasswordHash(e.to_string()))?;

        let replacement = ReplaceOrganization {
            new_org_name: request.organization_name.clone(),
            new_admin_email: request.email.clone(),
            new_password_hash: password_hash,
        };

        // Metadata first, then data. A failure between the two leaves the
        // record pointing at a namespace the data has not reached; that
        // state is surfaced to the caller, not patched over here.
        let replaced = self
            .directory
            .replace(&current.org_name, &replacement)
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound(_) => TenantError::NotFound(current.org_name.clone()),
                other => other.into(),
            })?;

        self.namespaces
            .migrate(&current.namespace_id, &replaced.namespace_id)
            .await?;

        tracing::info!(
            "Renamed organization {} -> {}",
            current.org_name,
            replaced.org_name
        );

        Ok(replaced.into())
    }

    /// Drop the namespace and remove the record. Admins may delete only
    /// their own organization; a structurally valid token for another
    /// tenant is forbidden.
    pub async fn delete(&self, claim: &SessionClaim, org_name: &str) -> Result<()> {
        let target = self
            .directory
            .find_by_name(org_name)
            .await?
            .ok_or_else(|| TenantError::NotFound(org_name.to_string()))?;

        if target.org_name != claim.org_name {
            return Err(TenantError::Forbidden(
                "Admins may only delete their own organization".to_string(),
            ));
        }
        if target.admin_email != claim.admin_email {
            return Err(TenantError::Unauthorized(
                "Admin email does not match organization".to_string(),
            ));
        }

        self.namespaces.drop(&target.namespace_id).await?;
        self.directory.delete(&target.org_name).await?;

        tracing::info!(
            "Deleted organization {} and namespace {}",
            target.org_name,
            target.namespace_id
        );

        Ok(())
    }

    /// Namespace store handle, for tenant data access.
    pub fn namespaces(&self) -> &NamespaceStore {
        &self.namespaces
    }

    /// Directory handle.
    pub fn directory(&self) -> &OrganizationRepository {
        &self.directory
    }
}
