use orgsvc_database::DatabaseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TenantError>;

#[derive(Debug, Error)]
pub enum TenantError {
    #[error("Organization '{0}' already exists")]
    DuplicateOrgName(String),

    #[error("Admin email '{0}' is already registered")]
    DuplicateAdminEmail(String),

    #[error("Organization '{0}' not found")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<DatabaseError> for TenantError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::DuplicateOrgName(name) => TenantError::DuplicateOrgName(name),
            DatabaseError::DuplicateAdminEmail(email) => TenantError::DuplicateAdminEmail(email),
            DatabaseError::NotFound(what) => TenantError::NotFound(what),
            other => TenantError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_mapping() {
        let err: TenantError = DatabaseError::DuplicateOrgName("Acme".to_string()).into();
        assert!(matches!(err, TenantError::DuplicateOrgName(n) if n == "Acme"));

        let err: TenantError = DatabaseError::DuplicateAdminEmail("e@x.com".to_string()).into();
        assert!(matches!(err, TenantError::DuplicateAdminEmail(e) if e == "e@x.com"));

        let err: TenantError = DatabaseError::NotFound("Acme".to_string()).into();
        assert!(matches!(err, TenantError::NotFound(n) if n == "Acme"));

        let err: TenantError = DatabaseError::Other("boom".to_string()).into();
        assert!(matches!(err, TenantError::Storage(_)));
    }
}
