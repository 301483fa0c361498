use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Prefix applied to an organization name to form its namespace id.
pub const NAMESPACE_PREFIX: &str = "org_";

/// Derive the namespace id for an organization name. This is a pure
/// function of the name; the directory stores the result so the record
/// and the namespace that holds the tenant's data cannot drift apart
/// without a failed migration being visible.
pub fn namespace_id(org_name: &str) -> String {
    format!("{}{}", NAMESPACE_PREFIX, org_name)
}

/// An organization (tenant) with its admin credential and the pointer to
/// its isolated data namespace. `org_name` and `admin_email` are unique
/// across the whole directory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationRecord {
    pub org_name: String,
    pub namespace_id: String,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the directory. The password is already hashed by
/// the time it reaches the storage layer.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub org_name: String,
    pub namespace_id: String,
    pub admin_email: String,
    pub admin_password_hash: String,
}

/// Replacement identity for the rename path. All identity fields change
/// together as one logical unit; the new namespace id is derived from
/// the new name by the directory.
#[derive(Debug, Clone)]
pub struct ReplaceOrganization {
    pub new_org_name: String,
    pub new_admin_email: String,
    pub new_password_hash: String,
}

/// Create organization request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 255))]
    pub organization_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Update (rename) organization request. Carries the new identity; the
/// organization being renamed is named by the caller's session claim.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 1, max = 255))]
    pub organization_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Delete organization request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOrganizationRequest {
    pub organization_name: String,
}

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Public projection of an organization record. Never carries the
/// password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub org_name: String,
    pub namespace_id: String,
    pub admin_email: String,
}

impl From<OrganizationRecord> for OrganizationResponse {
    fn from(record: OrganizationRecord) -> Self {
        Self {
            org_name: record.org_name,
            namespace_id: record.namespace_id,
            admin_email: record.admin_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(org_name: &str) -> OrganizationRecord {
        OrganizationRecord {
            org_name: org_name.to_string(),
            namespace_id: namespace_id(org_name),
            admin_email: "e@x.com".to_string(),
            admin_password_hash: "$argon2id$opaque".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_namespace_id_derivation() {
        assert_eq!(namespace_id("Acme"), "org_Acme");
        assert_eq!(namespace_id(""), "org_");
    }

    #[test]
    fn test_public_projection_omits_password_hash() {
        let response = OrganizationResponse::from(record("Acme"));
        assert_eq!(response.org_name, "Acme");
        assert_eq!(response.namespace_id, "org_Acme");
        assert_eq!(response.admin_email, "e@x.com");

        let json = serde_json::to_value(&response).unwrap();
        let fields: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert!(fields.iter().all(|f| !f.contains("password")));
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateOrganizationRequest {
            organization_name: "Acme".to_string(),
            email: "e@x.com".to_string(),
            password: "p1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateOrganizationRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = CreateOrganizationRequest {
            organization_name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }
}
