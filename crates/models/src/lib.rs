// Core modules
pub mod organization;

// Re-export commonly used types
pub use organization::{
    namespace_id, AdminLoginRequest, CreateOrganizationRequest, DeleteOrganizationRequest,
    NewOrganization, OrganizationRecord, OrganizationResponse, ReplaceOrganization,
    UpdateOrganizationRequest, NAMESPACE_PREFIX,
};
