use crate::error::{AuthError, Result};
use crate::jwt::JwtService;
use crate::password::PasswordHasher;
use orgsvc_database::OrganizationRepository;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LoginTokens {
    pub access_token: String,
    pub token_type: String,
}

pub struct AuthService {
    directory: OrganizationRepository,
    pub jwt: JwtService,
}

impl AuthService {
    pub fn new(directory: OrganizationRepository, jwt: JwtService) -> Self {
        Self { directory, jwt }
    }

    /// Authenticate an organization admin and issue a bearer token.
    /// Unknown email and wrong password are the same outcome.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginTokens> {
        let org = self
            .directory
            .find_by_admin(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordHasher::verify(password, &org.admin_password_hash) {
            tracing::warn!("Failed login attempt for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt.issue(&org.admin_email, &org.org_name)?;

        Ok(LoginTokens {
            access_token,
            token_type: "bearer".to_string(),
        })
    }
}
