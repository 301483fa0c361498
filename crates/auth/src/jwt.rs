use crate::error::{AuthError, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Admin email
    pub org: String, // Organization name
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration time
}

/// The verified contents of a bearer token: an admin identity bound to an
/// organization identity, valid until `expires_at`. Whether the pair
/// still exists in the directory is the orchestrator's question, not the
/// token service's.
#[derive(Debug, Clone)]
pub struct SessionClaim {
    pub admin_email: String,
    pub org_name: String,
    pub expires_at: DateTime<Utc>,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            validity_hours: 24,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let validity_hours = std::env::var("TOKEN_VALIDITY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Self::new(&secret).with_validity_hours(validity_hours)
    }

    pub fn with_validity_hours(mut self, hours: i64) -> Self {
        self.validity_hours = hours;
        self
    }

    /// Issue a signed token binding an admin identity to an organization.
    /// Stateless: nothing is recorded anywhere.
    pub fn issue(&self, admin_email: &str, org_name: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.validity_hours);

        let claims = Claims {
            sub: admin_email.to_string(),
            org: org_name.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return its claim. Expired tokens and tokens
    /// with a bad signature or missing fields are distinct failures.
    pub fn verify(&self, token: &str) -> Result<SessionClaim> {
        let validation = Validation::new(self.algorithm);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        let claims = token_data.claims;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| AuthError::MalformedToken("expiry out of range".to_string()))?;

        Ok(SessionClaim {
            admin_email: claims.sub,
            org_name: claims.org,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");

        let token = jwt.issue("e@x.com", "Acme").expect("Failed to issue token");
        let claim = jwt.verify(&token).expect("Failed to verify token");

        assert_eq!(claim.admin_email, "e@x.com");
        assert_eq!(claim.org_name, "Acme");
        assert!(claim.expires_at > Utc::now());
    }

    #[test]
    fn test_expired_token() {
        // Validity far enough in the past to clear the default leeway.
        let jwt = JwtService::new("test-secret-key-min-32-characters-long")
            .with_validity_hours(-2);

        let token = jwt.issue("e@x.com", "Acme").unwrap();
        let err = jwt.verify(&token).unwrap_err();

        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn test_tampered_signature_is_malformed() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");

        let token = jwt.issue("e@x.com", "Acme").unwrap();
        let mut tampered = token[..token.len() - 2].to_string();
        tampered.push_str("xx");

        let err = jwt.verify(&tampered).unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken(_)));
    }

    #[test]
    fn test_token_from_other_secret_is_malformed() {
        let issuer = JwtService::new("one-secret-key-min-32-characters-long!");
        let verifier = JwtService::new("another-secret-key-min-32-characters!");

        let token = issuer.issue("e@x.com", "Acme").unwrap();
        let err = verifier.verify(&token).unwrap_err();

        assert!(matches!(err, AuthError::MalformedToken(_)));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");

        let err = jwt.verify("not.a.jwt").unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken(_)));
    }
}
