pub mod error;
pub mod jwt;
pub mod password;
pub mod service;

pub use error::{AuthError, Result};
pub use jwt::{Claims, JwtService, SessionClaim};
pub use password::PasswordHasher;
pub use service::{AuthService, LoginTokens};
