pub mod connection;
pub mod error;
pub mod repositories;
pub mod schema;

pub use connection::{Database, DatabaseConfig};
pub use error::{DatabaseError, Result};
pub use repositories::{NamespaceRecord, NamespaceStore, OrganizationRepository};
pub use schema::ensure_schema;
