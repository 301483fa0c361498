pub mod namespaces;
pub mod organizations;

pub use namespaces::{NamespaceRecord, NamespaceStore};
pub use organizations::OrganizationRepository;
