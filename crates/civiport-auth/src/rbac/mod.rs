//! Role-based access control: static defaults merged with dynamic grants.

pub mod defaults;
pub mod resolver;

pub use defaults::RoleDefaults;
pub use resolver::PermissionResolver;
