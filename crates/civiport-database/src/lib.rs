//! # civiport-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for CiviPort accounts and permission grants.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
