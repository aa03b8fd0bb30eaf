//! Concrete repository implementations.

pub mod account;
pub mod grant;

pub use account::PgAccountRepository;
pub use grant::PgGrantRepository;
