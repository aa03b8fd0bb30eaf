//! Request-level authorization guards.
//!
//! Pure decision functions: each either returns the resolved claims or a
//! denial. Mapping denials to HTTP status codes is a boundary concern and
//! happens where `AccessError` converts to the application error kinds.

use civiport_entity::account::Role;

use crate::error::AccessError;
use crate::session::SessionClaims;

/// Requires a valid session to be present.
pub fn require_authenticated(
    claims: Option<&SessionClaims>,
) -> Result<&SessionClaims, AccessError> {
    claims.ok_or(AccessError::Unauthenticated)
}

/// Requires the session's role to be one of the allowed set.
pub fn require_any_role<'a>(
    claims: &'a SessionClaims,
    allowed: &[Role],
) -> Result<&'a SessionClaims, AccessError> {
    if allowed.contains(&claims.role) {
        Ok(claims)
    } else {
        Err(AccessError::Forbidden)
    }
}

/// Requires the session's role to sit at or above the threshold in the
/// privilege order.
pub fn require_min_role(
    claims: &SessionClaims,
    minimum: Role,
) -> Result<&SessionClaims, AccessError> {
    if claims.role.has_at_least(&minimum) {
        Ok(claims)
    } else {
        Err(AccessError::Forbidden)
    }
}
