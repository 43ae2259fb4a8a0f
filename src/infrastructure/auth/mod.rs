pub mod remote;

use crate::domain::error::{AppError, Result};
use crate::domain::user::AuthenticatedUser;
use async_trait::async_trait;

pub use remote::RemoteAuthVerifier;

/// Resolves a bearer credential to the user it belongs to.
#[async_trait]
pub trait AuthVerifier {
    async fn verify(&self, access_token: &str) -> Result<AuthenticatedUser>;
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str> {
    let header = header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No authorization header".to_string()))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }
    Ok(token)
}
