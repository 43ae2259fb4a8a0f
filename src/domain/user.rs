use serde::{Deserialize, Serialize};

/// Caller identity resolved from a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Client-side session: the token sent to the proxy and the owner of new rows.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub access_token: String,
    pub user_id: String,
}
