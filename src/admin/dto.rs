use serde::{Deserialize, Serialize};

/// Request body for POST /admin/login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Outcome of a login attempt. No token is issued either way.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}
