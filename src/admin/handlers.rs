use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    admin::dto::{LoginRequest, LoginResponse},
    config::AdminConfig,
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/login", post(login))
}

pub(crate) fn credentials_match(admin: &AdminConfig, req: &LoginRequest) -> bool {
    req.username.as_deref() == Some(admin.username.as_str())
        && req.password.as_deref() == Some(admin.password.as_str())
}

/// Informational only: nothing else in the API checks the outcome.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Json<LoginResponse> {
    let success = credentials_match(&state.config.admin, &payload);
    if success {
        info!("admin login succeeded");
    } else {
        warn!(username = ?payload.username, "admin login rejected");
    }
    Json(LoginResponse { success })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminConfig {
        AdminConfig {
            username: "admin".into(),
            password: "1234".into(),
        }
    }

    fn req(user: Option<&str>, pass: Option<&str>) -> LoginRequest {
        LoginRequest {
            username: user.map(Into::into),
            password: pass.map(Into::into),
        }
    }

    #[test]
    fn accepts_configured_pair() {
        assert!(credentials_match(&admin(), &req(Some("admin"), Some("1234"))));
    }

    #[test]
    fn rejects_anything_else() {
        assert!(!credentials_match(&admin(), &req(Some("admin"), Some("12345"))));
        assert!(!credentials_match(&admin(), &req(Some("Admin"), Some("1234"))));
        assert!(!credentials_match(&admin(), &req(None, Some("1234"))));
        assert!(!credentials_match(&admin(), &req(None, None)));
    }

    #[test]
    fn response_serializes_flag_only() {
        let json = serde_json::to_string(&LoginResponse { success: false }).unwrap();
        assert_eq!(json, r#"{"success":false}"#);
    }
}
