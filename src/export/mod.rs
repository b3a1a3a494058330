use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub(crate) mod model;
pub(crate) mod xlsx;

pub fn router() -> Router<AppState> {
    handlers::export_routes()
}
