use crate::state::AppState;
use axum::Router;

pub(crate) mod dto;
pub mod handlers;
pub mod repo;
pub(crate) mod services;

pub fn router() -> Router<AppState> {
    handlers::visit_routes()
}
