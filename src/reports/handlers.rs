use axum::{extract::State, routing::get, Json, Router};
use tracing::{error, instrument};

use crate::{
    error::{ApiError, ApiResult},
    reports::repo::{self, Report},
    state::AppState,
};

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/reports", get(reports))
}

#[instrument(skip(state))]
pub async fn reports(State(state): State<AppState>) -> ApiResult<Json<Report>> {
    let report = repo::build(&state.db).await.map_err(|e| {
        error!(error = %e, "build report failed");
        ApiError::internal(e)
    })?;
    Ok(Json(report))
}
