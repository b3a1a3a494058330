use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    dto::{ClearResponse, MessageResponse},
    error::{ApiError, ApiResult},
    state::AppState,
    students::repo as students,
    visits::{
        dto::{CheckInRequest, CheckInResponse, RestoreVisit, VisitSearch},
        repo::{self, VisitRow},
        services::now_visit_time,
    },
};

pub fn visit_routes() -> Router<AppState> {
    Router::new()
        .route("/checkin", post(check_in))
        .route("/visits", get(list))
        .route("/clear_visits", post(clear))
        .route("/restore/visits", post(restore))
}

#[instrument(skip(state, payload))]
pub async fn check_in(
    State(state): State<AppState>,
    Json(payload): Json<CheckInRequest>,
) -> ApiResult<Json<CheckInResponse>> {
    let number = payload.student_number.as_deref();
    let visit_time = now_visit_time();

    let student = match students::find(&state.db, number).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            warn!(student_number = ?number, "check-in for unknown student");
            return Err(ApiError::NotFound("Student not found".into()));
        }
        Err(e) => {
            error!(error = %e, "find student failed");
            return Err(ApiError::internal(e));
        }
    };

    let id = repo::insert(&state.db, number, Some(&visit_time))
        .await
        .map_err(|e| {
            error!(error = %e, "insert visit failed");
            ApiError::internal(e)
        })?;

    let name = student.full_name.clone().unwrap_or_default();
    info!(visit_id = id, student_number = ?number, %visit_time, "checked in");
    Ok(Json(CheckInResponse {
        message: format!("Checked in: {name}"),
        student,
    }))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<VisitSearch>,
) -> ApiResult<Json<Vec<VisitRow>>> {
    let rows = repo::search(&state.db, &q.search).await.map_err(|e| {
        error!(error = %e, "search visits failed");
        ApiError::internal(e)
    })?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> ApiResult<Json<ClearResponse>> {
    let removed = repo::clear(&state.db).await.map_err(|e| {
        error!(error = %e, "clear visits failed");
        ApiError::Clear {
            what: "visits",
            source: e,
        }
    })?;

    info!(removed, "visits cleared");
    Ok(Json(ClearResponse::ok("All visits cleared")))
}

#[instrument(skip(state, visits))]
pub async fn restore(
    State(state): State<AppState>,
    Json(visits): Json<Vec<RestoreVisit>>,
) -> ApiResult<Json<MessageResponse>> {
    let restored = repo::restore(&state.db, &visits).await.map_err(|e| {
        error!(error = %e, "restore visits failed");
        ApiError::internal(e)
    })?;

    info!(restored, "visits restored");
    Ok(Json(MessageResponse::new("Visits restored successfully")))
}
