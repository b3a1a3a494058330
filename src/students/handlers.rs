use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    dto::{ClearResponse, MessageResponse},
    error::{ApiError, ApiResult},
    state::AppState,
    students::{
        dto::RegisterStudentRequest,
        repo::{self, Student},
    },
};

pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/student", post(register))
        .route("/student/:id", delete(remove))
        .route("/students", get(list))
        .route("/clear_students", post(clear))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterStudentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let student = payload.into_student();
    let inserted = repo::insert_if_absent(&state.db, &student)
        .await
        .map_err(|e| {
            error!(error = %e, "insert student failed");
            ApiError::store(StatusCode::BAD_REQUEST)(e)
        })?;

    info!(
        student_number = ?student.student_number,
        inserted = inserted > 0,
        "student registered"
    );
    Ok(Json(MessageResponse::new("Student added")))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = repo::delete(&state.db, &id).await.map_err(|e| {
        error!(error = %e, "delete student failed");
        ApiError::internal(e)
    })?;

    info!(student_number = %id, deleted, "student deleted");
    Ok(Json(MessageResponse::new("Student deleted")))
}

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Student>>> {
    let students = repo::list(&state.db).await.map_err(|e| {
        error!(error = %e, "list students failed");
        ApiError::internal(e)
    })?;
    Ok(Json(students))
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> ApiResult<Json<ClearResponse>> {
    let removed = repo::clear(&state.db).await.map_err(|e| {
        error!(error = %e, "clear students failed");
        ApiError::Clear {
            what: "students",
            source: e,
        }
    })?;

    info!(removed, "students cleared");
    Ok(Json(ClearResponse::ok("All students cleared")))
}
