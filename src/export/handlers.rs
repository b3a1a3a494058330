use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use bytes::Bytes;
use tracing::{error, info, instrument};

use crate::{
    error::{ApiError, ApiResult},
    export::{
        model::{students_sheet, visits_sheet, Sheet},
        xlsx::{self, CONTENT_TYPE},
    },
    state::AppState,
    students::repo as students,
    visits::repo as visits,
};

pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/export/students", get(export_students))
        .route("/export/visits", get(export_visits))
}

#[instrument(skip(state))]
pub async fn export_students(State(state): State<AppState>) -> ApiResult<Response> {
    let rows = students::list(&state.db).await.map_err(|e| {
        error!(error = %e, "load students for export failed");
        ApiError::internal(e)
    })?;
    download(students_sheet(rows), "students.xlsx")
}

#[instrument(skip(state))]
pub async fn export_visits(State(state): State<AppState>) -> ApiResult<Response> {
    let rows = visits::list_joined(&state.db).await.map_err(|e| {
        error!(error = %e, "load visits for export failed");
        ApiError::internal(e)
    })?;
    download(visits_sheet(rows, state.config.display_offset), "visits.xlsx")
}

fn download(sheet: Sheet, filename: &str) -> ApiResult<Response> {
    let buf = xlsx::encode(&sheet).map_err(|e| {
        error!(error = %e, sheet = sheet.name, "encode workbook failed");
        ApiError::from(e)
    })?;

    info!(sheet = sheet.name, rows = sheet.rows.len(), bytes = buf.len(), "workbook exported");
    Ok((
        [
            (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        Bytes::from(buf),
    )
        .into_response())
}
