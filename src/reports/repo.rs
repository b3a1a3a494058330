use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::{students::repo as students, visits::repo as visits};

/// Placeholder for aggregates that have no visits to draw from.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_students: i64,
    pub total_visits: i64,
    pub top_course: String,
    pub peak_month: String,
}

/// Course with the most joined visits. Ties go to whichever row SQLite
/// yields first.
pub async fn top_course(db: &SqlitePool) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(Option<String>, i64)> = sqlx::query_as(
        r#"
        SELECT s.course, COUNT(*) AS count
          FROM visitor_log v
          JOIN students s ON v.student_number = s.student_number
         GROUP BY s.course
         ORDER BY count DESC
         LIMIT 1
        "#,
    )
    .fetch_optional(db)
    .await?;
    Ok(row.and_then(|(course, _)| course))
}

/// `YYYY-MM` prefix of the busiest month in the log.
pub async fn peak_month(db: &SqlitePool) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(Option<String>, i64)> = sqlx::query_as(
        r#"
        SELECT substr(visit_time, 1, 7) AS month, COUNT(*) AS count
          FROM visitor_log
         GROUP BY month
         ORDER BY count DESC
         LIMIT 1
        "#,
    )
    .fetch_optional(db)
    .await?;
    Ok(row.and_then(|(month, _)| month))
}

/// Run the four aggregates in order. The counts are required; a failing
/// top-course or peak-month query degrades to "N/A".
pub async fn build(db: &SqlitePool) -> Result<Report, sqlx::Error> {
    let total_students = students::count(db).await?;
    let total_visits = visits::count(db).await?;

    let top_course = top_course(db).await.unwrap_or_else(|e| {
        error!(error = %e, "top course query failed");
        None
    });
    let peak_month = peak_month(db).await.unwrap_or_else(|e| {
        error!(error = %e, "peak month query failed");
        None
    });

    Ok(Report {
        total_students,
        total_visits,
        top_course: top_course.unwrap_or_else(|| NOT_AVAILABLE.into()),
        peak_month: peak_month.unwrap_or_else(|| NOT_AVAILABLE.into()),
    })
}
