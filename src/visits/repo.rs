use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::dto::RestoreVisit;
use super::services::like_pattern;

/// Most visits returned by a search.
pub const SEARCH_LIMIT: i64 = 50;

/// A log entry joined with the student it points at. Entries whose student
/// has been deleted never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VisitRow {
    pub id: i64,
    pub student_number: String,
    pub full_name: Option<String>,
    pub course: Option<String>,
    pub visit_time: Option<String>,
}

pub async fn insert(
    db: &SqlitePool,
    student_number: Option<&str>,
    visit_time: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let done = sqlx::query("INSERT INTO visitor_log (student_number, visit_time) VALUES (?, ?)")
        .bind(student_number)
        .bind(visit_time)
        .execute(db)
        .await?;
    Ok(done.last_insert_rowid())
}

/// Newest visits whose student number, name or course contains `search`.
pub async fn search(db: &SqlitePool, search: &str) -> Result<Vec<VisitRow>, sqlx::Error> {
    let pattern = like_pattern(search);
    sqlx::query_as::<_, VisitRow>(
        r#"
        SELECT v.id, s.student_number, s.full_name, s.course, v.visit_time
          FROM visitor_log v
          JOIN students s ON v.student_number = s.student_number
         WHERE s.student_number LIKE ? OR s.full_name LIKE ? OR s.course LIKE ?
         ORDER BY v.visit_time DESC
         LIMIT ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(db)
    .await
}

/// Every joined visit, newest first, for export.
pub async fn list_joined(db: &SqlitePool) -> Result<Vec<VisitRow>, sqlx::Error> {
    sqlx::query_as::<_, VisitRow>(
        r#"
        SELECT v.id, s.student_number, s.full_name, s.course, v.visit_time
          FROM visitor_log v
          JOIN students s ON v.student_number = s.student_number
         ORDER BY v.visit_time DESC
        "#,
    )
    .fetch_all(db)
    .await
}

/// Re-insert previously exported visits one statement at a time. There is no
/// surrounding transaction: rows written before a failure stay written.
pub async fn restore(db: &SqlitePool, visits: &[RestoreVisit]) -> Result<usize, sqlx::Error> {
    for v in visits {
        insert(db, v.student_number.as_deref(), v.visit_time.as_deref()).await?;
    }
    Ok(visits.len())
}

pub async fn clear(db: &SqlitePool) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM visitor_log").execute(db).await?;
    Ok(done.rows_affected())
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM visitor_log")
        .fetch_one(db)
        .await?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::students::repo::{insert_if_absent, student};

    async fn seeded() -> SqlitePool {
        let db = connect_in_memory().await.unwrap();
        insert_if_absent(&db, &student("S1", "Ana Reyes", "BSIT")).await.unwrap();
        insert_if_absent(&db, &student("S2", "Ben Cruz", "BSN")).await.unwrap();
        db
    }

    #[tokio::test]
    async fn empty_search_returns_newest_fifty() {
        let db = seeded().await;
        for i in 0..60 {
            let t = format!("2025-01-01T00:{:02}:00.000Z", i);
            insert(&db, Some("S1"), Some(&t)).await.unwrap();
        }

        let rows = search(&db, "").await.unwrap();
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[0].visit_time.as_deref(), Some("2025-01-01T00:59:00.000Z"));
        assert_eq!(rows[49].visit_time.as_deref(), Some("2025-01-01T00:10:00.000Z"));
        assert!(rows
            .windows(2)
            .all(|w| w[0].visit_time >= w[1].visit_time));
    }

    #[tokio::test]
    async fn search_matches_course_name_or_number() {
        let db = seeded().await;
        insert(&db, Some("S1"), Some("2025-01-01T08:00:00.000Z")).await.unwrap();
        insert(&db, Some("S2"), Some("2025-01-01T09:00:00.000Z")).await.unwrap();

        let by_course = search(&db, "BSI").await.unwrap();
        assert_eq!(by_course.len(), 1);
        assert_eq!(by_course[0].student_number, "S1");

        let by_name = search(&db, "Cruz").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].full_name.as_deref(), Some("Ben Cruz"));

        let by_number = search(&db, "S").await.unwrap();
        assert_eq!(by_number.len(), 2);
    }

    #[tokio::test]
    async fn orphaned_entries_are_left_out_of_joins() {
        let db = seeded().await;
        insert(&db, Some("S1"), Some("2025-01-01T08:00:00.000Z")).await.unwrap();
        insert(&db, Some("GONE"), Some("2025-01-01T09:00:00.000Z")).await.unwrap();

        assert_eq!(count(&db).await.unwrap(), 2);
        assert_eq!(search(&db, "").await.unwrap().len(), 1);
        assert_eq!(list_joined(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn restore_keeps_supplied_times() {
        let db = seeded().await;
        let visits = vec![
            RestoreVisit {
                student_number: Some("S1".into()),
                visit_time: Some("2024-05-06T07:08:09.000Z".into()),
            },
            RestoreVisit {
                student_number: Some("S2".into()),
                visit_time: Some("2023-01-02T03:04:05.678Z".into()),
            },
            RestoreVisit {
                student_number: Some("UNKNOWN".into()),
                visit_time: Some("2022-01-01T00:00:00.000Z".into()),
            },
        ];

        assert_eq!(restore(&db, &visits).await.unwrap(), 3);
        assert_eq!(count(&db).await.unwrap(), 3);

        let times: Vec<_> = list_joined(&db)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|r| r.visit_time)
            .collect();
        assert_eq!(
            times,
            vec!["2024-05-06T07:08:09.000Z", "2023-01-02T03:04:05.678Z"]
        );
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let db = seeded().await;
        insert(&db, Some("S1"), Some("2025-01-01T08:00:00.000Z")).await.unwrap();
        assert_eq!(clear(&db).await.unwrap(), 1);
        assert!(search(&db, "").await.unwrap().is_empty());
        assert_eq!(count(&db).await.unwrap(), 0);
    }
}
