use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub student_number: Option<String>,
    pub full_name: Option<String>,
    pub course: Option<String>,
}

/// Insert a student unless the number is already taken. Returns the number
/// of rows written (0 when the existing row was kept).
pub async fn insert_if_absent(db: &SqlitePool, student: &Student) -> Result<u64, sqlx::Error> {
    let done = sqlx::query(
        r#"
        INSERT OR IGNORE INTO students (student_number, full_name, course)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&student.student_number)
    .bind(&student.full_name)
    .bind(&student.course)
    .execute(db)
    .await?;
    Ok(done.rows_affected())
}

pub async fn delete(db: &SqlitePool, student_number: &str) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM students WHERE student_number = ?")
        .bind(student_number)
        .execute(db)
        .await?;
    Ok(done.rows_affected())
}

pub async fn find(db: &SqlitePool, student_number: Option<&str>) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT student_number, full_name, course
          FROM students
         WHERE student_number = ?
        "#,
    )
    .bind(student_number)
    .fetch_optional(db)
    .await
}

/// All students, alphabetical by full name.
pub async fn list(db: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT student_number, full_name, course
          FROM students
         ORDER BY full_name
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn clear(db: &SqlitePool) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM students").execute(db).await?;
    Ok(done.rows_affected())
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
        .fetch_one(db)
        .await?;
    Ok(n)
}

#[cfg(test)]
pub(crate) fn student(number: &str, name: &str, course: &str) -> Student {
    Student {
        student_number: Some(number.into()),
        full_name: Some(name.into()),
        course: Some(course.into()),
    }
}
