use serde::Deserialize;

use super::repo::Student;

/// Request body for POST /student. Fields are not validated; anything
/// missing is stored as NULL.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterStudentRequest {
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
}

impl RegisterStudentRequest {
    pub fn into_student(self) -> Student {
        Student {
            student_number: self.student_number,
            full_name: self.full_name,
            course: self.course,
        }
    }
}
