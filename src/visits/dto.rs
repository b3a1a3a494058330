use serde::{Deserialize, Serialize};

use crate::students::repo::Student;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub student_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub message: String,
    pub student: Student,
}

#[derive(Debug, Default, Deserialize)]
pub struct VisitSearch {
    #[serde(default)]
    pub search: String,
}

/// One entry of a POST /restore/visits body. Times are stored verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct RestoreVisit {
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub visit_time: Option<String>,
}
