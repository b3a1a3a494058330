use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    OffsetDateTime, UtcOffset,
};

use crate::{students::repo::Student, visits::repo::VisitRow};

/// Table handed to the workbook encoder: one sheet, one header row, then
/// the data rows. `None` cells are left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Option<String>>>,
}

pub const STUDENT_HEADERS: [&str; 3] = ["student_number", "full_name", "course"];
pub const VISIT_HEADERS: [&str; 4] = ["Student Number", "Full Name", "Course", "Date & Time"];

/// e.g. `3/4/2025, 8:15:30 AM`
const DISPLAY_TIME: &[FormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
);

pub fn students_sheet(students: Vec<Student>) -> Sheet {
    Sheet {
        name: "Students",
        headers: STUDENT_HEADERS.to_vec(),
        rows: students
            .into_iter()
            .map(|s| vec![s.student_number, s.full_name, s.course])
            .collect(),
    }
}

pub fn visits_sheet(visits: Vec<VisitRow>, offset: UtcOffset) -> Sheet {
    Sheet {
        name: "Visits",
        headers: VISIT_HEADERS.to_vec(),
        rows: visits
            .into_iter()
            .map(|v| {
                let when = v.visit_time.as_deref().map(|t| display_time(t, offset));
                vec![Some(v.student_number), v.full_name, v.course, when]
            })
            .collect(),
    }
}

/// Render a stored ISO timestamp in local display form. Anything that does
/// not parse is passed through untouched.
pub fn display_time(raw: &str, offset: UtcOffset) -> String {
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|t| t.to_offset(offset).format(DISPLAY_TIME).ok())
        .unwrap_or_else(|| raw.to_string())
}
