use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

/// UTC, millisecond precision, `Z` suffix: `2025-03-04T08:15:30.250Z`.
const VISIT_TIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

pub fn format_visit_time(at: OffsetDateTime) -> String {
    let utc = at.to_offset(time::UtcOffset::UTC);
    // The description only holds fixed-width components.
    utc.format(VISIT_TIME).unwrap_or_else(|_| utc.to_string())
}

pub fn now_visit_time() -> String {
    format_visit_time(OffsetDateTime::now_utc())
}

/// `LIKE` pattern matching the search text anywhere in a column.
pub fn like_pattern(search: &str) -> String {
    format!("%{search}%")
}
