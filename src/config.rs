use serde::Deserialize;
use time::{format_description::FormatItem, macros::format_description, UtcOffset};

/// `+08:00`, `-05:30`, ...
const OFFSET_FORMAT: &[FormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub admin: AdminConfig,
    /// Offset used when rendering visit times for spreadsheet export.
    pub display_offset: UtcOffset,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let admin = AdminConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "1234".into()),
        };
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://database.db".into()),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(5),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(5000),
            admin,
            display_offset: display_offset(std::env::var("DISPLAY_UTC_OFFSET").ok().as_deref()),
        })
    }

    /// Config used by tests: in-memory store, default admin pair.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            admin: AdminConfig {
                username: "admin".into(),
                password: "1234".into(),
            },
            display_offset: UtcOffset::UTC,
        }
    }
}

/// Explicit offset if it parses, else the host's local offset, else UTC.
/// The local offset is often unavailable once the runtime has spawned
/// worker threads.
fn display_offset(explicit: Option<&str>) -> UtcOffset {
    explicit
        .and_then(|v| UtcOffset::parse(v.trim(), OFFSET_FORMAT).ok())
        .or_else(|| UtcOffset::current_local_offset().ok())
        .unwrap_or(UtcOffset::UTC)
}
