use std::path::PathBuf;

#[derive(serde::Deserialize)]
pub struct Config {
    pub api_id: i32,
    pub api_hash: String,
    pub session_file: PathBuf,

    /// Channels scanned on every digest query, in scan order.
    pub channels: Vec<String>,

    /// Reference timezone for window resolution and post timestamps.
    pub timezone: chrono_tz::Tz,
}
