//! Room store configuration.

use std::env;
use std::time::Duration;

/// Default table name.
pub const DEFAULT_TABLE: &str = "rooms";

/// Connection settings for the rooms table.
#[derive(Debug, Clone)]
pub struct RoomStoreConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Service or anon key.
    pub api_key: String,
    /// Table holding room records.
    pub table: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RoomStoreConfig {
    /// Create a config for the default table.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Use a different table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Load from `SUPABASE_URL`, `SUPABASE_KEY` and `SUPABASE_ROOMS_TABLE`.
    ///
    /// Returns `None` unless both the URL and key are set, since the room
    /// table is an optional grounding source.
    pub fn from_env() -> Option<Self> {
        let url = env::var("SUPABASE_URL").ok().filter(|v| !v.trim().is_empty())?;
        let api_key = env::var("SUPABASE_KEY").ok().filter(|v| !v.trim().is_empty())?;
        let config = Self::new(url, api_key);

        Some(match env::var("SUPABASE_ROOMS_TABLE") {
            Ok(table) if !table.trim().is_empty() => config.with_table(table.trim()),
            _ => config,
        })
    }

    /// The PostgREST endpoint for the table.
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let config = RoomStoreConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(config.table_url(), "https://abc.supabase.co/rest/v1/rooms");

        let config = config.with_table("cottages");
        assert_eq!(config.table_url(), "https://abc.supabase.co/rest/v1/cottages");
    }
}
