//! Configuration for the concierge bot binary.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use concierge::{DEFAULT_AUDIT_PATH, DEFAULT_KEEPALIVE_PERIOD};
use concierge_core::{CatalogParseError, ResortProfile, RoomCatalog, DEFAULT_MAX_TURNS};
use gemini_brain::GeminiBrainConfig;
use media_web::MediaConfig;
use room_store::RoomStoreConfig;
use thiserror::Error;
use wa_gateway::GatewayConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum BotConfigError {
    #[error(transparent)]
    Gemini(#[from] gemini_brain::ConfigError),

    #[error(transparent)]
    Media(#[from] media_web::ConfigError),

    #[error("invalid ROOM_CATALOG: {0}")]
    Catalog(#[from] CatalogParseError),

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Everything the bot needs to start.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// WhatsApp bridge connection.
    pub gateway: GatewayConfig,
    /// Completion backend.
    pub gemini: GeminiBrainConfig,
    /// Rooms table; the grounding source when set.
    pub room_store: Option<RoomStoreConfig>,
    /// Static grounding file, used when no rooms table is configured.
    pub context_file: Option<PathBuf>,
    /// Resort persona details.
    pub profile: ResortProfile,
    /// Rooms offered in the image menu; derived at startup when unset.
    pub catalog: Option<RoomCatalog>,
    /// Media server settings (also supplies the image root).
    pub media: MediaConfig,
    /// Peer that receives heartbeats; keepalive is off when unset.
    pub keepalive_peer: Option<String>,
    /// Heartbeat period.
    pub keepalive_interval: Duration,
    /// Turns kept per sender.
    pub max_history: usize,
    /// Append-only audit log.
    pub audit_log_path: PathBuf,
    /// Directory for daily-rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional env vars:
    /// - `WA_GATEWAY_URL`, `WA_SESSION`, `WA_BOT_ID`
    /// - `SUPABASE_URL` + `SUPABASE_KEY`, `SUPABASE_ROOMS_TABLE`
    /// - `CONTEXT_FILE`
    /// - `RESORT_NAME`, `RESORT_PHONE`, `RESORT_EMAIL`
    /// - `ROOM_CATALOG` (`Display Name=folder;...`)
    /// - `IMAGES_DIR` (default: images), `PORT` (default: 4000), `MEDIA_ADDR` (default: 0.0.0.0)
    /// - `KEEPALIVE_PEER`, `KEEPALIVE_INTERVAL_SECS` (default: 780)
    /// - `MAX_HISTORY` (default: 10)
    /// - `AUDIT_LOG_PATH` (default: log.txt)
    /// - `LOG_DIR`
    pub fn from_env() -> Result<Self, BotConfigError> {
        let catalog = non_empty("ROOM_CATALOG")
            .map(|spec| RoomCatalog::parse(&spec))
            .transpose()?;

        let keepalive_interval = parse_var::<u64>("KEEPALIVE_INTERVAL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_KEEPALIVE_PERIOD);
        if keepalive_interval.is_zero() {
            return Err(BotConfigError::InvalidValue {
                name: "KEEPALIVE_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            gateway: GatewayConfig::from_env(),
            gemini: GeminiBrainConfig::from_env()?,
            room_store: RoomStoreConfig::from_env(),
            context_file: non_empty("CONTEXT_FILE").map(PathBuf::from),
            profile: ResortProfile::from_env(),
            catalog,
            media: MediaConfig::from_env()?,
            keepalive_peer: non_empty("KEEPALIVE_PEER"),
            keepalive_interval,
            max_history: parse_var::<usize>("MAX_HISTORY")?.unwrap_or(DEFAULT_MAX_TURNS),
            audit_log_path: non_empty("AUDIT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_PATH)),
            log_dir: non_empty("LOG_DIR").map(PathBuf::from),
        })
    }

    /// Root of the per-room image folders.
    pub fn images_dir(&self) -> &Path {
        &self.media.images_dir
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, BotConfigError> {
    match non_empty(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| BotConfigError::InvalidValue { name, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("CONCIERGE_TEST_MAX_HISTORY", "ten");
        let err = parse_var::<usize>("CONCIERGE_TEST_MAX_HISTORY").unwrap_err();
        assert!(matches!(
            err,
            BotConfigError::InvalidValue { name: "CONCIERGE_TEST_MAX_HISTORY", .. }
        ));
        env::remove_var("CONCIERGE_TEST_MAX_HISTORY");
    }

    #[test]
    fn test_parse_var_unset_or_blank_is_none() {
        assert!(parse_var::<u64>("CONCIERGE_TEST_NEVER_SET").unwrap().is_none());

        env::set_var("CONCIERGE_TEST_BLANK", "  ");
        assert!(parse_var::<u64>("CONCIERGE_TEST_BLANK").unwrap().is_none());
        env::remove_var("CONCIERGE_TEST_BLANK");
    }

    #[test]
    fn test_parse_var_trims() {
        env::set_var("CONCIERGE_TEST_INTERVAL", " 60 ");
        assert_eq!(parse_var::<u64>("CONCIERGE_TEST_INTERVAL").unwrap(), Some(60));
        env::remove_var("CONCIERGE_TEST_INTERVAL");
    }
}
