//! Runtime settings, read from the process environment.
//!
//! Credentials come from `NOTION_TOKEN` and `NOTION_DATABASE_ID`; everything
//! else has a default and can be overridden with `NOTION_SYNC_<KEY>`.

use std::collections::HashMap;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{Result, SyncError};

pub const DEFAULT_API_BASE: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_WATCH_PREFIX: &str = "daily/";
pub const DEFAULT_LINK_BASE: &str = "https://github.com/Qiangs1023/ai-daily-content/blob/main/";
pub const DEFAULT_TITLE_LABEL: &str = "AI日报";
pub const DEFAULT_SUMMARY_MARKER: &str = "Summary";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub database_id: String,
    pub api_base: String,
    pub notion_version: String,
    pub watch_prefix: String,
    pub link_base: String,
    pub title_label: String,
    pub summary_marker: String,
    pub timeout_secs: u64,
}

impl Settings {
    /// Load from the real process environment. Does not validate.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let settings = Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("notion_version", DEFAULT_NOTION_VERSION)?
            .set_default("watch_prefix", DEFAULT_WATCH_PREFIX)?
            .set_default("link_base", DEFAULT_LINK_BASE)?
            .set_default("title_label", DEFAULT_TITLE_LABEL)?
            .set_default("summary_marker", DEFAULT_SUMMARY_MARKER)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            // NOTION_TOKEN -> token, NOTION_DATABASE_ID -> database_id
            .add_source(Environment::with_prefix("NOTION").source(vars.clone()))
            .add_source(
                Environment::with_prefix("NOTION_SYNC")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Fail fast on blank credentials instead of waiting for a 401.
    pub fn validate(self) -> Result<Self> {
        if self.token.trim().is_empty() {
            return Err(SyncError::MissingSetting("NOTION_TOKEN"));
        }
        if self.database_id.trim().is_empty() {
            return Err(SyncError::MissingSetting("NOTION_DATABASE_ID"));
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
