//! Process configuration read from the command line and environment
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use std::time::Duration;

pub const DEFAULT_CATALOG_SOURCE: &str = "courses.yaml";
pub const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub catalog_source: String,
    pub reminder_interval: Duration,
    pub utc_offset: FixedOffset,
    pub log_level: String,
}

impl Config {
    /// Build the config from the process arguments and environment.
    ///
    /// The bot token is the single positional argument; `DISCORD_TOKEN`
    /// is used when it is absent.
    pub fn from_env() -> Result<Self> {
        let token_arg = std::env::args().nth(1);
        Self::from_lookup(token_arg, |key| std::env::var(key).ok())
    }

    fn from_lookup<F>(token_arg: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = token_arg
            .or_else(|| lookup("DISCORD_TOKEN"))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("Bot token missing: pass it as the first argument or set DISCORD_TOKEN"))?;

        let catalog_source =
            lookup("CATALOG_SOURCE").unwrap_or_else(|| DEFAULT_CATALOG_SOURCE.to_string());

        let interval_secs = match lookup("REMINDER_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid REMINDER_INTERVAL_SECS: {raw}"))?,
            None => DEFAULT_REMINDER_INTERVAL_SECS,
        };
        if interval_secs == 0 {
            return Err(anyhow!("REMINDER_INTERVAL_SECS must be greater than zero"));
        }

        let offset_minutes = match lookup("UTC_OFFSET_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .with_context(|| format!("Invalid UTC_OFFSET_MINUTES: {raw}"))?,
            None => 0,
        };
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("UTC_OFFSET_MINUTES out of range: {offset_minutes}"))?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Config {
            discord_token,
            catalog_source,
            reminder_interval: Duration::from_secs(interval_secs),
            utc_offset,
            log_level,
        })
    }
}
