use crate::Result;

use std::{env, fmt, net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_TELEGRAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout: Duration,

    pub telegram: TelegramConfig,
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<i64>,
    pub api_base: String,
    pub timeout: Duration,
}

impl TelegramConfig {
    pub fn is_complete(&self) -> bool {
        return self.bot_token.is_some() && self.chat_id.is_some();
    }
}

// Keeps the bot token out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server_host, self.server_port)
            .parse::<SocketAddr>()
            .with_context(|| {
                format!(
                    "SERVER_HOST must be an IP address, got {:?}",
                    self.server_host
                )
            })?;

        return Ok(addr);
    }
}

/// Reads the process environment, seeded from `.env` when one exists.
pub fn build() -> Result<Config> {
    if let Err(e) = dotenv::dotenv() {
        tracing::debug!("No .env file loaded: {e}");
    }

    return build_from(|key| env::var(key).ok());
}

pub fn build_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let server_host = get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
    let server_port = parse_or("SERVER_PORT", get("SERVER_PORT"), DEFAULT_SERVER_PORT)?;
    let request_timeout = Duration::from_secs(parse_or(
        "REQUEST_TIMEOUT_SECS",
        get("REQUEST_TIMEOUT_SECS"),
        DEFAULT_REQUEST_TIMEOUT_SECS,
    )?);

    let bot_token = get("TELEGRAM_BOT_TOKEN").map(|token| token.trim().to_string());
    let chat_id = get("TELEGRAM_CHAT_ID").and_then(|raw| parse_chat_id(&raw));
    let api_base =
        get("TELEGRAM_API_BASE").unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string());
    let telegram_timeout = Duration::from_secs(parse_or(
        "TELEGRAM_TIMEOUT_SECS",
        get("TELEGRAM_TIMEOUT_SECS"),
        DEFAULT_TELEGRAM_TIMEOUT_SECS,
    )?);

    return Ok(Config {
        server_host,
        server_port,
        request_timeout,

        telegram: TelegramConfig {
            bot_token,
            chat_id,
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout: telegram_timeout,
        },
    });
}

/// The Bot API wants a numeric chat id. Anything else is treated as unset.
fn parse_chat_id(raw: &str) -> Option<i64> {
    return match raw.trim().parse::<i64>() {
        Ok(chat_id) => Some(chat_id),
        Err(e) => {
            tracing::warn!("TELEGRAM_CHAT_ID {raw:?} is not an integer ({e}), treating as unset");
            None
        }
    };
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))?;

    return Ok(value);
}
