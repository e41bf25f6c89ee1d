//! Process configuration, read once at startup from the environment.
//!
//! | Variable            | Meaning                                  | Default     |
//! |---------------------|------------------------------------------|-------------|
//! | `SYSTEMEIO_API_URL` | CRM contact endpoint                     | (empty)     |
//! | `SYSTEMEIO_API_KEY` | CRM bearer token                         | (empty)     |
//! | `MAKE_WEBHOOK_URL`  | Automation webhook                       | (empty)     |
//! | `ALLOWED_ORIGIN`    | Value of `Access-Control-Allow-Origin`   | `*`         |
//! | `HOST`              | Bind address                             | `127.0.0.1` |
//! | `PORT`              | Bind port                                | `8080`      |
//!
//! Missing destinations do not stop the server; requests fail with a `500`
//! until they are set.

use actix_web::http::header::HeaderValue;
use log::warn;
use std::num::ParseIntError;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const WILDCARD_ORIGIN: &str = "*";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("ALLOWED_ORIGIN is not a valid header value: {0:?}")]
    InvalidOrigin(String),
}

/// Where submissions are forwarded to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayConfig {
    pub crm_url: String,
    pub crm_api_key: String,
    pub automation_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Exact origin of the quiz page in production. `*` is for testing only.
    pub allowed_origin: String,
    pub relay: RelayConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let allowed_origin = lookup("ALLOWED_ORIGIN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| WILDCARD_ORIGIN.to_string());
        if HeaderValue::from_str(&allowed_origin).is_err() {
            return Err(ConfigError::InvalidOrigin(allowed_origin));
        }

        Ok(Self {
            host: lookup("HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            allowed_origin,
            relay: RelayConfig {
                crm_url: read("SYSTEMEIO_API_URL"),
                crm_api_key: read("SYSTEMEIO_API_KEY"),
                automation_url: read("MAKE_WEBHOOK_URL"),
            },
        })
    }

    /// Logs settings that will make requests fail or that are unsafe in production.
    pub fn warn_on_gaps(&self) {
        for (name, value) in [
            ("SYSTEMEIO_API_URL", &self.relay.crm_url),
            ("SYSTEMEIO_API_KEY", &self.relay.crm_api_key),
            ("MAKE_WEBHOOK_URL", &self.relay.automation_url),
        ] {
            if value.is_empty() {
                warn!("{} is not set", name);
            }
        }
        if self.allowed_origin == WILDCARD_ORIGIN {
            warn!("ALLOWED_ORIGIN is '*', set it to the quiz page origin before going live");
        }
    }
}
