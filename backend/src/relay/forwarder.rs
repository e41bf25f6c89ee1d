//! Outbound side of the relay.
//!
//! A [`Forwarder`] is one downstream integration. The relay first asks every
//! forwarder whether it is [`ready`](Forwarder::ready), so that a broken
//! destination fails the submission before anything leaves the server, then
//! calls [`forward`](Forwarder::forward) on all of them concurrently.
//!
//! [`HttpForwarder`] is the production implementation: a JSON `POST` to a URL
//! parsed once when the forwarder is built.

use async_trait::async_trait;
use log::warn;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde_json::Value;

use super::error::RelayError;

/// Result of handing a payload to one integration.
///
/// `status` is `None` when no HTTP answer came back at all (connection
/// refused, reset, DNS failure...). In that case `error` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub status: Option<u16>,
    pub body: String,
    pub error: Option<String>,
}

impl Delivery {
    pub fn answered(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
            error: None,
        }
    }

    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            status: None,
            body: String::new(),
            error: Some(error.into()),
        }
    }

    /// Only a 2xx answer counts; the body is never inspected.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

/// One downstream integration the relay pushes submissions to.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Checks that the integration can be called at all, without calling it.
    fn ready(&self) -> Result<(), RelayError> {
        Ok(())
    }

    /// Sends `body` to the integration.
    ///
    /// A rejected or unreachable integration is still `Ok`; `Err` is kept for
    /// problems on our side that [`ready`](Forwarder::ready) could not catch.
    async fn forward(&self, body: &Value) -> Result<Delivery, RelayError>;
}

/// Posts JSON payloads to a fixed URL.
pub struct HttpForwarder {
    name: &'static str,
    client: Client,
    /// Parse failures are kept and reported by `ready` on every submission.
    url: Result<Url, String>,
    bearer_token: Option<String>,
}

impl HttpForwarder {
    /// Forwarder for the CRM API, authenticated with a bearer token.
    pub fn crm(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: "systeme",
            client,
            url: parse_destination(url.into()),
            bearer_token: Some(api_key.into()),
        }
    }

    /// Forwarder for the automation webhook, which takes no credentials.
    pub fn automation(client: Client, url: impl Into<String>) -> Self {
        Self {
            name: "make",
            client,
            url: parse_destination(url.into()),
            bearer_token: None,
        }
    }

    fn destination(&self) -> Result<&Url, RelayError> {
        self.url
            .as_ref()
            .map_err(|reason| self.destination_error(reason))
    }

    fn destination_error(&self, reason: impl ToString) -> RelayError {
        RelayError::Destination {
            integration: self.name,
            reason: reason.to_string(),
        }
    }
}

/// Only absolute `http`/`https` URLs are usable destinations.
fn parse_destination(raw: String) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme {:?}", other)),
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn ready(&self) -> Result<(), RelayError> {
        self.destination().map(|_| ())
    }

    async fn forward(&self, body: &Value) -> Result<Delivery, RelayError> {
        let url = self.destination()?.clone();

        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.bearer_token {
            request = request
                .header(AUTHORIZATION, format!("Bearer {}", token))
                .header(ACCEPT, "application/json");
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let text = response.text().await.unwrap_or_default();
                Ok(Delivery::answered(status, text))
            }
            Err(e) if e.is_builder() => Err(self.destination_error(e)),
            Err(e) => {
                warn!("{} unreachable: {}", self.name, e);
                Ok(Delivery::unreachable(e.to_string()))
            }
        }
    }
}
