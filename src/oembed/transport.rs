use std::error::Error;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::oembed::errors::TransportError;

/// How the request parameters travel to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transmission {
    /// `GET` with the parameters in the query string.
    Query,
    /// `POST` with the parameters as a form-encoded body.
    Body,
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transmission::Query => write!(f, "query"),
            Transmission::Body => write!(f, "body"),
        }
    }
}

/// Fetch a page and parse it as JSON.
///
/// The pipeline only decides which endpoint to call and how to send the
/// parameters; opening connections, timeouts and decoding are up to the
/// implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_page(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        mode: Transmission,
    ) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn fetch_page(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        mode: Transmission,
    ) -> Result<Value, TransportError> {
        (**self).fetch_page(endpoint, params, mode).await
    }
}

/// [`Transport`] over an async reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(10));

        if let Some(proxy) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
            log::debug!("using proxy {proxy:?}");
            client = client.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: client.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_page(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        mode: Transmission,
    ) -> Result<Value, TransportError> {
        let request = match mode {
            Transmission::Query => self.client.get(endpoint).query(params),
            Transmission::Body => self.client.post(endpoint).form(params),
        };

        log::debug!("{endpoint}: requesting ({mode})");

        let response = request.send().await.map_err(|err| {
            log::debug!("{endpoint}: {}", get_error(&err));
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Innermost useful message of a reqwest error chain.
fn get_error(error: &reqwest::Error) -> String {
    match error.source() {
        Some(e) => match e.source() {
            Some(e) => e.to_string(),
            None => e.to_string(),
        },
        None => error.to_string(),
    }
}
