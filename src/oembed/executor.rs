use std::sync::Arc;

use serde_json::Value;

use crate::oembed::errors::{OembedError, TransportError};
use crate::oembed::registry::Registry;
use crate::oembed::resolver::Resolution;
use crate::oembed::transport::{Transmission, Transport};
use crate::oembed::types::OembedData;

/// Resolves URLs against a shared [`Registry`] and fetches their oEmbed data.
///
/// Every call works on its own locals; the registry is only read, so one fetcher
/// can serve any number of concurrent lookups.
pub struct OembedFetcher<T> {
    registry: Arc<Registry>,
    transport: T,
}

impl<T: Transport> OembedFetcher<T> {
    pub fn new(registry: Arc<Registry>, transport: T) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `url` and fetch its oEmbed data from the matched endpoint, or
    /// from the first discovery endpoint that answers with an object.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_oembed_data(&self, url: &str) -> Result<OembedData, OembedError> {
        match self.registry.resolve(url)? {
            Resolution::Direct(endpoint) => self.fetch_direct(endpoint, url).await,
            Resolution::Discovery(candidates) => self.fetch_with_discovery(&candidates, url).await,
        }
    }

    /// Fetch from an endpoint that claimed `url`. The body-phase error is returned
    /// as-is when both transmissions fail.
    pub async fn fetch_direct(&self, endpoint: &str, url: &str) -> Result<OembedData, OembedError> {
        let value = self.fetch_endpoint(endpoint, url).await?;

        OembedData::from_value(value).ok_or_else(|| {
            log::warn!("{endpoint} answered with something other than an object for {url}");
            OembedError::NoOembedData(url.to_string())
        })
    }

    /// Try each candidate in turn until one answers with an object.
    ///
    /// Candidates are never queried concurrently and nothing after the first
    /// success is contacted.
    pub async fn fetch_with_discovery(
        &self,
        candidates: &[&str],
        url: &str,
    ) -> Result<OembedData, OembedError> {
        for endpoint in candidates {
            match self.fetch_endpoint(endpoint, url).await {
                Ok(value) => match OembedData::from_value(value) {
                    Some(data) => {
                        log::debug!("{url}: oEmbed data found via discovery endpoint {endpoint}");
                        return Ok(data);
                    }
                    None => log::debug!("{endpoint}: response for {url} is not an object, skipping"),
                },
                Err(err) => log::debug!("{endpoint}: no data for {url}: {err}"),
            }
        }

        Err(OembedError::NoOembedData(url.to_string()))
    }

    /// One candidate: query parameters first, form body if that fails.
    async fn fetch_endpoint(&self, endpoint: &str, url: &str) -> Result<Value, TransportError> {
        let params = [("url", url), ("format", "json")];

        match self
            .transport
            .fetch_page(endpoint, &params, Transmission::Query)
            .await
        {
            Ok(value) => Ok(value),
            Err(err) => {
                log::debug!("{endpoint}: query request failed ({err}), retrying with body");
                self.transport
                    .fetch_page(endpoint, &params, Transmission::Body)
                    .await
            }
        }
    }
}
