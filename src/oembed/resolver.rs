use serde::Serialize;

use crate::oembed::errors::OembedError;
use crate::oembed::normalize::strip_www;
use crate::oembed::registry::Registry;

/// Where to ask for the oEmbed data of a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resolution", content = "endpoints", rename_all = "snake_case")]
pub enum Resolution<'r> {
    /// A provider scheme claimed the URL.
    Direct(&'r str),
    /// Nothing claimed the URL; discovery endpoints in the order they should be tried.
    Discovery(Vec<&'r str>),
}

impl Registry {
    /// Find the endpoint for `url`, or the discovery endpoints to fall back to.
    ///
    /// Providers, endpoints and schemes are walked in declaration order and the
    /// first matching scheme wins. When nothing matches, the discovery endpoints
    /// seen along the way are returned last-declared first.
    pub fn resolve(&self, url: &str) -> Result<Resolution<'_>, OembedError> {
        let normalized = strip_www(url);
        let mut discovery = Vec::new();

        for provider in self.providers() {
            for endpoint in &provider.endpoints {
                if endpoint.is_discovery_candidate() {
                    discovery.push(endpoint.url.as_str());
                }

                if let Some(scheme) = endpoint.schemes.iter().find(|s| s.is_match(&normalized)) {
                    log::debug!(
                        "{url} matched provider {:?} with scheme {}",
                        provider.name,
                        scheme.as_str()
                    );
                    return Ok(Resolution::Direct(&endpoint.url));
                }
            }
        }

        if discovery.is_empty() {
            return Err(OembedError::EndpointNotFound(url.to_string()));
        }

        // later declarations are tried first
        discovery.reverse();
        log::debug!("{url}: no provider matched, {} discovery endpoints", discovery.len());

        Ok(Resolution::Discovery(discovery))
    }
}
