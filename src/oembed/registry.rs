use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::oembed::errors::RegistryLoadError;
use crate::oembed::normalize::{escape_scheme, strip_www_escaped};

/// Descriptor shipped with the binary, in the oembed.com `providers.json` format.
const BUNDLED_PROVIDERS: &str = include_str!("./providers.json");

#[derive(Debug, Deserialize)]
struct ProviderRecord {
    #[serde(default, alias = "provider_name")]
    name: String,
    #[serde(default, alias = "provider_url")]
    url: Option<String>,
    endpoints: Vec<EndpointRecord>,
}

#[derive(Debug, Deserialize)]
struct EndpointRecord {
    url: String,
    #[serde(default)]
    schemes: Vec<String>,
    #[serde(default)]
    discovery: bool,
}

/// A provider scheme, escaped once at load time and compiled for matching.
#[derive(Debug, Clone)]
pub struct Scheme {
    pattern: String,
    matcher: Regex,
}

impl Scheme {
    fn compile(raw: &str) -> Result<Self, regex::Error> {
        let pattern = escape_scheme(raw);
        // anchored at the start only: schemes match as URL prefixes
        let matcher = Regex::new(&format!("^(?:{})", strip_www_escaped(&pattern)))?;

        Ok(Self { pattern, matcher })
    }

    /// The escaped scheme, as preprocessed at load time.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Match against a URL that already went through `normalize::strip_www`.
    pub fn is_match(&self, normalized_url: &str) -> bool {
        self.matcher.is_match(normalized_url)
    }
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: String,
    pub schemes: Vec<Scheme>,
    pub discovery: bool,
}

impl Endpoint {
    /// A last-resort endpoint: flagged for discovery and claiming no URL pattern.
    pub fn is_discovery_candidate(&self) -> bool {
        self.discovery && self.schemes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Provider {
    pub name: String,
    pub url: Option<String>,
    pub endpoints: Vec<Endpoint>,
}

/// Immutable, matching-ready provider list.
///
/// Built once at startup and shared read-only (usually behind an `Arc`) by every
/// lookup for the rest of the process.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    providers: Vec<Provider>,
}

impl Registry {
    /// Load the descriptor bundled into the binary.
    pub fn bundled() -> Result<Self, RegistryLoadError> {
        Self::from_slice(BUNDLED_PROVIDERS.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| RegistryLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = Self::from_slice(&bytes)?;
        log::debug!("loaded {} oEmbed providers from {:?}", registry.len(), path);
        Ok(registry)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, RegistryLoadError> {
        let records: Vec<ProviderRecord> = serde_json::from_slice(bytes)?;

        let providers = records
            .into_iter()
            .map(Provider::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { providers })
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn provider(&self, name: &str) -> Option<&Provider> {
        self.providers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Discovery endpoints in declaration order, paired with their provider.
    pub fn discovery_endpoints(&self) -> impl Iterator<Item = (&Provider, &Endpoint)> {
        self.providers.iter().flat_map(|provider| {
            provider
                .endpoints
                .iter()
                .filter(|endpoint| endpoint.is_discovery_candidate())
                .map(move |endpoint| (provider, endpoint))
        })
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl TryFrom<ProviderRecord> for Provider {
    type Error = RegistryLoadError;

    fn try_from(record: ProviderRecord) -> Result<Self, Self::Error> {
        let mut endpoints = Vec::with_capacity(record.endpoints.len());

        for endpoint in record.endpoints {
            let schemes = endpoint
                .schemes
                .iter()
                .map(|raw| {
                    Scheme::compile(raw).map_err(|source| RegistryLoadError::InvalidScheme {
                        provider: record.name.clone(),
                        scheme: raw.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            endpoints.push(Endpoint {
                url: endpoint.url,
                schemes,
                discovery: endpoint.discovery,
            });
        }

        Ok(Provider {
            name: record.name,
            url: record.url,
            endpoints,
        })
    }
}
