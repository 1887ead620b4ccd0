use std::path::PathBuf;

/// Failure to build the provider registry. Fatal at startup.
#[derive(thiserror::Error, Debug)]
pub enum RegistryLoadError {
    #[error("failed to read provider descriptor {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed provider descriptor: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("provider {provider:?} has an invalid scheme {scheme:?}: {source}")]
    InvalidScheme {
        provider: String,
        scheme: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure of a single fetch attempt against one endpoint.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
}

#[derive(thiserror::Error, Debug)]
pub enum OembedError {
    #[error("No endpoint has been found that matches the url \"{0}\"")]
    EndpointNotFound(String),

    #[error("Failed to retrieve oembed data for the url \"{0}\"")]
    NoOembedData(String),

    #[error("oembed request failed: {0}")]
    Transport(#[from] TransportError),
}
