//! oEmbed lookup (see <https://oembed.com/>): match a URL against the provider
//! registry, fall back to discovery endpoints, fetch the payload.

pub mod errors;
pub mod executor;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod transport;
pub mod types;

pub use errors::{OembedError, RegistryLoadError, TransportError};
pub use executor::OembedFetcher;
pub use registry::{Endpoint, Provider, Registry, Scheme};
pub use resolver::Resolution;
pub use transport::{HttpTransport, Transmission, Transport};
pub use types::OembedData;
