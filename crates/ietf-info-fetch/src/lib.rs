//! Remote lookups: a `Fetcher` transport seam, text decoding, and the
//! per-document metadata / acknowledgment / ballot lookups.

mod decode;
mod fetcher;
mod lookup;

#[cfg(feature = "http")]
mod http;
#[cfg(any(test, feature = "memory"))]
mod memory;

pub use decode::{DecodeError, decode_text};
pub use fetcher::{FetchError, Fetcher};
pub use lookup::{DATATRACKER_URL, Endpoints, LookupClient, LookupError, Metadata, RFC_EDITOR_URL};

#[cfg(feature = "http")]
pub use http::{DEFAULT_TIMEOUT, HttpFetcher};
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryFetcher;
