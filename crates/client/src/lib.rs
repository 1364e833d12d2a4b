//! HTTP client for the series store.
//!
//! Talks to the REST resource at `/series`: [`transport`] holds the
//! raw HTTP layer and failure classification, [`wire`] the store's
//! field vocabulary, and [`service`] the record-level operations the
//! application consumes.

pub mod service;
pub mod transport;
pub mod wire;

pub use service::{SeriesService, ServiceError};
pub use transport::{StoreTransport, TransportError, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use wire::{WireSeries, WireSeriesDraft};
