//! Record-level operations over the store transport.
//!
//! [`SeriesService`] is the only surface the application talks to:
//! it converts between domain and wire records, wraps every transport
//! failure with the operation it interrupted, and tolerates malformed
//! collection payloads instead of failing the whole listing.

use showlog_core::{Series, SeriesDraft, SeriesId};

use crate::transport::{StoreTransport, TransportError};
use crate::wire::{WireSeries, WireSeriesDraft};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A transport failure tagged with the operation that hit it.
///
/// The rendered message is always `context: cause`, so callers can
/// surface it verbatim without knowing which layer produced the cause.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to list series: {source}")]
    List {
        #[source]
        source: TransportError,
    },

    #[error("Failed to fetch series {id}: {source}")]
    Fetch {
        id: SeriesId,
        #[source]
        source: TransportError,
    },

    #[error("Failed to create series: {source}")]
    Create {
        #[source]
        source: TransportError,
    },

    #[error("Failed to update series {id}: {source}")]
    Update {
        id: SeriesId,
        #[source]
        source: TransportError,
    },

    #[error("Failed to delete series {id}: {source}")]
    Delete {
        id: SeriesId,
        #[source]
        source: TransportError,
    },
}

impl ServiceError {
    /// The transport failure underneath, regardless of operation.
    pub fn transport(&self) -> &TransportError {
        match self {
            ServiceError::List { source }
            | ServiceError::Fetch { source, .. }
            | ServiceError::Create { source }
            | ServiceError::Update { source, .. }
            | ServiceError::Delete { source, .. } => source,
        }
    }
}

// ---------------------------------------------------------------------------
// SeriesService
// ---------------------------------------------------------------------------

/// CRUD operations on the series collection.
pub struct SeriesService {
    transport: StoreTransport,
}

impl SeriesService {
    pub fn new(transport: StoreTransport) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Fetch every record in the collection.
    ///
    /// A non-array body is treated as an empty collection and logged;
    /// elements that fail to decode are skipped and logged. Only a
    /// transport failure surfaces as an error.
    pub async fn list(&self) -> Result<Vec<Series>, ServiceError> {
        let raw = self
            .transport
            .list()
            .await
            .map_err(|source| ServiceError::List { source })?;
        Ok(decode_collection(raw))
    }

    /// Fetch one record by id.
    pub async fn get_by_id(&self, id: SeriesId) -> Result<Series, ServiceError> {
        let wire = self
            .transport
            .fetch(id)
            .await
            .map_err(|source| ServiceError::Fetch { id, source })?;
        Ok(wire.into())
    }

    /// Create a record from a validated draft. The store assigns the id
    /// and the stored record is returned.
    pub async fn create(&self, draft: SeriesDraft) -> Result<Series, ServiceError> {
        let wire = self
            .transport
            .create(&WireSeriesDraft::from(draft))
            .await
            .map_err(|source| ServiceError::Create { source })?;
        Ok(wire.into())
    }

    /// Replace a record with the full updated version. Returns the
    /// record as the store now holds it.
    pub async fn update(&self, record: Series) -> Result<Series, ServiceError> {
        let id = record.id;
        let wire = self
            .transport
            .update(&WireSeries::from(record))
            .await
            .map_err(|source| ServiceError::Update { id, source })?;
        Ok(wire.into())
    }

    /// Delete a record by id.
    pub async fn delete(&self, id: SeriesId) -> Result<(), ServiceError> {
        self.transport
            .delete(id)
            .await
            .map_err(|source| ServiceError::Delete { id, source })
    }

    /// Probe whether the store is reachable and answering.
    ///
    /// Never fails; the cause of a negative answer is logged here
    /// because the boolean cannot carry it.
    pub async fn test_connection(&self) -> bool {
        match self.transport.list().await {
            Ok(_) => true,
            Err(error) => {
                tracing::warn!(url = self.transport.base_url(), %error, "Store probe failed");
                false
            }
        }
    }
}

/// Decode a collection body element by element, dropping what does not
/// parse rather than failing the listing.
fn decode_collection(raw: serde_json::Value) -> Vec<Series> {
    let serde_json::Value::Array(items) = raw else {
        tracing::warn!("Store returned a non-array collection body, treating as empty");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<WireSeries>(item) {
            Ok(wire) => Some(Series::from(wire)),
            Err(error) => {
                tracing::warn!(%error, "Skipping malformed record in collection body");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
