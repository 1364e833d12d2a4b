//! Application shell: mode decision, canonical state, and the boundary
//! where operation outcomes become notices and log events.
//!
//! The shell probes the store at startup and commits to the answer
//! until an explicit reload re-probes: [`StoreMode::Connected`] keeps
//! the remote store authoritative and applies each mutation locally
//! only after the store confirms it; [`StoreMode::LocalFallback`]
//! works entirely from the in-memory collection. Every mutation
//! produces exactly one tracing event and one transient notice here,
//! never in the layers below.

use std::time::Instant;

use showlog_client::{SeriesService, ServiceError};
use showlog_core::notice::{Notice, NoticeCenter};
use showlog_core::{CoreError, Series, SeriesDraft, SeriesId};

use crate::ids::IdAllocator;
use crate::store::{SeriesStore, StoreMode};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors surfaced by shell operations.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A remote operation failed; the collection was not touched.
    #[error(transparent)]
    Remote(#[from] ServiceError),

    /// A local collection operation failed.
    #[error(transparent)]
    Local(#[from] CoreError),
}

/// Convenience alias for shell operation results.
pub type ShellResult<T> = Result<T, ShellError>;

// ---------------------------------------------------------------------------
// AppShell
// ---------------------------------------------------------------------------

/// Owns the collection, the mode, the id policy, and the notices.
pub struct AppShell {
    service: SeriesService,
    mode: StoreMode,
    store: SeriesStore,
    ids: IdAllocator,
    notices: NoticeCenter,
}

impl AppShell {
    /// Probe the store once and build the shell in the mode the answer
    /// dictates. After startup the mode only changes through an
    /// explicit [`reload`](Self::reload).
    pub async fn start(service: SeriesService) -> Self {
        let mut shell = Self {
            service,
            mode: StoreMode::Connected,
            store: SeriesStore::default(),
            ids: IdAllocator::Remote,
            notices: NoticeCenter::new(),
        };

        if shell.service.test_connection().await {
            match shell.service.list().await {
                Ok(records) => {
                    tracing::info!(
                        url = shell.service.base_url(),
                        count = records.len(),
                        "Connected to series store"
                    );
                    shell.store = SeriesStore::new(records);
                    return shell;
                }
                Err(error) => {
                    tracing::warn!(%error, "Initial load failed after a successful probe");
                }
            }
        }

        shell.enter_fallback();
        shell
    }

    /// Switch to local-only operation on the seeded collection.
    fn enter_fallback(&mut self) {
        tracing::warn!(
            url = self.service.base_url(),
            "Series store unavailable, using local data"
        );
        let store = SeriesStore::seeded();
        self.ids = IdAllocator::local_seeded(store.all());
        self.store = store;
        self.mode = StoreMode::LocalFallback;
        self.notices.error(
            "Store unavailable. Changes will be kept in memory only.",
            Instant::now(),
        );
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    pub fn records(&self) -> &[Series] {
        self.store.all()
    }

    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.store.get(id)
    }

    pub fn base_url(&self) -> &str {
        self.service.base_url()
    }

    /// Currently visible notices, dropping expired ones first.
    pub fn notices(&mut self) -> &[Notice] {
        self.notices.active(Instant::now())
    }

    // -- mutations -----------------------------------------------------------

    /// Create a record from a validated draft and return its id.
    ///
    /// Connected mode appends the record the store answered with, so
    /// the id is always the store's. Fallback mode assigns the next
    /// local id.
    pub async fn create(&mut self, draft: SeriesDraft) -> ShellResult<SeriesId> {
        let title = draft.title.clone();
        let result = self.create_inner(draft).await;
        match &result {
            Ok(id) => {
                tracing::info!(id, title = %title, "Series created");
                self.notices
                    .success(format!("Series \"{title}\" created"), Instant::now());
            }
            Err(error) => {
                tracing::error!(%error, "Series create failed");
                self.notices.error(error.to_string(), Instant::now());
            }
        }
        result
    }

    async fn create_inner(&mut self, draft: SeriesDraft) -> ShellResult<SeriesId> {
        let created = match self.ids.allocate() {
            // Id assignment is the store's; apply only what it confirms.
            None => self.service.create(draft).await?,
            Some(id) => Series::from_draft(id, draft),
        };
        let id = created.id;
        self.store.insert(created);
        Ok(id)
    }

    /// Replace a record with the edited version.
    ///
    /// Connected mode sends the full record to the store first; once
    /// the store confirms, the collection adopts the record even if it
    /// held no copy before (edits can start from a record fetched
    /// straight off the store). On failure the collection keeps the
    /// previous version.
    pub async fn update(&mut self, record: Series) -> ShellResult<()> {
        let id = record.id;
        let title = record.title.clone();
        let result = self.update_inner(record).await;
        match &result {
            Ok(()) => {
                tracing::info!(id, title = %title, "Series updated");
                self.notices
                    .success(format!("Series \"{title}\" updated"), Instant::now());
            }
            Err(error) => {
                tracing::error!(id, %error, "Series update failed");
                self.notices.error(error.to_string(), Instant::now());
            }
        }
        result
    }

    async fn update_inner(&mut self, record: Series) -> ShellResult<()> {
        if self.mode == StoreMode::Connected {
            self.service.update(record.clone()).await?;
            self.store.upsert(record);
        } else {
            self.store.replace(record)?;
        }
        Ok(())
    }

    /// Delete a record by id. Confirmation is the caller's business;
    /// by the time this runs the decision has been made.
    pub async fn delete(&mut self, id: SeriesId) -> ShellResult<()> {
        let title = self.store.get(id).map(|s| s.title.clone());
        let result = self.delete_inner(id).await;
        match &result {
            Ok(()) => match &title {
                Some(title) => {
                    tracing::info!(id, title = %title, "Series deleted");
                    self.notices
                        .success(format!("Series \"{title}\" deleted"), Instant::now());
                }
                None => {
                    tracing::info!(id, "Series deleted");
                    self.notices
                        .success(format!("Series {id} deleted"), Instant::now());
                }
            },
            Err(error) => {
                tracing::error!(id, %error, "Series delete failed");
                self.notices.error(error.to_string(), Instant::now());
            }
        }
        result
    }

    async fn delete_inner(&mut self, id: SeriesId) -> ShellResult<()> {
        if self.mode == StoreMode::Connected {
            self.service.delete(id).await?;
            // The store confirmed; a record the collection never held
            // is already gone.
            let _ = self.store.remove(id);
        } else {
            self.store.remove(id)?;
        }
        Ok(())
    }

    // -- reads ---------------------------------------------------------------

    /// Re-run the startup probe and adopt whatever mode it dictates;
    /// this is the only way the mode changes after startup. Falling
    /// back discards the collection in favour of the seed records,
    /// exactly as a fresh start would. Returns the record count now
    /// held.
    pub async fn reload(&mut self) -> ShellResult<usize> {
        if self.service.test_connection().await {
            match self.service.list().await {
                Ok(records) => {
                    let count = records.len();
                    let reconnected = self.mode == StoreMode::LocalFallback;
                    self.mode = StoreMode::Connected;
                    self.ids = IdAllocator::Remote;
                    self.store = SeriesStore::new(records);
                    tracing::info!(count, reconnected, "Collection reloaded from store");
                    if reconnected {
                        self.notices
                            .success("Reconnected to the store.", Instant::now());
                    }
                    Ok(count)
                }
                Err(error) => {
                    // The probe passed but the load did not; keep what
                    // we have rather than half-applying the reload.
                    tracing::error!(%error, "Collection reload failed");
                    self.notices.error(error.to_string(), Instant::now());
                    Err(error.into())
                }
            }
        } else {
            self.enter_fallback();
            Ok(self.store.len())
        }
    }

    /// The record an edit form should start from. Connected mode asks
    /// the store so the form opens on the current remote copy.
    pub async fn fetch_for_edit(&mut self, id: SeriesId) -> ShellResult<Series> {
        let result = match self.mode {
            StoreMode::Connected => self.service.get_by_id(id).await.map_err(ShellError::from),
            StoreMode::LocalFallback => self.store.get(id).cloned().ok_or_else(|| {
                ShellError::from(CoreError::NotFound {
                    entity: "series",
                    id,
                })
            }),
        };
        if let Err(error) = &result {
            tracing::error!(id, %error, "Could not load series for editing");
            self.notices.error(error.to_string(), Instant::now());
        }
        result
    }
}
