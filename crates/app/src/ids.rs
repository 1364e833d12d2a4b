//! Id assignment policy for new records.
//!
//! Connected mode delegates assignment to the store; local fallback
//! hands out ids from a monotonic counter seeded past the highest id
//! already held. A local id is never reused within a session, even
//! after the record it was given to is deleted.

use showlog_core::{Series, SeriesId};

/// Where new record ids come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdAllocator {
    /// The store assigns ids on create; the application never invents one.
    Remote,
    /// Ids are handed out locally from a monotonic counter.
    Local { next: SeriesId },
}

impl IdAllocator {
    /// Local allocator starting one past the highest id in `records`.
    pub fn local_seeded(records: &[Series]) -> Self {
        let highest = records.iter().map(|s| s.id).max().unwrap_or(0);
        IdAllocator::Local { next: highest + 1 }
    }

    /// Allocate the next id, or `None` when assignment is delegated to
    /// the store.
    pub fn allocate(&mut self) -> Option<SeriesId> {
        match self {
            IdAllocator::Remote => None,
            IdAllocator::Local { next } => {
                let id = *next;
                *next += 1;
                Some(id)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
