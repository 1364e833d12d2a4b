//! Series record types.
//!
//! [`Series`] is the canonical in-memory record; [`SeriesDraft`] is the
//! same data before an id exists (what a create submits). The wire-side
//! representation with the store's field names lives in the client
//! crate, not here.

use chrono::NaiveDate;

use crate::category::Category;
use crate::types::SeriesId;

/// A tracked series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    pub season_count: i32,
    pub release_date: NaiveDate,
    pub director: String,
    pub production_company: String,
    pub category: Category,
    pub watched_date: NaiveDate,
}

/// A series without an id yet.
///
/// Ids are assigned elsewhere: by the store on create when connected,
/// or by the local allocator when offline.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDraft {
    pub title: String,
    pub season_count: i32,
    pub release_date: NaiveDate,
    pub director: String,
    pub production_company: String,
    pub category: Category,
    pub watched_date: NaiveDate,
}

impl Series {
    /// Attach an id to a draft.
    pub fn from_draft(id: SeriesId, draft: SeriesDraft) -> Self {
        Self {
            id,
            title: draft.title,
            season_count: draft.season_count,
            release_date: draft.release_date,
            director: draft.director,
            production_company: draft.production_company,
            category: draft.category,
            watched_date: draft.watched_date,
        }
    }
}
