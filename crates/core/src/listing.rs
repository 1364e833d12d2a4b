//! List view state: search, category filter, and confirmed deletion.
//!
//! [`SeriesList`] never owns the collection; it holds the filter inputs
//! and the pending-delete stage, and is applied to whatever slice the
//! shell currently owns.

use crate::category::Category;
use crate::series::Series;
use crate::types::SeriesId;

/// Check one record against the combined filters.
///
/// The search matches case-insensitively as a substring of the title,
/// the director, or the production company. The category filter is an
/// equality check. Both must pass; the two checks are independent, so
/// applying them in either order yields the same visible set.
pub fn matches(series: &Series, query: &str, category: Option<Category>) -> bool {
    let query = query.trim().to_lowercase();
    let matches_search = query.is_empty()
        || series.title.to_lowercase().contains(&query)
        || series.director.to_lowercase().contains(&query)
        || series.production_company.to_lowercase().contains(&query);
    let matches_category = category.map_or(true, |c| series.category == c);
    matches_search && matches_category
}

/// Filter and delete-confirmation state for the series list.
#[derive(Debug, Clone, Default)]
pub struct SeriesList {
    query: String,
    category: Option<Category>,
    pending_delete: Option<SeriesId>,
}

impl SeriesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    /// Reset both filters ("clear filters").
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.category = None;
    }

    /// The records passing both filters, in collection order.
    pub fn visible<'a>(&self, all: &'a [Series]) -> Vec<&'a Series> {
        all.iter()
            .filter(|s| matches(s, &self.query, self.category))
            .collect()
    }

    /// `(visible, total)` counts for the "2 of 5 series" readout.
    pub fn counts(&self, all: &[Series]) -> (usize, usize) {
        (self.visible(all).len(), all.len())
    }

    /// Distinct categories present in the collection, in picker order.
    pub fn categories_present(all: &[Series]) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| all.iter().any(|s| s.category == *c))
            .collect()
    }

    // -- two-phase deletion --------------------------------------------------

    /// Stage a deletion, returning the record so the caller can show a
    /// confirmation prompt with its title. Unknown ids are ignored.
    pub fn request_delete<'a>(&mut self, all: &'a [Series], id: SeriesId) -> Option<&'a Series> {
        let record = all.iter().find(|s| s.id == id)?;
        self.pending_delete = Some(id);
        Some(record)
    }

    pub fn pending_delete(&self) -> Option<SeriesId> {
        self.pending_delete
    }

    /// Confirm the staged deletion, yielding the id exactly once.
    pub fn confirm_delete(&mut self) -> Option<SeriesId> {
        self.pending_delete.take()
    }

    /// Drop the staged deletion without yielding anything.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
