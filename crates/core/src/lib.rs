//! Domain logic for the series tracker.
//!
//! Pure types and state machines with no I/O: the series record and
//! category set, per-field validation, the create/edit form state
//! machine, list filtering with confirmed deletion, and transient
//! notices. Everything here is usable from both the HTTP client layer
//! and the interactive shell.

pub mod category;
pub mod error;
pub mod form;
pub mod listing;
pub mod notice;
pub mod series;
pub mod types;
pub mod validation;

pub use category::Category;
pub use error::CoreError;
pub use series::{Series, SeriesDraft};
pub use types::SeriesId;
