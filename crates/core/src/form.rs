//! Create/edit form state machine.
//!
//! [`SeriesForm`] holds raw string values as the user typed them,
//! per-field errors, and which fields have been touched. Validation
//! timing follows the usual form contract: a field is only re-checked
//! while typing once it has been touched (blurred), and submit checks
//! everything. A submit that fails validation produces no output at
//! all; callers never see a half-valid record.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::series::{Series, SeriesDraft};
use crate::types::SeriesId;
use crate::validation::{
    check_category, check_date, check_required_text, check_season_count, check_title,
    validate_value, Field, DATE_FORMAT,
};

/// Whether the form creates a new record or edits an existing one.
///
/// Edit mode carries the record id; an edited record keeps its id no
/// matter what else changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: SeriesId },
}

/// The normalized result of a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutput {
    /// Create mode: a draft for the id allocator / store to complete.
    Create(SeriesDraft),
    /// Edit mode: the full record, id preserved.
    Update(Series),
}

/// UI-independent state for the series create/edit form.
#[derive(Debug, Clone)]
pub struct SeriesForm {
    mode: FormMode,
    values: HashMap<Field, String>,
    errors: HashMap<Field, String>,
    touched: HashSet<Field>,
    submitting: bool,
}

impl SeriesForm {
    /// A blank create-mode form.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: HashMap::new(),
            errors: HashMap::new(),
            touched: HashSet::new(),
            submitting: false,
        }
    }

    /// An edit-mode form seeded from an existing record.
    pub fn edit(series: &Series) -> Self {
        let mut values = HashMap::new();
        values.insert(Field::Title, series.title.clone());
        values.insert(Field::SeasonCount, series.season_count.to_string());
        values.insert(
            Field::ReleaseDate,
            series.release_date.format(DATE_FORMAT).to_string(),
        );
        values.insert(Field::Director, series.director.clone());
        values.insert(Field::ProductionCompany, series.production_company.clone());
        values.insert(Field::Category, series.category.label().to_string());
        values.insert(
            Field::WatchedDate,
            series.watched_date.format(DATE_FORMAT).to_string(),
        );

        Self {
            mode: FormMode::Edit { id: series.id },
            values,
            errors: HashMap::new(),
            touched: HashSet::new(),
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Raw value for a field ("" when never set).
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Current error message for a field, if any.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Update a field as the user types.
    ///
    /// Only re-validates once the field has been touched, so a field
    /// the user is still filling in for the first time stays quiet.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>, today: NaiveDate) {
        self.values.insert(field, value.into());
        if self.touched.contains(&field) {
            self.validate_field(field, today);
        }
    }

    /// Mark a field as touched (the user left it) and validate it.
    pub fn touch(&mut self, field: Field, today: NaiveDate) {
        self.touched.insert(field);
        self.validate_field(field, today);
    }

    /// Validate everything and produce the normalized output.
    ///
    /// On any invalid field: every error is recorded, every field is
    /// marked touched, and `None` is returned, so the caller must not
    /// act. On success the submission-in-progress flag is raised; the
    /// caller reports back via [`complete_submit`](Self::complete_submit)
    /// or [`fail_submit`](Self::fail_submit). While the flag is up,
    /// further submits return `None`.
    pub fn submit(&mut self, today: NaiveDate) -> Option<FormOutput> {
        if self.submitting {
            return None;
        }

        match self.normalize(today) {
            Ok(draft) => {
                self.errors.clear();
                self.submitting = true;
                Some(match self.mode {
                    FormMode::Create => FormOutput::Create(draft),
                    FormMode::Edit { id } => FormOutput::Update(Series::from_draft(id, draft)),
                })
            }
            Err(errors) => {
                self.errors = errors.into_iter().collect();
                self.touched.extend(Field::ALL);
                None
            }
        }
    }

    /// The submission succeeded: a create-mode form resets for the next
    /// entry, an edit-mode form is done (the caller navigates away).
    pub fn complete_submit(&mut self) {
        self.submitting = false;
        if self.mode == FormMode::Create {
            self.reset();
        }
    }

    /// The submission failed remotely: keep all values and errors so
    /// the user can retry.
    pub fn fail_submit(&mut self) {
        self.submitting = false;
    }

    /// Clear values, errors, and touched state (mode is kept).
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.touched.clear();
        self.submitting = false;
    }

    fn validate_field(&mut self, field: Field, today: NaiveDate) {
        match validate_value(field, self.value(field), today) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Run every field check once, collecting either the typed draft or
    /// all failure messages.
    fn normalize(&self, today: NaiveDate) -> Result<SeriesDraft, Vec<(Field, String)>> {
        let title = check_title(self.value(Field::Title));
        let season_count = check_season_count(self.value(Field::SeasonCount));
        let release_date = check_date(self.value(Field::ReleaseDate), Field::ReleaseDate, today);
        let director = check_required_text(self.value(Field::Director), Field::Director);
        let production_company = check_required_text(
            self.value(Field::ProductionCompany),
            Field::ProductionCompany,
        );
        let category = check_category(self.value(Field::Category));
        let watched_date = check_date(self.value(Field::WatchedDate), Field::WatchedDate, today);

        match (
            title,
            season_count,
            release_date,
            director,
            production_company,
            category,
            watched_date,
        ) {
            (
                Ok(title),
                Ok(season_count),
                Ok(release_date),
                Ok(director),
                Ok(production_company),
                Ok(category),
                Ok(watched_date),
            ) => Ok(SeriesDraft {
                title,
                season_count,
                release_date,
                director,
                production_company,
                category,
                watched_date,
            }),
            (title, season_count, release_date, director, production_company, category, watched_date) => {
                let mut errors = Vec::new();
                let mut push = |field: Field, result: Option<String>| {
                    if let Some(message) = result {
                        errors.push((field, message));
                    }
                };
                push(Field::Title, title.err());
                push(Field::SeasonCount, season_count.err());
                push(Field::ReleaseDate, release_date.err());
                push(Field::Director, director.err());
                push(Field::ProductionCompany, production_company.err());
                push(Field::Category, category.err());
                push(Field::WatchedDate, watched_date.err());
                Err(errors)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
