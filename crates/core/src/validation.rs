//! Per-field validation for series form input.
//!
//! All checks operate on raw strings as the user typed them and return
//! either the normalized typed value or a display-ready message. Date
//! checks take `today` as a parameter so callers (and tests) control
//! the clock.

use chrono::NaiveDate;

use crate::category::Category;
use crate::error::CoreError;

/// Date format accepted by the form and used by the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The editable fields of a series record, in form display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    SeasonCount,
    ReleaseDate,
    Director,
    ProductionCompany,
    Category,
    WatchedDate,
}

impl Field {
    /// Every field, in form display order.
    pub const ALL: [Field; 7] = [
        Self::Title,
        Self::SeasonCount,
        Self::ReleaseDate,
        Self::Director,
        Self::ProductionCompany,
        Self::Category,
        Self::WatchedDate,
    ];

    /// Human-readable label for prompts and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::SeasonCount => "Season count",
            Self::ReleaseDate => "Release date",
            Self::Director => "Director",
            Self::ProductionCompany => "Production company",
            Self::Category => "Category",
            Self::WatchedDate => "Watched date",
        }
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Title: required after trimming, at least two characters.
pub fn check_title(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Title is required".into());
    }
    if trimmed.chars().count() < 2 {
        return Err("Title must be at least 2 characters".into());
    }
    Ok(trimmed.to_string())
}

/// Season count: required, a whole number, at least 1.
pub fn check_season_count(raw: &str) -> Result<i32, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Season count is required".into());
    }
    let count: i32 = trimmed
        .parse()
        .map_err(|_| "Season count must be a whole number".to_string())?;
    if count < 1 {
        return Err("Season count must be at least 1".into());
    }
    Ok(count)
}

/// Dates: required, `YYYY-MM-DD`, not after `today`.
///
/// `field` supplies the label so release and watched dates report
/// distinct messages.
pub fn check_date(raw: &str, field: Field, today: NaiveDate) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", field.label()));
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| format!("{} must be a valid date (YYYY-MM-DD)", field.label()))?;
    if date > today {
        return Err(format!("{} cannot be in the future", field.label()));
    }
    Ok(date)
}

/// Director and production company: required after trimming.
pub fn check_required_text(raw: &str, field: Field) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", field.label()));
    }
    Ok(trimmed.to_string())
}

/// Category: required, one of the ten known labels.
pub fn check_category(raw: &str) -> Result<Category, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Category is required".into());
    }
    Category::from_label(trimmed).map_err(|e| match e {
        CoreError::Validation(message) => message,
        other => other.to_string(),
    })
}

/// Validate one field's raw value, returning the message on failure.
pub fn validate_value(field: Field, raw: &str, today: NaiveDate) -> Option<String> {
    match field {
        Field::Title => check_title(raw).err(),
        Field::SeasonCount => check_season_count(raw).err(),
        Field::ReleaseDate => check_date(raw, field, today).err(),
        Field::Director => check_required_text(raw, field).err(),
        Field::ProductionCompany => check_required_text(raw, field).err(),
        Field::Category => check_category(raw).err(),
        Field::WatchedDate => check_date(raw, field, today).err(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
