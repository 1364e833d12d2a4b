//! Series category enumeration.
//!
//! The remote store and the UI agree on a fixed set of ten categories.
//! The serialized form is the display label (e.g. `"Science Fiction"`),
//! which is also what the store keeps in its `category` field.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The closed set of series categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Drama,
    Comedy,
    Action,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Horror,
    Romance,
    Documentary,
    Animation,
    Crime,
    Thriller,
}

impl Category {
    /// Every category, in picker display order.
    pub const ALL: [Category; 10] = [
        Self::Drama,
        Self::Comedy,
        Self::Action,
        Self::ScienceFiction,
        Self::Horror,
        Self::Romance,
        Self::Documentary,
        Self::Animation,
        Self::Crime,
        Self::Thriller,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Drama => "Drama",
            Self::Comedy => "Comedy",
            Self::Action => "Action",
            Self::ScienceFiction => "Science Fiction",
            Self::Horror => "Horror",
            Self::Romance => "Romance",
            Self::Documentary => "Documentary",
            Self::Animation => "Animation",
            Self::Crime => "Crime",
            Self::Thriller => "Thriller",
        }
    }

    /// Parse a category from its display label.
    pub fn from_label(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|c| c.label()).collect();
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
