//! Wire representation of a series record.
//!
//! The store names its fields differently from the domain model
//! (`seasons` instead of `season_count`, `production` instead of
//! `production_company`, `watchedAt` instead of `watched_date`). The
//! types here carry the store's names; the [`From`] impls are the only
//! place the two vocabularies meet, and they are exact inverses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use showlog_core::{Category, Series, SeriesDraft, SeriesId};

/// A series record as the store sends and expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSeries {
    pub id: SeriesId,
    pub title: String,
    pub seasons: i32,
    pub release_date: NaiveDate,
    pub director: String,
    pub production: String,
    pub category: Category,
    pub watched_at: NaiveDate,
}

/// Payload for creating a record. Carries no `id`; the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSeriesDraft {
    pub title: String,
    pub seasons: i32,
    pub release_date: NaiveDate,
    pub director: String,
    pub production: String,
    pub category: Category,
    pub watched_at: NaiveDate,
}

impl From<Series> for WireSeries {
    fn from(series: Series) -> Self {
        Self {
            id: series.id,
            title: series.title,
            seasons: series.season_count,
            release_date: series.release_date,
            director: series.director,
            production: series.production_company,
            category: series.category,
            watched_at: series.watched_date,
        }
    }
}

impl From<WireSeries> for Series {
    fn from(wire: WireSeries) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            season_count: wire.seasons,
            release_date: wire.release_date,
            director: wire.director,
            production_company: wire.production,
            category: wire.category,
            watched_date: wire.watched_at,
        }
    }
}

impl From<SeriesDraft> for WireSeriesDraft {
    fn from(draft: SeriesDraft) -> Self {
        Self {
            title: draft.title,
            seasons: draft.season_count,
            release_date: draft.release_date,
            director: draft.director,
            production: draft.production_company,
            category: draft.category,
            watched_at: draft.watched_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        Series {
            id: 1,
            title: "Breaking Bad".into(),
            season_count: 5,
            release_date: NaiveDate::from_ymd_opt(2008, 1, 20).unwrap(),
            director: "Vince Gilligan".into(),
            production_company: "Sony Pictures".into(),
            category: Category::Drama,
            watched_date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
        }
    }

    #[test]
    fn serializes_with_store_field_names() {
        let wire = WireSeries::from(sample());
        let json = serde_json::to_value(&wire).unwrap();

        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in [
            "id",
            "title",
            "seasons",
            "releaseDate",
            "director",
            "production",
            "category",
            "watchedAt",
        ] {
            assert!(keys.contains(&key), "missing wire key {key}");
        }
        assert_eq!(keys.len(), 8);

        assert_eq!(json["seasons"], 5);
        assert_eq!(json["releaseDate"], "2008-01-20");
        assert_eq!(json["production"], "Sony Pictures");
        assert_eq!(json["watchedAt"], "2023-06-15");
    }

    #[test]
    fn category_uses_display_labels_on_the_wire() {
        let mut series = sample();
        series.category = Category::ScienceFiction;
        let json = serde_json::to_value(WireSeries::from(series)).unwrap();
        assert_eq!(json["category"], "Science Fiction");
    }

    #[test]
    fn mapping_round_trips_exactly() {
        let original = sample();
        let back = Series::from(WireSeries::from(original.clone()));
        assert_eq!(back, original);
    }

    #[test]
    fn draft_payload_carries_no_id() {
        let Series {
            title,
            season_count,
            release_date,
            director,
            production_company,
            category,
            watched_date,
            ..
        } = sample();
        let draft = SeriesDraft {
            title,
            season_count,
            release_date,
            director,
            production_company,
            category,
            watched_date,
        };

        let json = serde_json::to_value(WireSeriesDraft::from(draft)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json.as_object().unwrap().len(), 7);
    }
}
