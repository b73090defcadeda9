//! Band info record and model-reply parsing
//!
//! The model's reply is untrusted text. It is accepted only when it is a single
//! JSON object matching the band schema; anything else is rejected whole.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed number of band members
pub const BAND_MEMBERS_RANGE: std::ops::RangeInclusive<usize> = 1..=5;

/// Required number of top songs
pub const TOP_SONGS_COUNT: usize = 5;

/// Required number of related bands
pub const RELATED_BANDS_COUNT: usize = 5;

/// Errors parsing a model reply into [`BandInfo`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BandInfoError {
    /// Reply is not a JSON document
    #[error("model reply is not valid JSON: {0}")]
    InvalidJson(String),

    /// Reply is JSON but does not match the band schema
    #[error("model reply does not match band schema: {0}")]
    Schema(String),
}

/// A fictional band for a genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandInfo {
    /// Genre the band was invented for; always the requested genre
    pub genre: String,
    pub band_name: String,
    /// 1 to 5 members
    pub band_members: Vec<String>,
    /// Exactly 5 songs
    pub top_songs: Vec<String>,
    /// Exactly 5 bands
    pub related_bands: Vec<String>,
    /// YYYY-MM-DD
    pub next_tour_date: String,
}

/// Fields the model is asked to produce. Any other key, `genre` included, is ignored.
#[derive(Debug, Deserialize)]
struct ModelBandReply {
    band_name: String,
    band_members: Vec<String>,
    top_songs: Vec<String>,
    related_bands: Vec<String>,
    next_tour_date: String,
}

impl BandInfo {
    /// Parse and validate a raw model reply, attaching `genre`
    pub fn from_model_reply(genre: &str, reply: &str) -> Result<Self, BandInfoError> {
        let value: serde_json::Value = serde_json::from_str(reply)
            .map_err(|e| BandInfoError::InvalidJson(e.to_string()))?;

        if !value.is_object() {
            return Err(BandInfoError::Schema("expected a JSON object".to_string()));
        }

        let parsed: ModelBandReply =
            serde_json::from_value(value).map_err(|e| BandInfoError::Schema(e.to_string()))?;

        if parsed.band_name.trim().is_empty() {
            return Err(BandInfoError::Schema("band_name is empty".to_string()));
        }

        if !BAND_MEMBERS_RANGE.contains(&parsed.band_members.len()) {
            return Err(BandInfoError::Schema(format!(
                "band_members must have {} to {} entries, got {}",
                BAND_MEMBERS_RANGE.start(),
                BAND_MEMBERS_RANGE.end(),
                parsed.band_members.len()
            )));
        }

        check_count("top_songs", &parsed.top_songs, TOP_SONGS_COUNT)?;
        check_count("related_bands", &parsed.related_bands, RELATED_BANDS_COUNT)?;

        NaiveDate::parse_from_str(&parsed.next_tour_date, "%Y-%m-%d").map_err(|e| {
            BandInfoError::Schema(format!(
                "next_tour_date {:?} is not YYYY-MM-DD: {}",
                parsed.next_tour_date, e
            ))
        })?;

        Ok(Self {
            genre: genre.to_string(),
            band_name: parsed.band_name,
            band_members: parsed.band_members,
            top_songs: parsed.top_songs,
            related_bands: parsed.related_bands,
            next_tour_date: parsed.next_tour_date,
        })
    }
}

fn check_count(field: &str, values: &[String], expected: usize) -> Result<(), BandInfoError> {
    if values.len() != expected {
        return Err(BandInfoError::Schema(format!(
            "{} must have exactly {} entries, got {}",
            field,
            expected,
            values.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_reply() -> serde_json::Value {
        json!({
            "band_name": "Test",
            "band_members": ["A"],
            "top_songs": ["1", "2", "3", "4", "5"],
            "related_bands": ["X", "Y", "Z", "W", "V"],
            "next_tour_date": "2025-01-01"
        })
    }

    #[test]
    fn test_valid_reply() {
        let info = BandInfo::from_model_reply("Glitch Fado", &valid_reply().to_string()).unwrap();
        assert_eq!(info.genre, "Glitch Fado");
        assert_eq!(info.band_name, "Test");
        assert_eq!(info.band_members, vec!["A"]);
        assert_eq!(info.next_tour_date, "2025-01-01");
    }

    #[test]
    fn test_model_genre_is_overwritten() {
        let mut reply = valid_reply();
        reply["genre"] = json!("Polka");
        let info = BandInfo::from_model_reply("Glitch Fado", &reply.to_string()).unwrap();
        assert_eq!(info.genre, "Glitch Fado");
    }

    #[test]
    fn test_surrounding_whitespace_is_accepted() {
        let reply = format!("\n  {}  \n", valid_reply());
        assert!(BandInfo::from_model_reply("Dub", &reply).is_ok());
    }

    #[test]
    fn test_not_json() {
        let err = BandInfo::from_model_reply("Dub", "not json").unwrap_err();
        assert!(matches!(err, BandInfoError::InvalidJson(_)));
    }

    #[test]
    fn test_markdown_fence_is_rejected() {
        let reply = format!("```json\n{}\n```", valid_reply());
        assert!(matches!(
            BandInfo::from_model_reply("Dub", &reply),
            Err(BandInfoError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_trailing_prose_is_rejected() {
        let reply = format!("{} Hope you like it!", valid_reply());
        assert!(matches!(
            BandInfo::from_model_reply("Dub", &reply),
            Err(BandInfoError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_non_object_is_schema_error() {
        assert!(matches!(
            BandInfo::from_model_reply("Dub", "[1, 2, 3]"),
            Err(BandInfoError::Schema(_))
        ));
    }

    #[test]
    fn test_missing_key() {
        let mut reply = valid_reply();
        reply.as_object_mut().unwrap().remove("top_songs");
        let err = BandInfo::from_model_reply("Dub", &reply.to_string()).unwrap_err();
        assert!(matches!(err, BandInfoError::Schema(ref msg) if msg.contains("top_songs")));
    }

    #[test]
    fn test_member_count_bounds() {
        let mut reply = valid_reply();
        reply["band_members"] = json!([]);
        assert!(BandInfo::from_model_reply("Dub", &reply.to_string()).is_err());

        reply["band_members"] = json!(["A", "B", "C", "D", "E", "F"]);
        assert!(BandInfo::from_model_reply("Dub", &reply.to_string()).is_err());

        reply["band_members"] = json!(["A", "B", "C", "D", "E"]);
        assert!(BandInfo::from_model_reply("Dub", &reply.to_string()).is_ok());
    }

    #[test]
    fn test_exact_counts() {
        let mut reply = valid_reply();
        reply["top_songs"] = json!(["1", "2", "3", "4"]);
        assert!(BandInfo::from_model_reply("Dub", &reply.to_string()).is_err());

        let mut reply = valid_reply();
        reply["related_bands"] = json!(["X", "Y", "Z", "W", "V", "U"]);
        assert!(BandInfo::from_model_reply("Dub", &reply.to_string()).is_err());
    }

    #[test]
    fn test_bad_tour_date() {
        let mut reply = valid_reply();
        reply["next_tour_date"] = json!("next spring");
        let err = BandInfo::from_model_reply("Dub", &reply.to_string()).unwrap_err();
        assert!(matches!(err, BandInfoError::Schema(ref msg) if msg.contains("next_tour_date")));
    }

    #[test]
    fn test_wrong_field_type() {
        let mut reply = valid_reply();
        reply["band_members"] = json!("A, B");
        assert!(matches!(
            BandInfo::from_model_reply("Dub", &reply.to_string()),
            Err(BandInfoError::Schema(_))
        ));
    }

    #[test]
    fn test_serializes_genre_first() {
        let info = BandInfo::from_model_reply("Dub", &valid_reply().to_string()).unwrap();
        let text = serde_json::to_string(&info).unwrap();
        assert!(text.starts_with("{\"genre\":\"Dub\""));
    }
}
