//! Core data types for the lineup tagging pipeline.
//!
//! These types represent the structured output of tagging an image and the
//! roster data that feeds prompt construction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalized image-relative bounding region, all coordinates in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// The static near-full-frame region attached to every tag.
///
/// The model is not asked to localize players; the box is a placeholder,
/// not a measured region.
pub const FULL_FRAME_BOX: BoundingBox = BoundingBox {
    x1: 0.05,
    y1: 0.05,
    x2: 0.95,
    y2: 0.95,
};

/// A structured annotation produced for one image.
///
/// Serialized as `{"text":..,"confidence":..,"box":{"x1":..,...}}`, one or
/// more per image, never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameTag {
    /// Free-text model reply (player list or caption)
    pub text: String,

    /// Confidence score from 0.0 to 1.0
    pub confidence: f32,

    /// Bounding region the tag applies to
    #[serde(rename = "box")]
    pub region: BoundingBox,
}

impl FrameTag {
    /// Wrap a model reply into a full-frame tag with fixed confidence 1.0.
    pub fn full_frame(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            region: FULL_FRAME_BOX,
        }
    }
}

/// One entry of the player-info file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub team: String,
    pub name: String,
    pub jersey_number: String,
}

/// Team name mapped to `"Name(JerseyNumber)"` strings.
///
/// Insertion order is first-seen team order and must survive JSON
/// serialization — the prompt payload embeds this mapping verbatim.
pub type FilteredRoster = IndexMap<String, Vec<String>>;

/// High/low confidence player lists parsed from an identification reply,
/// used as context for the captioning prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionContext {
    pub high_confidence: Vec<String>,
    pub low_confidence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_tag_serde_shape() {
        let tag = FrameTag::full_frame("Jane Doe(10) - HIGHLY likely");
        let json = serde_json::to_string(&tag).unwrap();

        assert!(json.contains("\"text\":\"Jane Doe(10) - HIGHLY likely\""));
        assert!(json.contains("\"confidence\":1.0"));
        // The region field serializes under the wire name "box"
        assert!(json.contains("\"box\":{\"x1\":0.05,\"y1\":0.05,\"x2\":0.95,\"y2\":0.95}"));
        assert!(!json.contains("region"));
    }

    #[test]
    fn test_frame_tag_roundtrip() {
        let tag = FrameTag::full_frame("caption text");
        let json = serde_json::to_string(&tag).unwrap();
        let parsed: FrameTag = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.text, "caption text");
        assert_eq!(parsed.confidence, 1.0);
        assert_eq!(parsed.region, FULL_FRAME_BOX);
    }

    #[test]
    fn test_player_record_deserialize() {
        let json = r#"{"team":"A","name":"X","jersey_number":"1"}"#;
        let record: PlayerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.team, "A");
        assert_eq!(record.name, "X");
        assert_eq!(record.jersey_number, "1");
    }

    #[test]
    fn test_filtered_roster_preserves_key_order() {
        let mut roster = FilteredRoster::new();
        roster.insert("Zebras".to_string(), vec!["Z(9)".to_string()]);
        roster.insert("Aces".to_string(), vec!["A(1)".to_string()]);
        let json = serde_json::to_string(&roster).unwrap();
        let zebras = json.find("Zebras").unwrap();
        let aces = json.find("Aces").unwrap();
        assert!(zebras < aces, "insertion order must survive serialization");
    }
}
