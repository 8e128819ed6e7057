//! Prompt construction for the vision model.
//!
//! The instruction wording and the JSON field names embedded in each prompt
//! are part of the contract with the fine-tuned model and are reproduced
//! verbatim. Structured context travels as inline JSON between two fixed
//! instruction segments, joined with literal newlines.

use serde::Serialize;
use std::io;

use crate::types::{CaptionContext, FilteredRoster};

const IDENTIFY_INSTRUCTION: &str = "Identify all the players in this image. \
     Do not list players who are not in the \"Team - players\" list provided. ";
const IDENTIFY_CONFIDENCE_INSTRUCTION: &str =
    "Also label the confidence of the prediction as 'HIGHLY' or 'LESS' likely.";

const CAPTION_INSTRUCTION: &str =
    "Provide a caption for the image. The image meta-data is provided below. ";
const CAPTION_FORMAT_INSTRUCTION: &str = "Don't output anything except a single line caption.";

/// JSON payload embedded in the identification prompt.
///
/// Field declaration order is serialization order; the roster map keeps its
/// insertion order through serde.
#[derive(Serialize)]
struct IdentifyPayload<'a> {
    #[serde(rename = "Headline")]
    headline: &'a str,
    #[serde(rename = "Team - players")]
    roster: &'a FilteredRoster,
}

/// JSON payload embedded in the captioning prompt.
#[derive(Serialize)]
struct CaptionPayload<'a> {
    #[serde(rename = "Headline")]
    headline: &'a str,
    #[serde(rename = "HIGH confidence players")]
    high_confidence: &'a [String],
    #[serde(rename = "LOW confidence players")]
    low_confidence: &'a [String],
}

/// JSON formatter emitting `", "` and `": "` separators.
///
/// The separator spacing is part of the prompt contract: the payloads in the
/// fine-tuning corpus carried a space after each comma and colon, so the
/// inline JSON must match byte for byte.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn to_spaced_json<T: Serialize>(payload: &T) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    // Payload fields are strings and string lists; serialization can't fail.
    if payload.serialize(&mut ser).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Build the player-identification prompt.
pub fn identification(headline: &str, roster: &FilteredRoster) -> String {
    let payload = IdentifyPayload { headline, roster };
    let json = to_spaced_json(&payload);
    format!("{IDENTIFY_INSTRUCTION}\n{json}\n{IDENTIFY_CONFIDENCE_INSTRUCTION}")
}

/// Build the captioning prompt from a prior identification result.
pub fn captioning(headline: &str, context: &CaptionContext) -> String {
    let payload = CaptionPayload {
        headline,
        high_confidence: &context.high_confidence,
        low_confidence: &context.low_confidence,
    };
    let json = to_spaced_json(&payload);
    format!("{CAPTION_INSTRUCTION}\n{json}\n{CAPTION_FORMAT_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> FilteredRoster {
        let mut roster = FilteredRoster::new();
        roster.insert(
            "Wolves".to_string(),
            vec!["Jane Doe(10)".to_string(), "Ada Roe(7)".to_string()],
        );
        roster.insert("Aces".to_string(), vec!["Max Poe(3)".to_string()]);
        roster
    }

    #[test]
    fn test_identification_segment_order() {
        let prompt = identification("Big Game", &sample_roster());

        let headline = prompt.find("\"Headline\"").unwrap();
        let team_players = prompt.find("\"Team - players\"").unwrap();
        let confidence = prompt.find("'HIGHLY' or 'LESS' likely").unwrap();
        assert!(headline < team_players);
        assert!(team_players < confidence);
    }

    #[test]
    fn test_identification_contains_instruction_and_payload() {
        let prompt = identification("Big Game", &sample_roster());

        assert!(prompt.starts_with("Identify all the players in this image."));
        assert!(prompt.contains("\"Headline\": \"Big Game\""));
        assert!(prompt.contains("\"Jane Doe(10)\", \"Ada Roe(7)\""));
        assert!(prompt.ends_with("as 'HIGHLY' or 'LESS' likely."));
    }

    #[test]
    fn test_payload_separators_carry_spaces() {
        // Separator spacing in the inline JSON must match the payloads the
        // model was tuned on: ", " between entries and ": " after keys.
        let prompt = identification("x", &sample_roster());
        assert!(prompt.contains("\"Headline\": \"x\", \"Team - players\": {"));
        assert!(prompt.contains("\"Wolves\": [\"Jane Doe(10)\", \"Ada Roe(7)\"]"));
        assert!(!prompt.contains("\":\""));
    }

    #[test]
    fn test_identification_roster_team_order_preserved() {
        let prompt = identification("", &sample_roster());
        let wolves = prompt.find("Wolves").unwrap();
        let aces = prompt.find("Aces").unwrap();
        assert!(wolves < aces);
    }

    #[test]
    fn test_identification_segments_joined_by_newlines() {
        let prompt = identification("x", &sample_roster());
        let lines: Vec<&str> = prompt.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with('{'));
        assert!(lines[1].ends_with('}'));
    }

    #[test]
    fn test_captioning_payload_key_order() {
        let context = CaptionContext {
            high_confidence: vec!["Jane Doe".to_string()],
            low_confidence: vec!["Max Poe".to_string()],
        };
        let prompt = captioning("Cup Final", &context);

        let headline = prompt.find("\"Headline\"").unwrap();
        let high = prompt.find("\"HIGH confidence players\"").unwrap();
        let low = prompt.find("\"LOW confidence players\"").unwrap();
        assert!(headline < high);
        assert!(high < low);
        assert!(prompt.ends_with("Don't output anything except a single line caption."));
    }

    #[test]
    fn test_captioning_empty_context() {
        let prompt = captioning("", &CaptionContext::default());
        assert!(prompt.contains("\"HIGH confidence players\": []"));
        assert!(prompt.contains("\"LOW confidence players\": []"));
    }
}
