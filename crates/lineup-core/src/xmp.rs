//! XMP metadata extraction from raw image bytes.
//!
//! The XMP packet is located by substring search over the file bytes (not
//! XML-aware), then parsed into a flat key/value map with namespace prefixes
//! stripped. Extraction never fails the batch: a missing or malformed packet
//! degrades to a sentinel map so one bad file can't block the run.

use std::collections::HashMap;

/// Flat mapping from local tag/attribute name to string value.
///
/// Element text and attributes share one key namespace; later entries in
/// document order overwrite earlier ones sharing a key. This lossy merge is
/// an accepted compatibility contract, not something to fix here.
pub type XmpMetadata = HashMap<String, String>;

const XMP_OPEN: &[u8] = b"<x:xmpmeta";
const XMP_CLOSE: &[u8] = b"</x:xmpmeta>";

/// Sentinel returned when the file carries no XMP packet.
pub const NO_XMP_SENTINEL: &str = "No XMP metadata found";

/// Sentinel returned when the located packet is not well-formed XML.
pub const BAD_XMP_SENTINEL: &str = "Failed to parse XMP XML";

/// Extract the embedded XMP packet from raw image bytes.
///
/// Returns `{"error": "No XMP metadata found"}` when either packet marker is
/// absent and `{"error": "Failed to parse XMP XML"}` when the packet does not
/// parse, instead of propagating an error.
pub fn extract(raw: &[u8]) -> XmpMetadata {
    let Some(start) = find_subsequence(raw, XMP_OPEN) else {
        return sentinel(NO_XMP_SENTINEL);
    };
    let Some(close) = find_subsequence(&raw[start..], XMP_CLOSE) else {
        return sentinel(NO_XMP_SENTINEL);
    };
    let end = start + close + XMP_CLOSE.len();

    // Undecodable bytes are dropped rather than failing the extraction.
    let packet = decode_ignoring_invalid(&raw[start..end]);
    parse_packet(&packet)
}

/// Parse a decoded XMP packet into a flat map without namespaces.
pub fn parse_packet(packet: &str) -> XmpMetadata {
    let doc = match roxmltree::Document::parse(packet) {
        Ok(doc) => doc,
        Err(_) => return sentinel(BAD_XMP_SENTINEL),
    };

    let mut data = XmpMetadata::new();
    for node in doc.descendants().filter(roxmltree::Node::is_element) {
        // Element text first, then attributes; document order decides
        // which value survives a key collision.
        if let Some(text) = node.text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                data.insert(node.tag_name().name().to_string(), trimmed.to_string());
            }
        }
        for attr in node.attributes() {
            data.insert(attr.name().to_string(), attr.value().to_string());
        }
    }
    data
}

/// Look up the headline field, defaulting to the empty string.
pub fn headline(metadata: &XmpMetadata) -> String {
    metadata.get("Headline").cloned().unwrap_or_default()
}

fn sentinel(message: &str) -> XmpMetadata {
    let mut map = XmpMetadata::new();
    map.insert("error".to_string(), message.to_string());
    map
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Decode bytes as UTF-8, skipping invalid sequences entirely.
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(&String::from_utf8_lossy(valid));
                let skip = e.error_len().unwrap_or(after.len());
                if skip >= after.len() {
                    break;
                }
                rest = &after[skip..];
            }
        }
    }
    out
}
