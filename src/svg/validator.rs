//! Shape check and metadata extraction for submitted SVG text.

use std::fmt;

use quick_xml::events::Event;
use quick_xml::Reader;

/// Deepest element nesting accepted before any tree is built.
pub const MAX_DEPTH: usize = 256;

/// Metadata read from a parsed SVG document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgMetadata {
    /// Root `width` attribute, when it starts with a positive integer.
    pub width: Option<u32>,
    /// Root `height` attribute, when it starts with a positive integer.
    pub height: Option<u32>,
    /// Every element in the document, root included.
    pub element_count: usize,
    /// UTF-8 byte length of the raw input.
    pub size: usize,
}

/// The text passed the shape check but is not well-formed XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedMarkup(pub String);

impl fmt::Display for MalformedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed SVG markup: {}", self.0)
    }
}

impl std::error::Error for MalformedMarkup {}

/// Coarse boundary check: after trimming, the text must start with `<svg`
/// and end with `</svg>`. Well-formedness is left to [`extract_metadata`].
pub fn is_valid_svg_shape(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.starts_with("<svg") && trimmed.ends_with("</svg>")
}

/// Parse `text` as XML and read the root dimensions and element count.
///
/// Fails with [`MalformedMarkup`] when the document does not parse or nests
/// deeper than [`MAX_DEPTH`]; no partial metadata is returned in that case.
pub fn extract_metadata(text: &str) -> Result<SvgMetadata, MalformedMarkup> {
    check_depth(text)?;
    let doc = roxmltree::Document::parse(text).map_err(|e| MalformedMarkup(e.to_string()))?;
    let root = doc.root_element();

    Ok(SvgMetadata {
        width: root.attribute("width").and_then(parse_dimension),
        height: root.attribute("height").and_then(parse_dimension),
        element_count: doc.descendants().filter(|n| n.is_element()).count(),
        size: text.len(),
    })
}

/// Streaming depth check; runs before `roxmltree`, whose parser recurses
/// once per nesting level.
pub(crate) fn check_depth(text: &str) -> Result<(), MalformedMarkup> {
    let mut reader = Reader::from_str(text);
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(MalformedMarkup(format!(
                        "elements nested deeper than {} levels",
                        MAX_DEPTH
                    )));
                }
            }
            Ok(Event::Empty(_)) if depth + 1 > MAX_DEPTH => {
                return Err(MalformedMarkup(format!(
                    "elements nested deeper than {} levels",
                    MAX_DEPTH
                )));
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(MalformedMarkup(e.to_string())),
        }
    }
}

// Integer-prefix parse: "100px" -> 100, "50%" -> 50, "auto" -> None.
fn parse_dimension(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse::<u32>().ok().filter(|v| *v > 0)
}
