//! Allow-list sanitizer for SVG markup that will be injected into a live DOM.
//!
//! The input is parsed with `roxmltree` and a fresh document is written out
//! containing only allow-listed elements and attributes. Anything else is
//! dropped together with its subtree. Input that does not parse (including
//! anything carrying a DTD, so no entity can ever be expanded) produces an
//! empty string, which callers treat as "nothing safe to display".

use quick_xml::escape::escape;
use roxmltree::Node;

use super::validator::{check_depth, MAX_DEPTH};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Elements that survive sanitization.
pub const ALLOWED_ELEMENTS: &[&str] = &[
    "svg",
    "g",
    "defs",
    "title",
    "desc",
    "path",
    "circle",
    "ellipse",
    "rect",
    "line",
    "polyline",
    "polygon",
    "text",
    "tspan",
    "linearGradient",
    "radialGradient",
    "stop",
];

/// Attributes that survive sanitization (geometry, paint, transform, font).
pub const ALLOWED_ATTRIBUTES: &[&str] = &[
    "id",
    "viewBox",
    "preserveAspectRatio",
    "width",
    "height",
    "x",
    "y",
    "x1",
    "y1",
    "x2",
    "y2",
    "dx",
    "dy",
    "cx",
    "cy",
    "r",
    "rx",
    "ry",
    "fx",
    "fy",
    "d",
    "points",
    "transform",
    "fill",
    "fill-opacity",
    "fill-rule",
    "stroke",
    "stroke-width",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-dasharray",
    "stroke-opacity",
    "opacity",
    "offset",
    "stop-color",
    "stop-opacity",
    "gradientUnits",
    "gradientTransform",
    "text-anchor",
    "font-size",
    "font-family",
    "font-weight",
];

/// Return markup that is safe to inject as live SVG.
///
/// Pure and deterministic. Never fails: unparsable input, input nested
/// deeper than [`MAX_DEPTH`], or input whose root is not an `svg` element
/// yields an empty string.
pub fn sanitize(text: &str) -> String {
    if check_depth(text).is_err() {
        return String::new();
    }
    let Ok(doc) = roxmltree::Document::parse(text) else {
        return String::new();
    };
    let root = doc.root_element();
    if !is_allowed_element(root) || root.tag_name().name() != "svg" {
        return String::new();
    }

    let mut out = String::with_capacity(text.len());
    write_element(&mut out, root, 1);
    out
}

fn is_allowed_element(node: Node<'_, '_>) -> bool {
    let tag = node.tag_name();
    matches!(tag.namespace(), None | Some(SVG_NS)) && ALLOWED_ELEMENTS.contains(&tag.name())
}

fn write_element(out: &mut String, node: Node<'_, '_>, depth: usize) {
    let name = node.tag_name().name();
    let is_root = depth == 1;

    // Namespaced attributes (xlink:href, xml:base, ...) never pass.
    let attrs: Vec<(&str, &str)> = node
        .attributes()
        .filter(|a| a.namespace().is_none())
        .filter(|a| ALLOWED_ATTRIBUTES.contains(&a.name()))
        .filter(|a| is_safe_value(a.value()))
        .map(|a| (a.name(), a.value()))
        .collect();

    out.push('<');
    out.push_str(name);
    if is_root && node.tag_name().namespace() == Some(SVG_NS) {
        out.push_str(" xmlns=\"");
        out.push_str(SVG_NS);
        out.push('"');
    }
    for (attr, value) in &attrs {
        write_attribute(out, attr, value);
    }
    if is_root {
        if let Some(view_box) = synthesized_view_box(&attrs) {
            write_attribute(out, "viewBox", &view_box);
        }
    }

    let open_end = out.len();
    out.push('>');
    for child in node.children() {
        if child.is_element() {
            // Already bounded by `check_depth`.
            if is_allowed_element(child) && depth < MAX_DEPTH {
                write_element(out, child, depth + 1);
            }
        } else if child.is_text() {
            // A bare CR would be folded into LF on the next parse.
            let text = child.text().unwrap_or_default().replace('\r', "\n");
            out.push_str(&escape(&text));
        }
    }

    if out.len() == open_end + 1 {
        out.truncate(open_end);
        out.push_str("/>");
    } else {
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    // Attribute-value normalization turns these into spaces on reparse anyway.
    let value = value.replace(['\t', '\n', '\r'], " ");
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(&value));
    out.push('"');
}

/// `viewBox="0 0 w h"` for a root that has numeric `width` and `height` but
/// no `viewBox` of its own.
fn synthesized_view_box(attrs: &[(&str, &str)]) -> Option<String> {
    let lookup = |key: &str| attrs.iter().find(|(name, _)| *name == key).map(|(_, v)| *v);
    if lookup("viewBox").is_some() {
        return None;
    }
    let width = numeric_length(lookup("width")?)?;
    let height = numeric_length(lookup("height")?)?;
    Some(format!("0 0 {} {}", width, height))
}

// "100" and "100px" are user units; percentages and other units are not.
fn numeric_length(value: &str) -> Option<&str> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim_end();
    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|_| number)
}

/// Reject script-bearing schemes and any `url(...)` that leaves the document.
fn is_safe_value(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| compact.contains(scheme))
    {
        return false;
    }

    let mut rest = compact.as_str();
    while let Some(pos) = rest.find("url(") {
        rest = &rest[pos + 4..];
        if !rest.trim_start_matches(['\'', '"']).starts_with('#') {
            return false;
        }
    }
    true
}
