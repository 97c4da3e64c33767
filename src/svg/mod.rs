//! SVG markup handling: the shape check, metadata extraction, and the
//! allow-list sanitizer used on every render path.

mod sanitizer;
mod validator;

pub use sanitizer::{sanitize, ALLOWED_ATTRIBUTES, ALLOWED_ELEMENTS};
pub use validator::{
    extract_metadata, is_valid_svg_shape, MalformedMarkup, SvgMetadata, MAX_DEPTH,
};
