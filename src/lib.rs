mod config;
mod record;
mod service;
mod store;
mod svg;

#[cfg(feature = "http")]
pub mod http;

pub use config::{ConfigError, ServerConfig};
pub use record::{NewSvgRecord, NewUser, SvgRecord, UserRecord};
pub use service::{SanitizedSvg, SubmissionError, SubmitSvgRequest, SvgSubmissionService};
pub use store::{InMemoryStore, StoreError, SvgStore, UserStore};
pub use svg::{
    extract_metadata, is_valid_svg_shape, sanitize, MalformedMarkup, SvgMetadata,
    ALLOWED_ATTRIBUTES, ALLOWED_ELEMENTS, MAX_DEPTH,
};
