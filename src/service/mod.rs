//! Submission service — validate, extract metadata, persist.
//!
//! `SvgSubmissionService<S>` is the only component that touches both the
//! validator and the store. Validation always runs before the store is
//! called, so a rejected submission never leaves a partial record behind.
//!
//! ## Example
//!
//! ```
//! use svg_relay::{InMemoryStore, SvgSubmissionService};
//!
//! let service = SvgSubmissionService::new(InMemoryStore::new());
//! let record = service
//!     .submit(r#"<svg width="100" height="100"><circle cx="50" cy="50" r="40"/></svg>"#)
//!     .unwrap();
//! assert_eq!(record.id, 1);
//! assert_eq!(record.element_count, 2);
//! ```

mod error;
mod submission;

pub use error::SubmissionError;
pub use submission::{SanitizedSvg, SubmitSvgRequest, SvgSubmissionService};
