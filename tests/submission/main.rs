//! Submission service integration tests.
//!
//! - Validation ordering and error kinds
//! - Id sequencing and the "current" query
//! - Concurrent submissions against one shared service
//! - Render path sanitization

mod concurrent;
mod render;
