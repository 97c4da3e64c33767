use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::SubmissionError;
use crate::record::{NewSvgRecord, SvgRecord};
use crate::store::SvgStore;
use crate::svg::{extract_metadata, is_valid_svg_shape, sanitize};

/// Body of a submission request: `{ "content": "<svg>...</svg>" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSvgRequest {
    pub content: String,
}

/// Sanitized markup of one stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSvg {
    /// Id of the record the markup was produced from.
    pub id: u64,
    /// Empty when nothing in the record was safe to display.
    pub markup: String,
}

/// Validates submissions and persists them to a store.
///
/// Generic over `S`, the store type. The store handle is owned by the
/// service; share the service (e.g. behind `Arc`) rather than the store.
pub struct SvgSubmissionService<S> {
    store: S,
}

impl<S: SvgStore> SvgSubmissionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `raw`, extract its metadata and store it unchanged.
    ///
    /// Fails with `InvalidShape` before parsing, and with `MalformedMarkup`
    /// if parsing fails. The store is only touched once both checks pass.
    pub fn submit(&self, raw: &str) -> Result<SvgRecord, SubmissionError> {
        if !is_valid_svg_shape(raw) {
            warn!(size = raw.len(), "rejected submission: invalid shape");
            return Err(SubmissionError::InvalidShape);
        }

        let metadata = extract_metadata(raw).map_err(|e| {
            warn!(error = %e, "rejected submission: malformed markup");
            SubmissionError::from(e)
        })?;

        let record = self.store.create(NewSvgRecord::new(raw, metadata))?;
        info!(
            id = record.id,
            size = record.size,
            elements = record.element_count,
            "stored svg"
        );
        Ok(record)
    }

    /// Submit the `content` field of a request body.
    pub fn submit_request(&self, request: &SubmitSvgRequest) -> Result<SvgRecord, SubmissionError> {
        self.submit(&request.content)
    }

    /// The most recently submitted record.
    pub fn current(&self) -> Result<SvgRecord, SubmissionError> {
        let current = self.store.current()?;
        debug!(found = current.is_some(), "current svg lookup");
        current.ok_or(SubmissionError::NotFound)
    }

    /// All records, newest first.
    pub fn all(&self) -> Result<Vec<SvgRecord>, SubmissionError> {
        Ok(self.store.all()?)
    }

    /// Sanitized markup of the current record, ready to inject into a page.
    ///
    /// Carries the record id so a caller that also fetched metadata can tell
    /// whether both belong to the same record.
    pub fn current_sanitized(&self) -> Result<SanitizedSvg, SubmissionError> {
        let record = self.current()?;
        let markup = sanitize(&record.content);
        if markup.is_empty() {
            debug!(id = record.id, "current svg sanitized to nothing");
        }
        Ok(SanitizedSvg {
            id: record.id,
            markup,
        })
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
