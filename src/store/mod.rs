//! Storage for submitted SVGs (and the auxiliary user table).
//!
//! Stores are constructed by the process entry point and handed to the
//! submission service; there is no global instance.

mod in_memory;

use std::fmt;

use crate::record::{NewSvgRecord, NewUser, SvgRecord, UserRecord};

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not complete the read or write.
    Unavailable(String),
    /// A user with this username already exists.
    DuplicateUsername(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StoreError::DuplicateUsername(name) => {
                write!(f, "username already taken: {}", name)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Append-only SVG storage.
///
/// Ids start at 1 and strictly increase for the lifetime of the store; they
/// are never reused. There is no update or delete.
pub trait SvgStore: Send + Sync {
    /// Assign the next id and the current time, then store the record.
    fn create(&self, record: NewSvgRecord) -> Result<SvgRecord, StoreError>;

    /// The record with the highest id, if any.
    fn current(&self) -> Result<Option<SvgRecord>, StoreError>;

    /// Every record, newest (highest id) first.
    fn all(&self) -> Result<Vec<SvgRecord>, StoreError>;

    /// Number of stored records.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// User account storage.
pub trait UserStore: Send + Sync {
    fn get_user(&self, id: u64) -> Result<Option<UserRecord>, StoreError>;

    fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Fails with [`StoreError::DuplicateUsername`] if the username is taken.
    fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;
}

pub use in_memory::InMemoryStore;
