//! InMemoryStore - BTreeMap-backed store; contents are lost on restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use chrono::Utc;

use super::{StoreError, SvgStore, UserStore};
use crate::record::{NewSvgRecord, NewUser, SvgRecord, UserRecord};

struct SvgTable {
    records: BTreeMap<u64, SvgRecord>,
    next_id: u64,
}

struct UserTable {
    users: HashMap<u64, UserRecord>,
    next_id: u64,
}

/// In-memory store for SVGs and users.
///
/// Clone-friendly via Arc: clones share the same tables. Id assignment and
/// insertion happen under one write lock, so concurrent `create` calls
/// still get unique, strictly increasing ids.
#[derive(Clone)]
pub struct InMemoryStore {
    svgs: Arc<RwLock<SvgTable>>,
    users: Arc<RwLock<UserTable>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store. The first SVG and the first user both get id 1.
    pub fn new() -> Self {
        Self {
            svgs: Arc::new(RwLock::new(SvgTable {
                records: BTreeMap::new(),
                next_id: 1,
            })),
            users: Arc::new(RwLock::new(UserTable {
                users: HashMap::new(),
                next_id: 1,
            })),
        }
    }
}

fn poisoned(operation: &str) -> StoreError {
    StoreError::Unavailable(format!("lock poisoned during {}", operation))
}

impl SvgStore for InMemoryStore {
    fn create(&self, record: NewSvgRecord) -> Result<SvgRecord, StoreError> {
        let mut table = self.svgs.write().map_err(|_| poisoned("create"))?;

        let id = table.next_id;
        table.next_id += 1;

        let stored = record.into_stored(id, Utc::now());
        table.records.insert(id, stored.clone());
        Ok(stored)
    }

    fn current(&self) -> Result<Option<SvgRecord>, StoreError> {
        let table = self.svgs.read().map_err(|_| poisoned("current"))?;
        Ok(table.records.values().next_back().cloned())
    }

    fn all(&self) -> Result<Vec<SvgRecord>, StoreError> {
        let table = self.svgs.read().map_err(|_| poisoned("all"))?;
        Ok(table.records.values().rev().cloned().collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let table = self.svgs.read().map_err(|_| poisoned("len"))?;
        Ok(table.records.len())
    }
}

impl UserStore for InMemoryStore {
    fn get_user(&self, id: u64) -> Result<Option<UserRecord>, StoreError> {
        let table = self.users.read().map_err(|_| poisoned("get_user"))?;
        Ok(table.users.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let table = self
            .users
            .read()
            .map_err(|_| poisoned("get_user_by_username"))?;
        Ok(table
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut table = self.users.write().map_err(|_| poisoned("create_user"))?;

        if table.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let id = table.next_id;
        table.next_id += 1;

        let stored = user.into_stored(id);
        table.users.insert(id, stored.clone());
        Ok(stored)
    }
}
