//! Saved-configuration storage contract.
//!
//! Persistence and identity live outside the engine. This module defines the
//! capability the service layer is handed explicitly:
//! 1. **Identity:** Who is asking; every store call is scoped to one owner.
//! 2. **ConfigStore:** Save, list and load named configurations.
//! 3. **InMemoryConfigStore:** A lock-guarded reference implementation.
//!
//! Implementors must be `Send + Sync` so one store can back concurrent requests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::Serialize;
use tracing::debug;

use crate::common::StoreError;
use crate::config::Configuration;

/// Name given to configurations saved with a blank name.
pub const UNNAMED: &str = "Unnamed config";

/// A configuration with an id and a display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedConfig<I> {
    /// Identifier, unique within its catalog.
    pub id: I,
    /// Display name.
    pub name: String,
    /// The configuration itself.
    pub config: Configuration,
}

/// An entry of the built-in preset catalog.
pub type PredefinedConfig = NamedConfig<String>;

/// A configuration saved by a user.
pub type SavedConfig = NamedConfig<u64>;

/// The caller on whose behalf a store operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Stable user id.
    pub user_id: u64,
}

impl Identity {
    /// Creates an identity for `user_id`.
    pub const fn new(user_id: u64) -> Self {
        Self { user_id }
    }
}

/// Storage capability for named configurations.
pub trait ConfigStore: Send + Sync {
    /// Saves `config` under `name` for `owner` and returns the new id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing store is unavailable.
    fn save(&self, owner: &Identity, name: &str, config: &Configuration) -> Result<u64, StoreError>;

    /// Lists the configurations owned by `owner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing store is unavailable.
    fn list(&self, owner: &Identity) -> Result<Vec<SavedConfig>, StoreError>;

    /// Loads one of `owner`'s configurations.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` does not exist and [`StoreError::Forbidden`] if
    /// it belongs to someone else.
    fn load(&self, owner: &Identity, id: u64) -> Result<Configuration, StoreError>;
}

#[derive(Debug)]
struct Entry {
    owner: u64,
    saved: SavedConfig,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

/// Process-local [`ConfigStore`] backed by an `RwLock`ed map.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    inner: RwLock<Inner>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn save(&self, owner: &Identity, name: &str, config: &Configuration) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.next_id += 1;
        let id = inner.next_id;

        let name = match name.trim() {
            "" => UNNAMED.to_string(),
            n => n.to_string(),
        };
        debug!(id, owner = owner.user_id, %name, "configuration saved");
        let _ = inner.entries.insert(
            id,
            Entry {
                owner: owner.user_id,
                saved: SavedConfig {
                    id,
                    name,
                    config: *config,
                },
            },
        );
        Ok(id)
    }

    fn list(&self, owner: &Identity) -> Result<Vec<SavedConfig>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .entries
            .values()
            .filter(|e| e.owner == owner.user_id)
            .map(|e| e.saved.clone())
            .collect())
    }

    fn load(&self, owner: &Identity, id: u64) -> Result<Configuration, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let entry = inner.entries.get(&id).ok_or(StoreError::NotFound(id))?;
        if entry.owner != owner.user_id {
            return Err(StoreError::Forbidden {
                id,
                user: owner.user_id,
            });
        }
        Ok(entry.saved.config)
    }
}
