//! Endpoint configuration: the two URLs every flow reads.

use crate::constants::{LIST_URL_KEY, PRESIGN_URL_KEY};
use crate::error::StoreResult;
use crate::store::KeyValueStore;
use serde::Serialize;

/// In-memory copy of the presign and list endpoint URLs.
///
/// An empty string means the endpoint is not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointConfig {
    pub presign_url: String,
    pub list_url: String,
}

impl EndpointConfig {
    pub fn new(presign_url: impl Into<String>, list_url: impl Into<String>) -> Self {
        Self {
            presign_url: presign_url.into(),
            list_url: list_url.into(),
        }
    }

    /// Copy every value present in `store` into the matching field.
    /// Fields whose key is absent keep their current value.
    pub fn restore(&mut self, store: &dyn KeyValueStore) {
        if let Some(url) = store.load(PRESIGN_URL_KEY) {
            self.presign_url = url;
        }
        if let Some(url) = store.load(LIST_URL_KEY) {
            tracing::debug!(list_url = %url, "Restored list endpoint");
            self.list_url = url;
        }
    }

    /// Build a config from whatever `store` holds.
    pub fn from_store(store: &dyn KeyValueStore) -> Self {
        let mut config = Self::default();
        config.restore(store);
        config
    }

    /// Persist both fields, overwriting unconditionally.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> StoreResult<()> {
        store.save(PRESIGN_URL_KEY, &self.presign_url)?;
        store.save(LIST_URL_KEY, &self.list_url)
    }

    /// Remove both keys and reset both fields to empty.
    pub fn clear(&mut self, store: &mut dyn KeyValueStore) -> StoreResult<()> {
        store.clear(PRESIGN_URL_KEY)?;
        store.clear(LIST_URL_KEY)?;
        self.presign_url.clear();
        self.list_url.clear();
        Ok(())
    }

    pub fn set_presign(&mut self, url: String, store: &mut dyn KeyValueStore) -> StoreResult<()> {
        store.save(PRESIGN_URL_KEY, &url)?;
        self.presign_url = url;
        Ok(())
    }

    pub fn set_list(&mut self, url: String, store: &mut dyn KeyValueStore) -> StoreResult<()> {
        store.save(LIST_URL_KEY, &url)?;
        self.list_url = url;
        Ok(())
    }

    pub fn has_presign(&self) -> bool {
        !self.presign_url.is_empty()
    }

    pub fn has_list(&self) -> bool {
        !self.list_url.is_empty()
    }
}
