use chrono::Utc;
use std::collections::BTreeMap;

use crate::web::models::SavedMap;

/// In-memory store of client maps, keyed by an id assigned from 1
#[derive(Debug, Default)]
pub struct MapStore {
    last_id: u64,
    maps: BTreeMap<u64, SavedMap>,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a map under the next id. Ids are never reused.
    pub fn insert(&mut self, map_name: String, node_map: serde_json::Value) -> SavedMap {
        self.last_id += 1;
        let saved = SavedMap {
            id: self.last_id,
            map_name,
            node_map,
            created_at: Utc::now(),
        };
        self.maps.insert(saved.id, saved.clone());
        saved
    }

    pub fn get(&self, id: u64) -> Option<&SavedMap> {
        self.maps.get(&id)
    }

    /// All maps in id order
    pub fn list(&self) -> Vec<SavedMap> {
        self.maps.values().cloned().collect()
    }

    pub fn remove(&mut self, id: u64) -> Option<SavedMap> {
        self.maps.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
