//! Id-keyed entity cache

use crate::models::Entity;
use std::collections::HashMap;

/// In-memory map of id to entity, patched incrementally.
///
/// Iteration order is unspecified.
#[derive(Debug, Clone)]
pub struct EntityMap<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for EntityMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Entity> EntityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace entities by id
    pub fn upsert<I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = T>,
    {
        for entity in entities {
            self.entries.insert(entity.id().to_string(), entity);
        }
    }

    /// Remove entities by id, returning how many were present
    pub fn remove_by_ids<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter(|id| self.entries.remove(id.as_ref()).is_some())
            .count()
    }

    /// Keep only the entities for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.entries.retain(|_, entity| keep(entity));
    }

    /// Ids of the entities matching `predicate`
    pub fn ids_where<F>(&self, mut predicate: F) -> Vec<String>
    where
        F: FnMut(&T) -> bool,
    {
        self.entries
            .iter()
            .filter(|(_, entity)| predicate(entity))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Entity> FromIterator<T> for EntityMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::new();
        map.upsert(iter);
        map
    }
}
