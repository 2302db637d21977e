// 🗃️ Entity Store - Generic keyed collection for any Identifiable entity
//
// One store per entity type (students, teachers, courses).
// - Keys are the entity ids, compared by exact string equality
// - Listing follows insertion order, removals keep the order of the rest
// - Entities are handed out as Arc so enrollments can reference them
//   without taking over their lifecycle

use crate::entities::Identifiable;
use crate::error::{RecordsError, RecordsResult};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct EntityStore<T: Identifiable> {
    items: IndexMap<String, Arc<T>>,
}

impl<T: Identifiable> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore {
            items: IndexMap::new(),
        }
    }

    /// Insert a new entity, keyed by its id
    ///
    /// Fails with `InvalidArgument` for a blank id and with `DuplicateKey`
    /// when the id is taken; the stored entity is left untouched either way.
    pub fn add(&mut self, entity: impl Into<Arc<T>>) -> RecordsResult<Arc<T>> {
        let entity = entity.into();
        let id = entity.id();

        if id.trim().is_empty() {
            return Err(RecordsError::invalid_argument("entity id must not be blank"));
        }
        if self.items.contains_key(id) {
            return Err(RecordsError::DuplicateKey(id.to_string()));
        }

        debug!(id, "entity stored");
        self.items.insert(id.to_string(), Arc::clone(&entity));
        Ok(entity)
    }

    /// Swap in a new value for an existing id, keeping its listing position
    pub fn replace(&mut self, entity: impl Into<Arc<T>>) -> RecordsResult<Arc<T>> {
        let entity = entity.into();

        match self.items.get_mut(entity.id()) {
            Some(slot) => {
                *slot = Arc::clone(&entity);
                debug!(id = entity.id(), "entity replaced");
                Ok(entity)
            }
            None => Err(RecordsError::not_found(format!("no entity with id '{}'", entity.id()))),
        }
    }

    /// Rebuild every entity accepted by `predicate`; returns how many changed
    ///
    /// Updates that would change an entity's id are skipped.
    pub fn update_where<P, F>(&mut self, predicate: P, update: F) -> usize
    where
        P: Fn(&T) -> bool,
        F: Fn(&T) -> T,
    {
        let mut updated = 0;
        for (id, slot) in self.items.iter_mut() {
            if !predicate(slot.as_ref()) {
                continue;
            }

            let next = update(slot.as_ref());
            if next.id() != id.as_str() {
                warn!(id = id.as_str(), new_id = next.id(), "update changing the id skipped");
                continue;
            }
            *slot = Arc::new(next);
            updated += 1;
        }

        debug!(updated, "entities updated");
        updated
    }

    /// Remove by id; returns whether something was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.items.shift_remove(id).is_some();
        if removed {
            debug!(id, "entity removed");
        }
        removed
    }

    pub fn find_by_id(&self, id: &str) -> Option<Arc<T>> {
        self.items.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Every stored entity, in insertion order
    pub fn list_all(&self) -> Vec<Arc<T>> {
        self.items.values().cloned().collect()
    }

    pub fn find_where<P>(&self, predicate: P) -> Vec<Arc<T>>
    where
        P: Fn(&T) -> bool,
    {
        self.items
            .values()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.items.values()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Identifiable> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
