//! Entity containers with safe deletion during iteration
//!
//! Entities are removed by marking, never in place: a deletion requested in
//! the middle of a pass turns into a mark that the rest of the pass skips,
//! and the container compacts itself once the pass ends. This keeps the
//! per-frame loops free of index juggling and lets a visited entity delete
//! itself (or be deleted by an earlier collision) without corrupting the
//! traversal.

/// A simulated entity that can be marked for removal
pub trait Entity {
    /// True once the entity has been marked for removal
    fn is_deleted(&self) -> bool;

    /// Mark the entity for removal; the containing pass will not visit it
    /// again and the container compacts it away at the end of the pass
    fn delete(&mut self);
}

/// Ordered holder of one entity variant
#[derive(Debug, Clone, Default)]
pub struct EntityContainer<T: Entity> {
    entries: Vec<T>,
}

impl<T: Entity> EntityContainer<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entity: T) {
        self.entries.push(entity);
    }

    /// Number of live (unmarked) entities
    pub fn count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_deleted()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Visit every live entity once, in insertion order
    ///
    /// Deletions requested during the pass (on the visited entity or on a
    /// later one) are honored: a marked entity is never visited and never
    /// revisited. Compacts when the pass ends.
    pub fn iterate<F: FnMut(&mut T)>(&mut self, mut action: F) {
        for i in 0..self.entries.len() {
            if !self.entries[i].is_deleted() {
                action(&mut self.entries[i]);
            }
        }
        self.purge();
    }

    /// Iterate live entities without deletion support
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter(|e| !e.is_deleted())
    }

    /// Mutably iterate live entities; marks set here survive until the next
    /// `iterate` or `purge`
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter(|e| !e.is_deleted())
    }

    /// Drop every marked entity
    pub fn purge(&mut self) {
        self.entries.retain(|e| !e.is_deleted());
    }
}
