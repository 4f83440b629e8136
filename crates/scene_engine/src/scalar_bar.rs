//! Scalar-bar (colorbar) collaborator interface
//!
//! Colorbars themselves live in the plotting facade; this layer only owns
//! the fixed pool of display slots and the hook through which an actor's
//! removal reaches the facade, so a colorbar tracking only that actor's
//! mapper can be dropped and its slot reclaimed.

use std::collections::BTreeSet;

use crate::actor::MapperId;

/// Fixed pool of colorbar display slots for one viewport
///
/// Slots are handed out lowest-first so colorbars keep stacking without
/// overlap as they come and go.
#[derive(Debug, Clone)]
pub struct ScalarBarSlots {
    free: BTreeSet<u32>,
    capacity: u32,
}

impl ScalarBarSlots {
    /// Create a pool with `capacity` free slots
    pub fn new(capacity: u32) -> Self {
        Self {
            free: (0..capacity).collect(),
            capacity,
        }
    }

    /// Claim the lowest free slot, or `None` when the pool is exhausted
    pub fn acquire(&mut self) -> Option<u32> {
        let slot = self.free.iter().next().copied();
        match slot {
            Some(slot) => {
                self.free.remove(&slot);
                Some(slot)
            }
            None => {
                log::warn!("all {} colorbar slots are in use", self.capacity);
                None
            }
        }
    }

    /// Return a slot to the pool; unknown or duplicate slots are ignored
    pub fn release(&mut self, slot: u32) {
        if slot < self.capacity {
            self.free.insert(slot);
        }
    }

    /// Number of currently free slots
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total number of slots in the pool
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

/// Facade-side hook invoked when an actor with a mapper is removed
///
/// Implementors drop `mapper` from every tracked scalar range; when a
/// colorbar no longer tracks any mapper they remove it and release its
/// display slot back into `slots`.
pub trait ScalarBarObserver {
    /// Handle the removal of an actor bound to `mapper`
    fn actor_removed(&mut self, mapper: MapperId, slots: &mut ScalarBarSlots);
}
