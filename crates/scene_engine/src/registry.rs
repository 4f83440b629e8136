//! Actor registry
//!
//! Name-indexed storage for the actors in one viewport. Keys are stable
//! slotmap handles; names are unique strings, generated from the handle
//! when the caller does not provide one. This module is pure bookkeeping:
//! backend notification, decoration upkeep and camera policy all live in
//! the renderer.

use std::collections::HashMap;

use slotmap::{Key, SlotMap};

use crate::actor::{Actor, ActorKey};
use crate::bounds::Bounds;

/// Name-indexed actor storage
#[derive(Debug, Default)]
pub struct ActorRegistry {
    actors: SlotMap<ActorKey, Actor>,
    names: HashMap<String, ActorKey>,
}

impl ActorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered actors
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True when no actors are registered
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Register an actor, generating a unique name when none is given
    ///
    /// The caller is responsible for evicting any previous holder of
    /// `name` first (replacement cascades through scalar-bar cleanup, which
    /// the registry knows nothing about). Inserting over a live name is a
    /// logic error and will orphan the old name index entry.
    pub fn insert(&mut self, mut actor: Actor, name: Option<String>) -> ActorKey {
        debug_assert!(
            name.as_deref().map_or(true, |n| !self.names.contains_key(n)),
            "inserting over a live name; remove it first"
        );
        let key = self.actors.insert_with_key(|key| {
            actor.name = name.unwrap_or_else(|| format!("actor-{:x}", key.data().as_ffi()));
            actor
        });
        let assigned = self.actors[key].name.clone();
        self.names.insert(assigned, key);
        key
    }

    /// Look up a key by registry name
    pub fn key_of(&self, name: &str) -> Option<ActorKey> {
        self.names.get(name).copied()
    }

    /// Borrow an actor
    pub fn get(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key)
    }

    /// Mutably borrow an actor
    pub fn get_mut(&mut self, key: ActorKey) -> Option<&mut Actor> {
        self.actors.get_mut(key)
    }

    /// Remove an actor by key, returning it when it was registered
    pub fn remove(&mut self, key: ActorKey) -> Option<Actor> {
        let actor = self.actors.remove(key)?;
        self.names.remove(&actor.name);
        Some(actor)
    }

    /// Names registered under `"{name}-"`, used for multi-block sweeps
    pub fn names_with_prefix(&self, name: &str) -> Vec<String> {
        let prefix = format!("{name}-");
        self.names
            .keys()
            .filter(|candidate| candidate.starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// All currently registered keys
    pub fn keys(&self) -> Vec<ActorKey> {
        self.actors.keys().collect()
    }

    /// Iterate over registered actors
    pub fn iter(&self) -> impl Iterator<Item = (ActorKey, &Actor)> {
        self.actors.iter()
    }

    /// Union bounding volume over all non-decoration actors
    ///
    /// Read-only and linear in actor count. Actors with undefined bounds
    /// and decoration actors are skipped; an empty fold finalizes to the
    /// degenerate unit box.
    pub fn aggregate_bounds(&self) -> Bounds {
        let mut acc = Bounds::NOTHING;
        for (_, actor) in self.actors.iter() {
            if actor.kind.is_decoration() {
                continue;
            }
            if let Some(bounds) = &actor.bounds {
                acc.fold(bounds);
            }
        }
        acc.finalized()
    }

    /// Drop every actor and name at once
    pub fn clear(&mut self) {
        self.actors.clear();
        self.names.clear();
    }
}
