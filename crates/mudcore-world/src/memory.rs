//! In-memory registry implementation.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mudcore_protocol::{PlayerName, RoomId};

use crate::{Profile, Registry, World, WorldError};

/// The in-process player → room map.
///
/// A plain `HashMap` behind a `std::sync::RwLock`: every operation is a
/// short map access with no await point inside, so an async lock would
/// buy nothing. Reads (the deliver loops' room lookups) take the shared
/// lock; joins, removals, and moves take the exclusive lock.
///
/// Rooms have no existence of their own here — a room is whatever set of
/// players currently map to its id. `/go somewhere-new` just works.
#[derive(Debug, Default)]
pub struct InMemoryWorld {
    players: RwLock<HashMap<PlayerName, RoomId>>,
}

impl InMemoryWorld {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of connected players.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no players are connected.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock means another thread panicked mid-operation. Every
    // operation here leaves the map in a valid state even then (single
    // inserts/removes), so recover the guard instead of propagating the
    // panic into every session.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<PlayerName, RoomId>> {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PlayerName, RoomId>> {
        self.players
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Registry for InMemoryWorld {
    fn room_of(&self, name: &PlayerName) -> Result<RoomId, WorldError> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| WorldError::NotFound(name.clone()))
    }

    fn profile_of(&self, name: &PlayerName) -> Result<Profile, WorldError> {
        let room = self.room_of(name)?;
        Ok(Profile {
            name: name.clone(),
            room,
        })
    }
}

impl World for InMemoryWorld {
    fn join(&self, name: PlayerName, room: RoomId) -> Result<(), WorldError> {
        let mut players = self.write();
        if players.contains_key(&name) {
            return Err(WorldError::NameTaken(name));
        }
        tracing::info!(player = %name, %room, "player joined world");
        players.insert(name, room);
        Ok(())
    }

    fn remove(&self, name: &PlayerName) -> Result<(), WorldError> {
        match self.write().remove(name) {
            Some(room) => {
                tracing::info!(player = %name, %room, "player left world");
                Ok(())
            }
            None => Err(WorldError::NotFound(name.clone())),
        }
    }

    fn move_to(&self, name: &PlayerName, dest: RoomId) -> Result<RoomId, WorldError> {
        let mut players = self.write();
        let room = players
            .get_mut(name)
            .ok_or_else(|| WorldError::NotFound(name.clone()))?;
        let old = std::mem::replace(room, dest.clone());
        tracing::info!(player = %name, from = %old, to = %dest, "player moved");
        Ok(old)
    }
}

// =========================================================================
// Tests
// =========================================================================
