//! The registry capability traits.

use mudcore_protocol::{PlayerName, RoomId};

use crate::WorldError;

/// A connected player's public profile, as rendered by `/who`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// The player's display name.
    pub name: PlayerName,
    /// The room they are currently in.
    pub room: RoomId,
}

/// Read-only view of the player/room registry.
///
/// This is everything the visibility engine is allowed to see. Each call
/// returns a consistent snapshot at lookup time; the engine reads room
/// membership at DELIVERY time, never caching it on an event.
pub trait Registry: Send + Sync + 'static {
    /// Returns the room the named player is currently in.
    fn room_of(&self, name: &PlayerName) -> Result<RoomId, WorldError>;

    /// Returns the named player's profile, for `/who` replies.
    fn profile_of(&self, name: &PlayerName) -> Result<Profile, WorldError>;
}

/// The mutating side of the registry, used by login and by `/go`.
///
/// Deliver loops never see this trait — they are observers only.
pub trait World: Registry {
    /// Connects a player, placing them in `room`.
    ///
    /// # Errors
    /// [`WorldError::NameTaken`] if the name is already connected.
    fn join(&self, name: PlayerName, room: RoomId) -> Result<(), WorldError>;

    /// Disconnects a player.
    fn remove(&self, name: &PlayerName) -> Result<(), WorldError>;

    /// Moves a player to `dest` and returns the room they left.
    ///
    /// The returned pre-move room is what a `LeaveRoom` event must carry:
    /// by the time that event is delivered, [`Registry::room_of`] already
    /// answers with `dest`.
    fn move_to(&self, name: &PlayerName, dest: RoomId) -> Result<RoomId, WorldError>;
}
