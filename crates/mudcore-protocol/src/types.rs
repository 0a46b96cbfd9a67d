//! Core identity and event types.
//!
//! An [`Event`] is an immutable record of something a player did. It is
//! published to the broadcast bus exactly once and then observed by every
//! connected session; visibility and phrasing are decided per viewer,
//! never baked into the event itself.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A player's display name.
///
/// Names are unique among connected sessions — the world registry
/// enforces this at join time — so a name is enough to address a player
/// (e.g. `/tell`). Identity comparison for self-vs-other phrasing uses
/// [`SessionId`] instead, which costs nothing to compare.
///
/// `#[serde(transparent)]` keeps the wire/log representation a plain
/// string rather than a one-field map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    /// Creates a name. The caller is responsible for trimming.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle identifying one live session (one connection).
///
/// Two sessions never share an id, so `event.origin == viewer.id` is the
/// self-vs-other test even in the (forbidden, but cheap to be safe about)
/// case of a duplicated display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// Identifier of a room (a chat location).
///
/// Rooms are named, not numbered — `lobby`, `tavern` — matching how
/// players refer to them in `/go`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// What kind of thing happened.
///
/// This is a closed vocabulary: the visibility engine matches on every
/// variant without a wildcard arm, so adding a kind here is a compile
/// error everywhere it must be handled — an unrecognized kind cannot
/// reach a deliver loop at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Room-scoped speech.
    Say,
    /// Point-to-point message, addressed by player name, ignores rooms.
    Tell,
    /// Room-scoped third-person action (`/me waves`).
    Emote,
    /// Global speech, heard in every room.
    Shout,
    /// A player connected and entered the world.
    Join,
    /// A player disconnected (voluntarily or not). Like `LeaveRoom`,
    /// the body snapshots the room they were in: by delivery time the
    /// registry no longer knows them at all.
    Quit,
    /// A player arrived in a room.
    EnterRoom,
    /// A player left a room. The event body carries WHICH room, because
    /// by delivery time the registry already points at the new one.
    LeaveRoom,
    /// A profile lookup; the reply is rendered only to the requester.
    Who,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An immutable record of something that happened.
///
/// Events carry WHO ([`sender`](Self::sender) / [`origin`](Self::origin)),
/// optionally WHOM ([`addressee`](Self::addressee), for directed kinds),
/// and WHAT ([`body`](Self::body)). They carry no room: room-scoped
/// visibility is resolved against the registry at delivery time, so a
/// viewer who moves rooms between publish and delivery is filtered
/// against where they are NOW. The single exception is `LeaveRoom`,
/// whose body snapshots the pre-move room (see [`EventKind::LeaveRoom`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Display name of the originating session.
    pub sender: PlayerName,
    /// Session handle of the originating session, for self-vs-other.
    pub origin: SessionId,
    /// Target player name. `Some` only for `Tell` and `Who`.
    pub addressee: Option<PlayerName>,
    /// Trimmed payload text. Never empty for Say/Tell/Emote/Shout;
    /// empty for lifecycle kinds; the departed room id for LeaveRoom.
    pub body: String,
    /// Which kind of event this is.
    pub kind: EventKind,
}

impl Event {
    fn new(
        sender: PlayerName,
        origin: SessionId,
        kind: EventKind,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            origin,
            addressee: None,
            body: body.into(),
            kind,
        }
    }

    /// Room-scoped speech.
    pub fn say(sender: PlayerName, origin: SessionId, text: impl Into<String>) -> Self {
        Self::new(sender, origin, EventKind::Say, text)
    }

    /// Directed message to a named player.
    pub fn tell(
        sender: PlayerName,
        origin: SessionId,
        to: PlayerName,
        text: impl Into<String>,
    ) -> Self {
        Self {
            addressee: Some(to),
            ..Self::new(sender, origin, EventKind::Tell, text)
        }
    }

    /// Room-scoped action (`/me`).
    pub fn emote(sender: PlayerName, origin: SessionId, text: impl Into<String>) -> Self {
        Self::new(sender, origin, EventKind::Emote, text)
    }

    /// Global speech.
    pub fn shout(sender: PlayerName, origin: SessionId, text: impl Into<String>) -> Self {
        Self::new(sender, origin, EventKind::Shout, text)
    }

    /// Connection lifecycle: entered the world.
    pub fn join(sender: PlayerName, origin: SessionId) -> Self {
        Self::new(sender, origin, EventKind::Join, "")
    }

    /// Connection lifecycle: left the world. `from` is the room the
    /// player was in, read before they are removed from the registry —
    /// viewers in that room must still see the announcement after the
    /// registry has forgotten the sender.
    pub fn quit(sender: PlayerName, origin: SessionId, from: &RoomId) -> Self {
        Self::new(sender, origin, EventKind::Quit, from.as_str())
    }

    /// Room transition: arrived. Filtered against the registry, which by
    /// publish time already points at the destination room.
    pub fn enter_room(sender: PlayerName, origin: SessionId) -> Self {
        Self::new(sender, origin, EventKind::EnterRoom, "")
    }

    /// Room transition: departed. `from` must be read BEFORE the registry
    /// is updated — it is the only room information delivery can use.
    pub fn leave_room(sender: PlayerName, origin: SessionId, from: &RoomId) -> Self {
        Self::new(sender, origin, EventKind::LeaveRoom, from.as_str())
    }

    /// Profile lookup request; answered only to the requester.
    pub fn who(sender: PlayerName, origin: SessionId, target: PlayerName) -> Self {
        Self {
            addressee: Some(target),
            ..Self::new(sender, origin, EventKind::Who, "")
        }
    }

    /// Checks the structural invariants of the vocabulary: directed kinds
    /// carry an addressee, speech kinds carry text, `LeaveRoom` carries
    /// its departed room. The constructors above uphold these already;
    /// this is the check for events built any other way.
    pub fn validate(&self) -> Result<(), crate::ProtocolError> {
        use crate::ProtocolError::InvalidEvent;
        match self.kind {
            EventKind::Tell | EventKind::Who => {
                if self.addressee.is_none() {
                    return Err(InvalidEvent(format!(
                        "{:?} requires an addressee",
                        self.kind
                    )));
                }
            }
            _ => {
                if self.addressee.is_some() {
                    return Err(InvalidEvent(format!(
                        "{:?} must not carry an addressee",
                        self.kind
                    )));
                }
            }
        }
        match self.kind {
            EventKind::Say | EventKind::Tell | EventKind::Emote | EventKind::Shout => {
                if self.body.trim().is_empty() {
                    return Err(InvalidEvent(format!(
                        "{:?} requires non-empty text",
                        self.kind
                    )));
                }
            }
            EventKind::LeaveRoom | EventKind::Quit => {
                if self.body.is_empty() {
                    return Err(InvalidEvent(format!(
                        "{:?} requires the departed room in its body",
                        self.kind
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
