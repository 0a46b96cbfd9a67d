//! Event vocabulary for mudcore.
//!
//! This crate defines the "language" the server speaks internally:
//!
//! - **Identity** ([`PlayerName`], [`SessionId`], [`RoomId`]) — who sent
//!   an event and where they are.
//! - **Events** ([`Event`], [`EventKind`]) — immutable records of things
//!   that happened, published once and observed by every session.
//! - **Intent parsing** ([`parse_line`], [`Command`], [`Action`]) — how a
//!   raw input line becomes exactly one event (or a side effect).
//! - **Styling** ([`ColorToken`], [`Styler`]) — the semantic color each
//!   event kind renders with, and how a token becomes escape codes.
//!
//! # Architecture
//!
//! The protocol layer sits below everything else. It knows nothing about
//! connections, rooms, or the broadcast bus — it only defines the shapes
//! that travel between them.
//!
//! ```text
//! input line → parse (this crate) → Event (this crate) → bus → sessions
//! ```

mod error;
mod parse;
mod style;
mod types;

pub use error::ProtocolError;
pub use parse::{parse_line, Action, Command};
pub use style::{ColorToken, Styler};
pub use types::{Event, EventKind, PlayerName, RoomId, SessionId};
