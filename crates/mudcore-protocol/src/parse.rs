//! Intent parsing: one trimmed input line → one [`Command`].
//!
//! The vocabulary is deliberately small:
//!
//! ```text
//! /quit                 → Quit event, then close the connection
//! /me <text>            → Emote
//! /who <name>           → Who (directed reply)
//! /tell <name> <text>   → Tell
//! /shout <text>         → Shout
//! /go <room>            → room transition (LeaveRoom + EnterRoom)
//! anything else         → Say
//! ```
//!
//! The policy for malformed commands is PERMISSIVE: `/me` with no text,
//! `/tell` with no body, or an unknown `/xyz` all fall back to `Say` of
//! the whole line. A typo lands as chat instead of vanishing, and the
//! parser never produces a user-visible error.

use crate::{Event, PlayerName, RoomId, SessionId};

/// Side effect requested by a parsed line, beyond publishing its event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Publish the event; nothing else.
    None,
    /// Reply `Bye!` directly to the initiating connection, publish the
    /// Quit event, then tear the session down.
    Close,
    /// Move the sender: publish LeaveRoom (with the pre-move room),
    /// update the registry, publish EnterRoom.
    Move(RoomId),
}

/// The result of parsing one line: an optional event plus a side effect.
///
/// `/go` is the only form with no immediate event — its two transition
/// events depend on registry state the parser does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub event: Option<Event>,
    pub action: Action,
}

impl Command {
    fn publish(event: Event) -> Self {
        Self {
            event: Some(event),
            action: Action::None,
        }
    }
}

/// Parses one raw input line on behalf of `sender`.
///
/// Returns `None` for lines that are empty after trimming — they produce
/// no event and no side effect. Everything else produces exactly one
/// [`Command`].
pub fn parse_line(line: &str, sender: &PlayerName, origin: SessionId) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let say = || Command::publish(Event::say(sender.clone(), origin, line));

    if !line.starts_with('/') {
        return Some(say());
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let cmd = match verb {
        // The Quit event itself is published by the session on teardown
        // (it needs the room snapshot, and it must fire on EOF too).
        "/quit" => Command {
            event: None,
            action: Action::Close,
        },
        "/me" if !rest.is_empty() => {
            Command::publish(Event::emote(sender.clone(), origin, rest))
        }
        "/who" if !rest.is_empty() => Command::publish(Event::who(
            sender.clone(),
            origin,
            PlayerName::new(rest),
        )),
        "/shout" if !rest.is_empty() => {
            Command::publish(Event::shout(sender.clone(), origin, rest))
        }
        "/tell" => match rest.split_once(char::is_whitespace) {
            Some((to, text)) if !text.trim().is_empty() => Command::publish(Event::tell(
                sender.clone(),
                origin,
                PlayerName::new(to),
                text.trim(),
            )),
            _ => say(),
        },
        "/go" if !rest.is_empty() => Command {
            event: None,
            action: Action::Move(RoomId::new(rest)),
        },
        // Unknown or incomplete command: permissive fallback.
        _ => say(),
    };

    Some(cmd)
}

// =========================================================================
// Tests
// =========================================================================
