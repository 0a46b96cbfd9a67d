//! The visibility & rendering engine.
//!
//! For every published event and every connected viewer this module
//! answers two questions: does the viewer see it, and how is it phrased?
//! Both are keyed on `(kind, is_self)` where `is_self` compares session
//! handles, never display names.
//!
//! Visibility is always evaluated at the viewer, never at the sender.
//! That is what lets one broadcast bus serve every room with no per-room
//! channel plumbing: each deliver loop pays a constant filtering cost
//! per event, which is nothing at human typing speed.
//!
//! Room membership is read from the registry at delivery time, with two
//! exceptions that snapshot their room into the event body because the
//! registry has already moved on by delivery time: `LeaveRoom` (the
//! sender is already in the new room) and `Quit` (the sender is gone
//! entirely).

use mudcore_protocol::{ColorToken, Event, EventKind, PlayerName, RoomId, SessionId};
use mudcore_world::Registry;

/// One renderable output line: text plus its semantic color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub color: ColorToken,
}

impl Line {
    fn new(color: ColorToken, text: String) -> Self {
        Self { text, color }
    }
}

/// Decides whether `viewer` sees `event`, and renders it if so.
///
/// Returns `None` for "not visible" — the deliver loop writes nothing,
/// never a blank line. A registry miss for the viewer or the sender
/// (player vanished mid-delivery) also returns `None`: the render is
/// skipped and the deliver loop carries on. It is never fatal to the
/// session, let alone the process.
pub fn render_for<R: Registry>(
    event: &Event,
    viewer: &PlayerName,
    viewer_id: SessionId,
    registry: &R,
) -> Option<Line> {
    let is_self = event.origin == viewer_id;

    // -- Visibility --------------------------------------------------------
    let visible = match event.kind {
        EventKind::Say | EventKind::Emote | EventKind::Join => same_room(event, viewer, registry)?,
        EventKind::Tell => is_self || event.addressee.as_ref() == Some(viewer),
        EventKind::Shout => true,
        EventKind::EnterRoom => !is_self && same_room(event, viewer, registry)?,
        EventKind::LeaveRoom => !is_self && in_room(viewer, &event.body, registry)?,
        // Your own quit always echoes back (if your deliver loop is
        // still attached); others need the snapshotted room.
        EventKind::Quit => is_self || in_room(viewer, &event.body, registry)?,
        EventKind::Who => is_self,
    };
    if !visible {
        return None;
    }

    // -- Phrasing ----------------------------------------------------------
    let from = &event.sender;
    let text = &event.body;
    let line = match (event.kind, is_self) {
        (EventKind::Say, true) => Line::new(ColorToken::Speech, format!("You say \"{text}\".")),
        (EventKind::Say, false) => {
            Line::new(ColorToken::Speech, format!("{from} says \"{text}\"."))
        }
        (EventKind::Tell, true) => {
            let to = event.addressee.as_ref()?;
            Line::new(ColorToken::Private, format!("You tell {to} \"{text}\"."))
        }
        (EventKind::Tell, false) => {
            Line::new(ColorToken::Private, format!("{from} tells you \"{text}\"."))
        }
        // Self-emote deliberately reads like everyone else's view:
        // `/me waves` echoes `Alice waves.` — conjugating arbitrary
        // user text into second person is not possible.
        (EventKind::Emote, _) => Line::new(ColorToken::Action, format!("{from} {text}.")),
        (EventKind::Shout, true) => Line::new(ColorToken::Loud, format!("You shout \"{text}\".")),
        (EventKind::Shout, false) => {
            Line::new(ColorToken::Loud, format!("{from} shouts \"{text}\"."))
        }
        (EventKind::Join, true) => Line::new(ColorToken::Lifecycle, "You have joined.".into()),
        (EventKind::Join, false) => {
            Line::new(ColorToken::Lifecycle, format!("{from} has joined."))
        }
        (EventKind::Quit, true) => Line::new(ColorToken::Lifecycle, "You have quit.".into()),
        (EventKind::Quit, false) => Line::new(ColorToken::Lifecycle, format!("{from} has quit.")),
        // Movement kinds were filtered to !is_self above.
        (EventKind::EnterRoom, _) => Line::new(ColorToken::Movement, format!("{from} enters.")),
        (EventKind::LeaveRoom, _) => Line::new(ColorToken::Movement, format!("{from} leaves.")),
        (EventKind::Who, _) => render_who(event, registry)?,
    };

    Some(line)
}

/// Renders a `/who` reply for the requester: the target's profile, or a
/// not-found line. Unlike the room lookups below, a miss here is an
/// answer, not a race to skip — the requester asked a question.
fn render_who<R: Registry>(event: &Event, registry: &R) -> Option<Line> {
    let target = event.addressee.as_ref()?;
    let text = match registry.profile_of(target) {
        Ok(profile) => format!("{} is in {}.", profile.name, profile.room),
        Err(_) => format!("There is no one called {target}."),
    };
    Some(Line::new(ColorToken::Info, text))
}

/// `true` if viewer and sender are in the same room right now.
fn same_room<R: Registry>(event: &Event, viewer: &PlayerName, registry: &R) -> Option<bool> {
    let viewer_room = room_of(viewer, registry)?;
    let sender_room = room_of(&event.sender, registry)?;
    Some(viewer_room == sender_room)
}

/// `true` if the viewer is currently in the named room.
fn in_room<R: Registry>(viewer: &PlayerName, room: &str, registry: &R) -> Option<bool> {
    Some(room_of(viewer, registry)? == RoomId::new(room))
}

/// Registry lookup with the mandated miss policy: warn and skip.
fn room_of<R: Registry>(name: &PlayerName, registry: &R) -> Option<RoomId> {
    match registry.room_of(name) {
        Ok(room) => Some(room),
        Err(error) => {
            tracing::warn!(player = %name, %error, "room lookup failed during delivery, skipping render");
            None
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mudcore_world::{InMemoryWorld, World};

    // Fixture: Alice (S-1) and Bob (S-2) in `lobby`, Carol (S-3) in `tavern`.
    fn world() -> InMemoryWorld {
        let world = InMemoryWorld::new();
        world.join(name("Alice"), RoomId::new("lobby")).unwrap();
        world.join(name("Bob"), RoomId::new("lobby")).unwrap();
        world.join(name("Carol"), RoomId::new("tavern")).unwrap();
        world
    }

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s)
    }

    const ALICE: SessionId = SessionId(1);
    const BOB: SessionId = SessionId(2);
    const CAROL: SessionId = SessionId(3);

    fn text<R: Registry>(ev: &Event, viewer: &str, id: SessionId, reg: &R) -> Option<String> {
        render_for(ev, &name(viewer), id, reg).map(|l| l.text)
    }

    // -- Say ---------------------------------------------------------------

    #[test]
    fn test_say_self_and_other_phrasing_in_same_room() {
        let world = world();
        let ev = Event::say(name("Alice"), ALICE, "hello");

        assert_eq!(
            text(&ev, "Alice", ALICE, &world).as_deref(),
            Some("You say \"hello\".")
        );
        assert_eq!(
            text(&ev, "Bob", BOB, &world).as_deref(),
            Some("Alice says \"hello\".")
        );
    }

    #[test]
    fn test_say_invisible_across_rooms() {
        let world = world();
        let ev = Event::say(name("Alice"), ALICE, "hello");

        assert!(text(&ev, "Carol", CAROL, &world).is_none());
    }

    #[test]
    fn test_say_uses_room_at_delivery_time_not_publish_time() {
        let world = world();
        let ev = Event::say(name("Alice"), ALICE, "hello");
        // Carol walks into the lobby after the event was published.
        world.move_to(&name("Carol"), RoomId::new("lobby")).unwrap();

        assert_eq!(
            text(&ev, "Carol", CAROL, &world).as_deref(),
            Some("Alice says \"hello\".")
        );
    }

    // -- Tell --------------------------------------------------------------

    #[test]
    fn test_tell_reaches_only_sender_and_addressee() {
        let world = world();
        // Carol is in another room — tells ignore rooms entirely.
        let ev = Event::tell(name("Alice"), ALICE, name("Carol"), "psst");

        assert_eq!(
            text(&ev, "Alice", ALICE, &world).as_deref(),
            Some("You tell Carol \"psst\".")
        );
        assert_eq!(
            text(&ev, "Carol", CAROL, &world).as_deref(),
            Some("Alice tells you \"psst\".")
        );
        // Bob shares Alice's room and still sees nothing.
        assert!(text(&ev, "Bob", BOB, &world).is_none());
    }

    // -- Emote -------------------------------------------------------------

    #[test]
    fn test_emote_is_third_person_for_everyone_including_self() {
        let world = world();
        let ev = Event::emote(name("Alice"), ALICE, "waves");

        assert_eq!(text(&ev, "Alice", ALICE, &world).as_deref(), Some("Alice waves."));
        assert_eq!(text(&ev, "Bob", BOB, &world).as_deref(), Some("Alice waves."));
        assert!(text(&ev, "Carol", CAROL, &world).is_none());
    }

    // -- Shout -------------------------------------------------------------

    #[test]
    fn test_shout_crosses_rooms() {
        let world = world();
        let ev = Event::shout(name("Alice"), ALICE, "help");

        assert_eq!(
            text(&ev, "Alice", ALICE, &world).as_deref(),
            Some("You shout \"help\".")
        );
        assert_eq!(
            text(&ev, "Carol", CAROL, &world).as_deref(),
            Some("Alice shouts \"help\".")
        );
    }

    // -- Lifecycle ---------------------------------------------------------

    #[test]
    fn test_join_visible_to_same_room_only() {
        let world = world();
        let ev = Event::join(name("Alice"), ALICE);

        assert_eq!(text(&ev, "Alice", ALICE, &world).as_deref(), Some("You have joined."));
        assert_eq!(text(&ev, "Bob", BOB, &world).as_deref(), Some("Alice has joined."));
        assert!(text(&ev, "Carol", CAROL, &world).is_none());
    }

    #[test]
    fn test_quit_visible_via_snapshotted_room_after_removal() {
        let world = world();
        let ev = Event::quit(name("Alice"), ALICE, &RoomId::new("lobby"));
        // By delivery time the registry has forgotten Alice entirely.
        world.remove(&name("Alice")).unwrap();

        assert_eq!(text(&ev, "Bob", BOB, &world).as_deref(), Some("Alice has quit."));
        assert!(text(&ev, "Carol", CAROL, &world).is_none());
    }

    #[test]
    fn test_own_quit_echoes_even_after_removal() {
        let world = world();
        let ev = Event::quit(name("Alice"), ALICE, &RoomId::new("lobby"));
        world.remove(&name("Alice")).unwrap();

        assert_eq!(text(&ev, "Alice", ALICE, &world).as_deref(), Some("You have quit."));
    }

    // -- Room transitions --------------------------------------------------

    #[test]
    fn test_enter_room_announced_to_new_room_not_self() {
        let world = world();
        // Carol moved lobby-ward; the registry already reflects it.
        world.move_to(&name("Carol"), RoomId::new("lobby")).unwrap();
        let ev = Event::enter_room(name("Carol"), CAROL);

        assert_eq!(text(&ev, "Bob", BOB, &world).as_deref(), Some("Carol enters."));
        assert!(text(&ev, "Carol", CAROL, &world).is_none());
    }

    #[test]
    fn test_leave_room_announced_to_old_room_via_snapshot() {
        let world = world();
        let old = world.move_to(&name("Bob"), RoomId::new("tavern")).unwrap();
        let ev = Event::leave_room(name("Bob"), BOB, &old);

        // Alice is still in the departed room and sees it.
        assert_eq!(text(&ev, "Alice", ALICE, &world).as_deref(), Some("Bob leaves."));
        // Bob himself does not, and neither does the destination room.
        assert!(text(&ev, "Bob", BOB, &world).is_none());
        assert!(text(&ev, "Carol", CAROL, &world).is_none());
    }

    // -- Who ---------------------------------------------------------------

    #[test]
    fn test_who_answers_only_the_requester() {
        let world = world();
        let ev = Event::who(name("Alice"), ALICE, name("Carol"));

        assert_eq!(
            text(&ev, "Alice", ALICE, &world).as_deref(),
            Some("Carol is in tavern.")
        );
        assert!(text(&ev, "Bob", BOB, &world).is_none());
        assert!(text(&ev, "Carol", CAROL, &world).is_none());
    }

    #[test]
    fn test_who_unknown_player_renders_not_found_to_requester() {
        let world = world();
        let ev = Event::who(name("Alice"), ALICE, name("Mallory"));

        assert_eq!(
            text(&ev, "Alice", ALICE, &world).as_deref(),
            Some("There is no one called Mallory.")
        );
    }

    // -- Failure semantics -------------------------------------------------

    #[test]
    fn test_sender_vanished_skips_render_for_room_scoped_kinds() {
        let world = world();
        let ev = Event::say(name("Alice"), ALICE, "hello");
        world.remove(&name("Alice")).unwrap();

        assert!(text(&ev, "Bob", BOB, &world).is_none());
    }

    #[test]
    fn test_self_and_other_phrasing_never_both_emitted() {
        let world = world();
        let ev = Event::say(name("Alice"), ALICE, "hello");

        // Exactly one phrasing per viewer: Alice gets self, Bob other.
        let alice = text(&ev, "Alice", ALICE, &world).unwrap();
        let bob = text(&ev, "Bob", BOB, &world).unwrap();
        assert!(alice.starts_with("You "));
        assert!(bob.starts_with("Alice "));
    }

    #[test]
    fn test_colors_follow_event_kind() {
        let world = world();
        let say = Event::say(name("Alice"), ALICE, "hi");
        let shout = Event::shout(name("Alice"), ALICE, "hi");

        assert_eq!(
            render_for(&say, &name("Bob"), BOB, &world).unwrap().color,
            ColorToken::Speech
        );
        assert_eq!(
            render_for(&shout, &name("Bob"), BOB, &world).unwrap().color,
            ColorToken::Loud
        );
    }
}
