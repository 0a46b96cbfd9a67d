//! The two loops of a connected player.

use std::sync::Arc;

use mudcore_bus::{Bus, BusReceiver};
use mudcore_protocol::{
    parse_line, Action, ColorToken, Event, PlayerName, RoomId, SessionId, Styler,
};
use mudcore_transport::Connection;
use mudcore_world::World;

use crate::view::render_for;

/// One connected player: identity, connection, and the shared services.
///
/// The caller (the accept handler) runs [`Session::deliver`] in a spawned
/// task and [`Session::ingest`] in the foreground; the session itself
/// spawns nothing. Both loops borrow the same connection — reads and
/// writes proceed independently.
pub struct Session<C, W> {
    name: PlayerName,
    id: SessionId,
    conn: Arc<C>,
    world: Arc<W>,
    bus: Bus,
    styler: Styler,
}

impl<C, W> Session<C, W>
where
    C: Connection,
    W: World,
{
    pub fn new(
        name: PlayerName,
        id: SessionId,
        conn: Arc<C>,
        world: Arc<W>,
        bus: Bus,
        styler: Styler,
    ) -> Self {
        Self {
            name,
            id,
            conn,
            world,
            bus,
            styler,
        }
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    // ---------------------------------------------------------------------
    // Ingest
    // ---------------------------------------------------------------------

    /// Reads lines until the connection ends, turning each into at most
    /// one published event (plus the transition pair for `/go`).
    ///
    /// Runs until `/quit`, clean EOF, or a read error — all three are
    /// normal session endings, and all three publish exactly one `Quit`
    /// on the way out.
    pub async fn ingest(&self) {
        loop {
            let line = match self.conn.recv_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!(player = %self.name, "connection closed by peer");
                    break;
                }
                Err(error) => {
                    tracing::debug!(player = %self.name, %error, "read failed, ending session");
                    break;
                }
            };

            let Some(command) = parse_line(&line, &self.name, self.id) else {
                continue;
            };
            if let Some(event) = command.event {
                self.publish(event);
            }
            match command.action {
                Action::None => {}
                Action::Move(dest) => self.handle_move(dest),
                Action::Close => {
                    let bye = self.styler.apply(ColorToken::Info, "Bye!");
                    let _ = self.conn.send_line(&bye).await;
                    break;
                }
            }
        }

        self.publish_quit();
    }

    /// Room transition: registry first, then the event pair.
    ///
    /// `LeaveRoom` carries the pre-move room because by delivery time the
    /// registry already answers with the destination. `EnterRoom` needs
    /// no snapshot — the registry is correct for it.
    fn handle_move(&self, dest: RoomId) {
        match self.world.move_to(&self.name, dest) {
            Ok(old) => {
                self.publish(Event::leave_room(self.name.clone(), self.id, &old));
                self.publish(Event::enter_room(self.name.clone(), self.id));
            }
            Err(error) => {
                tracing::warn!(player = %self.name, %error, "move failed, no events published");
            }
        }
    }

    /// Publishes with validation. An event that fails its own invariants
    /// is a bug in this crate, not in the client — log it and drop it
    /// rather than poisoning every deliver loop.
    fn publish(&self, event: Event) {
        if let Err(error) = event.validate() {
            tracing::error!(kind = ?event.kind, %error, "dropping invalid event");
            return;
        }
        self.bus.publish(event);
    }

    /// The single Quit of this session, with its room snapshotted in.
    /// Skipped only if the registry no longer knows the player, in which
    /// case there is no room to announce the quit to anyway.
    fn publish_quit(&self) {
        match self.world.room_of(&self.name) {
            Ok(room) => self.publish(Event::quit(self.name.clone(), self.id, &room)),
            Err(error) => {
                tracing::warn!(player = %self.name, %error, "no registry entry at quit, skipping announcement");
            }
        }
    }

    // ---------------------------------------------------------------------
    // Deliver
    // ---------------------------------------------------------------------

    /// Observes the full event stream and writes this player's view of it.
    ///
    /// Ends when the bus closes or the connection stops accepting writes.
    /// A write failure ends only this loop; the peer sessions never
    /// notice.
    pub async fn deliver(&self, mut rx: BusReceiver) {
        while let Some(event) = rx.recv().await {
            let Some(line) = render_for(&event, &self.name, self.id, self.world.as_ref()) else {
                continue;
            };
            let styled = self.styler.apply(line.color, &line.text);
            if let Err(error) = self.conn.send_line(&styled).await {
                tracing::debug!(player = %self.name, %error, "write failed, ending deliver loop");
                break;
            }
        }
    }
}
