//! Per-connection handler: login, session loops, and teardown.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Negotiate a player name → register in the world
//!   2. Subscribe to the bus, THEN publish Join — so this session's own
//!      deliver loop (and everyone else's) observes the announcement
//!   3. Spawn the deliver loop, run the ingest loop to completion
//!   4. Teardown: stop delivering, deregister, close the socket

use std::sync::Arc;

use mudcore_protocol::{Event, PlayerName, SessionId};
use mudcore_session::{negotiate_name, Session};
use mudcore_transport::{Connection, TcpLineConnection};
use mudcore_world::{InMemoryWorld, World};

use crate::server::ServerState;
use crate::MudError;

/// Drop guard that deregisters a player from the world when the handler
/// exits. This ensures cleanup happens even if the handler panics.
struct WorldGuard {
    name: PlayerName,
    world: Arc<InMemoryWorld>,
}

impl Drop for WorldGuard {
    fn drop(&mut self) {
        if let Err(error) = self.world.remove(&self.name) {
            tracing::debug!(player = %self.name, %error, "deregistration at teardown failed");
        }
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: TcpLineConnection,
    state: Arc<ServerState>,
) -> Result<(), MudError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    // --- Step 1: Login ---
    let name = negotiate_name(
        conn.as_ref(),
        state.world.as_ref(),
        &state.config.default_room,
        state.config.motd.as_deref(),
    )
    .await?;
    let id = SessionId(conn_id.into_inner());

    tracing::info!(%conn_id, player = %name, "player logged in");

    let guard = WorldGuard {
        name: name.clone(),
        world: Arc::clone(&state.world),
    };

    // --- Step 2: Session loops ---
    // Subscribe BEFORE publishing Join: the broadcast channel guarantees
    // a subscriber sees everything published after its subscribe() call,
    // so the ordering here is what makes "You have joined." reliable.
    let rx = state.bus.subscribe();
    state.bus.publish(Event::join(name.clone(), id));

    let session = Arc::new(Session::new(
        name.clone(),
        id,
        Arc::clone(&conn),
        Arc::clone(&state.world),
        state.bus.clone(),
        state.config.styler,
    ));

    let deliver = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.deliver(rx).await })
    };

    session.ingest().await;

    // --- Step 3: Teardown ---
    // Ingest has already published the session's Quit; peers render it
    // from the room snapshot it carries, not from the registry. The
    // guard drops before the socket closes so a peer observing the close
    // can rely on the name being free again.
    deliver.abort();
    drop(guard);
    let _ = conn.close().await;
    tracing::info!(%conn_id, player = %name, "session ended");

    Ok(())
}
