//! Login: the one synchronous exchange before the loops start.

use mudcore_protocol::{PlayerName, RoomId};
use mudcore_transport::Connection;
use mudcore_world::{World, WorldError};
use rand::Rng;

/// Name-collision retries before giving up on a connection.
const SUFFIX_ATTEMPTS: usize = 4;

/// Prompts the new connection for a name and registers it in the world.
///
/// Empty names are re-prompted. If the requested name is already
/// connected, a random 4-hex-digit suffix is appended (`Alice-7f3a`) and
/// the client is told which name it actually got.
///
/// On success the player is in `default_room` and the returned name is
/// the session's identity. The caller owns the corresponding
/// `world.remove` at teardown.
pub async fn negotiate_name<C, W>(
    conn: &C,
    world: &W,
    default_room: &RoomId,
    motd: Option<&str>,
) -> Result<PlayerName, crate::SessionError>
where
    C: Connection,
    W: World,
{
    if let Some(motd) = motd {
        for line in motd.lines() {
            send(conn, line).await?;
        }
    }

    let requested = loop {
        send(conn, "What is your name?").await?;
        let line = match conn.recv_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return Err(crate::SessionError::LoginAborted),
            Err(error) => return Err(crate::SessionError::Login(error.to_string())),
        };
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            break trimmed.to_string();
        }
    };

    let mut candidate = PlayerName::new(&requested);
    for attempt in 0..=SUFFIX_ATTEMPTS {
        match world.join(candidate.clone(), default_room.clone()) {
            Ok(()) => {
                if attempt > 0 {
                    send(conn, &format!("That name is taken; you are {candidate}.")).await?;
                }
                tracing::info!(player = %candidate, room = %default_room, "login complete");
                return Ok(candidate);
            }
            Err(WorldError::NameTaken(_)) => {
                let suffix: u16 = rand::rng().random();
                candidate = PlayerName::new(&format!("{requested}-{suffix:04x}"));
            }
            Err(error) => return Err(crate::SessionError::Login(error.to_string())),
        }
    }

    Err(crate::SessionError::NameUnavailable(requested))
}

async fn send<C: Connection>(conn: &C, line: &str) -> Result<(), crate::SessionError> {
    conn.send_line(line)
        .await
        .map_err(|error| crate::SessionError::Login(error.to_string()))
}
