//! Error types for the registry layer.

use mudcore_protocol::PlayerName;

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No connected player with this name. During delivery this usually
    /// means the player disconnected while an event was in flight — a
    /// benign race the deliver loop handles by skipping the render.
    #[error("no connected player named {0}")]
    NotFound(PlayerName),

    /// A player with this name is already connected. Player names are
    /// unique among connected sessions.
    #[error("player name {0} is already taken")]
    NameTaken(PlayerName),
}
