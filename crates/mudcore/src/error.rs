//! Unified error type for the mudcore server.

use mudcore_protocol::ProtocolError;
use mudcore_session::SessionError;
use mudcore_transport::TransportError;
use mudcore_world::WorldError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `mudcore` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum MudError {
    /// A transport-level error (accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (invalid event).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (login).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A world-level error (registry).
    #[error(transparent)]
    World(#[from] WorldError),

    /// Failed to read a configuration file.
    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Failed to parse a configuration file.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudcore_protocol::PlayerName;

    #[test]
    fn test_from_session_error() {
        let err = SessionError::LoginAborted;
        let mud_err: MudError = err.into();
        assert!(matches!(mud_err, MudError::Session(_)));
    }

    #[test]
    fn test_from_world_error() {
        let err = WorldError::NotFound(PlayerName::new("ghost"));
        let mud_err: MudError = err.into();
        assert!(matches!(mud_err, MudError::World(_)));
        assert!(mud_err.to_string().contains("ghost"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidEvent("bad".into());
        let mud_err: MudError = err.into();
        assert!(matches!(mud_err, MudError::Protocol(_)));
    }
}
