use thiserror::Error;

/// Errors surfaced by session setup.
///
/// The running loops never return these — ingest and deliver treat
/// connection failures as "this session is over" and exit quietly.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The connection failed while negotiating the player name.
    #[error("connection error during login: {0}")]
    Login(String),

    /// The client disconnected before completing login.
    #[error("connection closed before login completed")]
    LoginAborted,

    /// No free variant of the requested name could be registered.
    #[error("could not register a free name for \"{0}\"")]
    NameUnavailable(String),
}
