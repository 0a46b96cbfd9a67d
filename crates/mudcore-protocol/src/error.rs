//! Error types for the protocol layer.

/// Errors that can occur in the protocol layer.
///
/// Intent parsing itself never fails (malformed commands fall back to
/// `Say`), so this covers only logical violations callers can hit when
/// constructing or validating events by hand.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// An event violates a structural rule — e.g. a `Tell` without an
    /// addressee, or a speech kind with an empty body.
    #[error("invalid event: {0}")]
    InvalidEvent(String),
}
