//! Unified error type for the Puckline client.

use puckline_protocol::ProtocolError;
use puckline_session::SessionError;
use puckline_transport::TransportError;

use crate::render::ChannelKind;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each wrapped variant generates a `From`
/// impl, so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PucklineError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (truncated or unknown frame).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (duplicate id, bad slot).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A channel closed while the client still needed it.
    #[error("{0} channel closed")]
    ChannelClosed(ChannelKind),

    /// The client configuration could not be built.
    #[error("invalid config: {0}")]
    Config(String),

    /// The client is no longer running, so a queued update was dropped.
    #[error("client stopped")]
    ClientStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "gone",
        ));
        let puckline_err: PucklineError = err.into();
        assert!(matches!(puckline_err, PucklineError::Transport(_)));
        assert_eq!(puckline_err.to_string(), "send failed: gone");
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::UnknownCommand(7);
        let puckline_err: PucklineError = err.into();
        assert!(matches!(puckline_err, PucklineError::Protocol(_)));
        assert_eq!(puckline_err.to_string(), "unknown command type: 7");
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::InvalidPlayerNumber(9);
        let puckline_err: PucklineError = err.into();
        assert!(matches!(puckline_err, PucklineError::Session(_)));
    }

    #[test]
    fn test_channel_closed_display() {
        let err = PucklineError::ChannelClosed(ChannelKind::Registration);
        assert_eq!(err.to_string(), "registration channel closed");
    }
}
