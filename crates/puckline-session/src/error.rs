use puckline_protocol::ClientId;

/// Errors that can occur when updating the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The server sent a second id after one was already stored.
    #[error("already registered as {0}")]
    AlreadyRegistered(ClientId),

    /// A start frame named a slot outside the table's four.
    #[error("invalid player number: {0}")]
    InvalidPlayerNumber(u8),
}
