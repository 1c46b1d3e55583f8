//! Error types for the protocol layer.
//!
//! Each Puckline crate defines its own error enum. A `ProtocolError`
//! always means the bytes themselves were wrong, never the network.

/// Errors that can occur while decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The frame ended before a field could be read.
    ///
    /// `offset` is where the field starts, `needed` its width in bytes,
    /// and `len` the total length of the frame.
    #[error(
        "truncated frame: needed {needed} byte(s) at offset {offset}, frame is {len} byte(s)"
    )]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// The leading command-type byte is not one of the known tags.
    #[error("unknown command type: {0}")]
    UnknownCommand(u8),

    /// The bytes were read but violate a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
