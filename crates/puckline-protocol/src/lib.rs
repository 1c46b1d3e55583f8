//! Wire protocol for Puckline.
//!
//! This crate defines the bytes that travel between the game server and
//! the client:
//!
//! - **Types** ([`Command`], [`StateFrame`], [`PlayerState`],
//!   [`ClientId`], [`CommandType`]): the decoded frames.
//! - **Cursors** ([`FrameReader`], [`FrameWriter`]): bounds-checked,
//!   little-endian field access at explicit offsets.
//! - **Codec** ([`Codec`] trait, [`BinaryCodec`]): whole frames to and
//!   from [`Command`] values.
//! - **Errors** ([`ProtocolError`]): truncated or unknown frames.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw messages) and session
//! (client identity). It knows nothing about connections: it only turns
//! one message into one command and back.
//!
//! ```text
//! Transport (bytes) → Protocol (Command) → Session (ClientId, slot, scale)
//! ```

mod codec;
mod cursor;
mod error;
mod types;

pub use codec::{BinaryCodec, Codec};
pub use cursor::{FrameReader, FrameWriter};
pub use error::ProtocolError;
pub use types::{
    CLIENT_ID_LEN, ClientId, Command, CommandType, DIMENSIONS, Dimensions,
    PLAYER_COUNT, PLAYER_STRIDE, PlayerState, REGISTER_FRAME_LEN,
    START_FRAME_LEN, STATE_FRAME_LEN, StateFrame, UPDATE_FRAME_LEN,
};
