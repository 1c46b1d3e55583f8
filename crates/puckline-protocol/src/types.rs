//! Core protocol types for Puckline's wire format.
//!
//! Every frame on either channel starts with one [`CommandType`] byte,
//! followed by a fixed-layout, little-endian payload. This module defines
//! the Rust side of those frames; [`crate::BinaryCodec`] moves them to and
//! from bytes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Width of a [`ClientId`] on the wire.
pub const CLIENT_ID_LEN: usize = 36;

/// Number of player slots in every state frame.
pub const PLAYER_COUNT: usize = 4;

/// Bytes per player in a state frame: x, y (u16), score, active,
/// player number (u8).
pub const PLAYER_STRIDE: usize = 7;

/// Total length of a state frame: tag, puck x/y, then the players.
pub const STATE_FRAME_LEN: usize = 1 + 4 + PLAYER_STRIDE * PLAYER_COUNT;

/// Total length of a start frame: tag plus the assigned player number.
pub const START_FRAME_LEN: usize = 2;

/// Total length of a register frame: tag plus the id.
pub const REGISTER_FRAME_LEN: usize = 1 + CLIENT_ID_LEN;

/// Total length of a position update frame: tag plus x/y.
pub const UPDATE_FRAME_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Table dimensions
// ---------------------------------------------------------------------------

/// Logical table geometry, in server units.
///
/// The server expresses every position in a square space of side
/// [`Dimensions::size`], independent of any client's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Side of the logical table.
    pub size: u16,
    /// Side of the puck.
    pub puck_size: u16,
    /// Width of each goal mouth.
    pub goal_size: u16,
}

/// The table every server game is played on.
pub const DIMENSIONS: Dimensions = Dimensions {
    size: 1000,
    puck_size: 50,
    goal_size: 300,
};

// ---------------------------------------------------------------------------
// CommandType: the leading tag byte
// ---------------------------------------------------------------------------

/// The first byte of every frame.
///
/// `#[repr(u8)]` pins each variant to its wire value, so `as u8` is the
/// encoding and [`TryFrom<u8>`] the decoding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum CommandType {
    /// Request an id (registration channel) or authenticate (state channel).
    Register = 0,
    /// The server could not satisfy a request.
    Error = 1,
    /// Client → Server: the local player's position.
    Update = 2,
    /// Server → Client: the game has started; carries the player slot.
    Start = 3,
    /// Server → Client: a snapshot of the puck and all players.
    State = 4,
}

impl CommandType {
    /// Returns the wire value of this tag.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CommandType {
    type Error = ProtocolError;

    fn try_from(tag: u8) -> Result<Self, ProtocolError> {
        match tag {
            0 => Ok(CommandType::Register),
            1 => Ok(CommandType::Error),
            2 => Ok(CommandType::Update),
            3 => Ok(CommandType::Start),
            4 => Ok(CommandType::State),
            other => Err(ProtocolError::UnknownCommand(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientId
// ---------------------------------------------------------------------------

/// The 36-byte token the server assigns on registration.
///
/// In practice it is a hyphenated UUID string, but the client treats it
/// as opaque bytes: it is stored exactly as received and echoed back
/// byte-for-byte when authenticating the state channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId([u8; CLIENT_ID_LEN]);

impl ClientId {
    /// Sent in place of an id when asking the server for a new one.
    pub const PLACEHOLDER: ClientId = ClientId([b'_'; CLIENT_ID_LEN]);

    /// Wraps exactly [`CLIENT_ID_LEN`] bytes.
    pub fn from_bytes(bytes: [u8; CLIENT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Copies an id out of a slice that must be exactly
    /// [`CLIENT_ID_LEN`] bytes long.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidMessage` for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let raw: [u8; CLIENT_ID_LEN] = bytes.try_into().map_err(|_| {
            ProtocolError::InvalidMessage(format!(
                "client id must be {CLIENT_ID_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }

    /// Returns the raw id bytes.
    pub fn as_bytes(&self) -> &[u8; CLIENT_ID_LEN] {
        &self.0
    }

    /// Whether this is the "request a new id" placeholder.
    pub fn is_placeholder(&self) -> bool {
        *self == Self::PLACEHOLDER
    }
}

/// Prints the id as text, replacing any non-UTF-8 bytes.
impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({self})")
    }
}

// ---------------------------------------------------------------------------
// State snapshot
// ---------------------------------------------------------------------------

/// One player slot inside a [`StateFrame`].
///
/// `active` is kept as the raw wire byte rather than a `bool` so that
/// re-encoding a decoded frame reproduces it exactly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct PlayerState {
    pub x: u16,
    pub y: u16,
    pub score: u8,
    pub active: u8,
    pub player_number: u8,
}

impl PlayerState {
    /// Whether a client currently occupies this slot.
    pub fn is_active(&self) -> bool {
        self.active != 0
    }
}

/// A decoded state snapshot: the puck plus all four player slots.
///
/// The players are a fixed-size array: index `n` is always color slot
/// `n`, whatever `player_number` the entry itself carries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct StateFrame {
    pub puck_x: i16,
    pub puck_y: i16,
    pub players: [PlayerState; PLAYER_COUNT],
}

// ---------------------------------------------------------------------------
// Command: one decoded frame
// ---------------------------------------------------------------------------

/// One frame, decoded.
///
/// This is a sum type over [`CommandType`]: each variant carries exactly
/// the payload its tag implies, and `match` on it is checked for
/// exhaustiveness, so a new command type cannot be silently unhandled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `[0x00, id]`. Sent with [`ClientId::PLACEHOLDER`] to request an id;
    /// received with the assigned id; sent again to authenticate.
    Register { id: ClientId },

    /// `[0x01]`. The server could not satisfy a request.
    Error,

    /// `[0x02, x, y]`. The local player's logical position.
    Update { x: u16, y: u16 },

    /// `[0x03, n]`. The game started and this client controls slot `n`.
    Start { player_number: u8 },

    /// `[0x04, ...]`. A full state snapshot.
    State(StateFrame),
}

impl Command {
    /// The tag byte this command is encoded with.
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Register { .. } => CommandType::Register,
            Command::Error => CommandType::Error,
            Command::Update { .. } => CommandType::Update,
            Command::Start { .. } => CommandType::Start,
            Command::State(_) => CommandType::State,
        }
    }

    /// Total encoded length of this command.
    pub fn encoded_len(&self) -> usize {
        match self {
            Command::Register { .. } => REGISTER_FRAME_LEN,
            Command::Error => 1,
            Command::Update { .. } => UPDATE_FRAME_LEN,
            Command::Start { .. } => START_FRAME_LEN,
            Command::State(_) => STATE_FRAME_LEN,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
