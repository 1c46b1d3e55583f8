//! Codec trait and the binary implementation of the frame layout.
//!
//! A "codec" (coder/decoder) converts between [`Command`] values and raw
//! frames. The client only depends on the [`Codec`] trait, so the channel
//! handlers never touch byte offsets themselves.
//!
//! ## Layout
//!
//! All multi-byte fields are little-endian. Offsets are from the start of
//! the frame.
//!
//! ```text
//! 0          u8   command type
//! Register:  1..37  id (36 bytes)
//! Error:     (no payload)
//! Update:    1 u16 x, 3 u16 y
//! Start:     1 u8  player number
//! State:     1 i16 puck x, 3 i16 puck y, then for n in 0..4 at 5 + 7n:
//!            u16 x, u16 y, u8 score, u8 active, u8 player number
//! ```
//!
//! Bytes past the end of the layout are ignored.

use crate::cursor::{FrameReader, FrameWriter};
use crate::types::{
    CLIENT_ID_LEN, ClientId, Command, CommandType, PLAYER_COUNT, PlayerState,
    StateFrame,
};
use crate::ProtocolError;

/// Converts commands to frames and back.
///
/// - `Send + Sync + 'static` so a codec can live inside a long-running
///   client future.
/// - `encode` is infallible: every [`Command`] has a fixed-size encoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes one command into a complete frame.
    fn encode(&self, command: &Command) -> Vec<u8>;

    /// Decodes one frame.
    ///
    /// # Errors
    /// - `ProtocolError::UnknownCommand` if the tag byte is not known.
    /// - `ProtocolError::Truncated` if the frame is shorter than its
    ///   layout.
    fn decode(&self, data: &[u8]) -> Result<Command, ProtocolError>;
}

// ---------------------------------------------------------------------------
// BinaryCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] for the fixed little-endian layout described above.
///
/// ## Example
///
/// ```rust
/// use puckline_protocol::{BinaryCodec, Codec, Command};
///
/// let codec = BinaryCodec;
/// let start = codec.decode(&[0x03, 0x02]).unwrap();
/// assert_eq!(start, Command::Start { player_number: 2 });
/// assert_eq!(codec.encode(&start), vec![0x03, 0x02]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn encode(&self, command: &Command) -> Vec<u8> {
        let mut w = FrameWriter::with_capacity(command.encoded_len());
        w.write_u8(command.command_type().as_u8());
        match command {
            Command::Register { id } => {
                w.write_bytes(id.as_bytes());
            }
            Command::Error => {}
            Command::Update { x, y } => {
                w.write_u16_le(*x).write_u16_le(*y);
            }
            Command::Start { player_number } => {
                w.write_u8(*player_number);
            }
            Command::State(frame) => {
                w.write_i16_le(frame.puck_x).write_i16_le(frame.puck_y);
                for player in &frame.players {
                    w.write_u16_le(player.x)
                        .write_u16_le(player.y)
                        .write_u8(player.score)
                        .write_u8(player.active)
                        .write_u8(player.player_number);
                }
            }
        }
        w.finish()
    }

    fn decode(&self, data: &[u8]) -> Result<Command, ProtocolError> {
        let mut r = FrameReader::new(data);
        let command = match CommandType::try_from(r.read_u8()?)? {
            CommandType::Register => Command::Register {
                id: ClientId::from_bytes(r.read_array::<CLIENT_ID_LEN>()?),
            },
            CommandType::Error => Command::Error,
            CommandType::Update => Command::Update {
                x: r.read_u16_le()?,
                y: r.read_u16_le()?,
            },
            CommandType::Start => Command::Start {
                player_number: r.read_u8()?,
            },
            CommandType::State => Command::State(decode_state(&mut r)?),
        };
        Ok(command)
    }
}

fn decode_state(r: &mut FrameReader<'_>) -> Result<StateFrame, ProtocolError> {
    let puck_x = r.read_i16_le()?;
    let puck_y = r.read_i16_le()?;
    let mut players = [PlayerState::default(); PLAYER_COUNT];
    for player in &mut players {
        *player = PlayerState {
            x: r.read_u16_le()?,
            y: r.read_u16_le()?,
            score: r.read_u8()?,
            active: r.read_u8()?,
            player_number: r.read_u8()?,
        };
    }
    Ok(StateFrame {
        puck_x,
        puck_y,
        players,
    })
}
