//! Collaborators the client calls into: the rendering surface and the
//! exit/log sink.
//!
//! Drawing is not this crate's business. The client decodes and scales
//! each snapshot into a [`ScaledFrame`] and hands it to a [`Renderer`];
//! whatever owns the screen decides what to do with it.

use std::fmt;

use puckline_protocol::{PLAYER_COUNT, PlayerState, StateFrame};
use puckline_session::TableScale;
use serde::{Deserialize, Serialize};

use crate::PucklineError;

/// Fill color of each player slot, by slot index.
pub const PLAYER_COLORS: [&str; PLAYER_COUNT] =
    ["#ff0700", "#ff9d00", "#3b00ff", "#12ff00"];

/// Puck and paddle side, as a fraction of the table side.
pub const PUCK_SIZE_RATIO: f64 = 0.05;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The size of the area the surface is drawn into.
///
/// A missing side falls back to the default when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Side of the largest square table that fits.
    pub fn table_size(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Side of the puck (and each paddle) on that table.
    pub fn puck_size(&self) -> f64 {
        self.table_size() * PUCK_SIZE_RATIO
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

// ---------------------------------------------------------------------------
// Scaled snapshot
// ---------------------------------------------------------------------------

/// A point on the rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One player slot, positioned on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScaledPlayer {
    pub position: Position,
    pub score: u8,
    pub active: bool,
    pub player_number: u8,
}

/// A state snapshot in display coordinates.
///
/// `players[n]` is color slot `n` ([`PLAYER_COLORS`]`[n]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScaledFrame {
    pub puck: Position,
    pub players: [ScaledPlayer; PLAYER_COUNT],
}

impl ScaledFrame {
    /// Scales the puck and each player independently.
    pub fn from_state(frame: &StateFrame, scale: &TableScale) -> Self {
        let (x, y) =
            scale.scale_point(f64::from(frame.puck_x), f64::from(frame.puck_y));
        Self {
            puck: Position { x, y },
            players: frame.players.map(|p| scale_player(&p, scale)),
        }
    }
}

fn scale_player(player: &PlayerState, scale: &TableScale) -> ScaledPlayer {
    let (x, y) = scale.scale_point(f64::from(player.x), f64::from(player.y));
    ScaledPlayer {
        position: Position { x, y },
        score: player.score,
        active: player.is_active(),
        player_number: player.player_number,
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// The rendering surface.
pub trait Renderer {
    /// Prepares the surface and returns the side of the square table.
    ///
    /// Called once, when the client is built.
    fn setup(&mut self, viewport: Viewport) -> f64 {
        viewport.table_size()
    }

    /// Moves the puck and players to the positions in `frame`.
    fn render(&mut self, frame: &ScaledFrame);

    /// The game started; this client controls slot `player_number`.
    fn game_started(&mut self, player_number: u8) {
        tracing::info!(player_number, "starting game");
    }
}

// ---------------------------------------------------------------------------
// Exit sink
// ---------------------------------------------------------------------------

/// Which of the client's two channels an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// `/request`: id assignment and position updates.
    Registration,
    /// `/state`: start and state frames.
    State,
}

impl ChannelKind {
    /// The path this channel is served on.
    pub fn path(self) -> &'static str {
        match self {
            ChannelKind::Registration => "/request",
            ChannelKind::State => "/state",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Registration => f.write_str("registration"),
            ChannelKind::State => f.write_str("state"),
        }
    }
}

/// A channel closed or failed.
#[derive(Debug)]
pub enum ExitEvent<'a> {
    Closed {
        channel: ChannelKind,
    },
    Error {
        channel: ChannelKind,
        error: &'a PucklineError,
    },
}

/// Receives close and error events, for diagnostics only.
///
/// The client never retries or reconnects; the sink is told and that is
/// all.
pub trait ExitSink {
    fn exit(&self, event: ExitEvent<'_>);
}

/// An [`ExitSink`] that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogExitSink;

impl ExitSink for LogExitSink {
    fn exit(&self, event: ExitEvent<'_>) {
        match event {
            ExitEvent::Closed { channel } => {
                tracing::warn!(%channel, "channel closed");
            }
            ExitEvent::Error { channel, error } => {
                tracing::warn!(%channel, %error, "channel error");
            }
        }
    }
}
