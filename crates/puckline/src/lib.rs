//! # Puckline
//!
//! Client for a four-player air hockey server.
//!
//! The client talks to the server over two binary WebSocket channels:
//!
//! - `/request` asks for a client id and carries the local player's
//!   position updates.
//! - `/state` carries the game start and a stream of state snapshots,
//!   which are scaled onto a square table and handed to a [`Renderer`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use puckline::prelude::*;
//!
//! struct Screen;
//!
//! impl Renderer for Screen {
//!     fn render(&mut self, frame: &ScaledFrame) {
//!         println!("puck at {:?}", frame.puck);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PucklineError> {
//!     let mut client = PucklineClient::builder()
//!         .host("127.0.0.1")
//!         .port(5000)
//!         .build(Screen);
//!     let handle = client.handle();
//!     handle.send_position(500, 500)?;
//!     client.run().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! puckline (facade: builder, dispatch loop, config)
//!   ├── puckline-transport (Connector/Connection traits, WebSocket impl)
//!   ├── puckline-protocol  (Command types, binary codec)
//!   └── puckline-session   (client id, player slot, table scaling)
//! ```

mod client;
mod config;
mod error;
pub(crate) mod handler;
mod render;
#[cfg(test)]
mod testing;

pub use client::{ClientHandle, PucklineClient, PucklineClientBuilder};
pub use config::ClientConfig;
pub use error::PucklineError;
pub use render::{
    ChannelKind, ExitEvent, ExitSink, LogExitSink, PLAYER_COLORS,
    PUCK_SIZE_RATIO, Position, Renderer, ScaledFrame, ScaledPlayer, Viewport,
};

// Re-export sub-crates so users can reach the lower layers directly.
pub use puckline_protocol;
pub use puckline_session;
pub use puckline_transport;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::{
        ChannelKind, ClientConfig, ClientHandle, ExitEvent, ExitSink,
        LogExitSink, Position, PucklineClient, PucklineClientBuilder,
        PucklineError, Renderer, ScaledFrame, ScaledPlayer, Viewport,
    };
    pub use puckline_protocol::{
        BinaryCodec, ClientId, Codec, Command, CommandType, PlayerState,
        ProtocolError, StateFrame,
    };
    pub use puckline_session::{Session, SessionError, TableScale};
    pub use puckline_transport::{
        Connection, ConnectionId, Connector, TransportError,
        WebSocketConnection, WebSocketConnector,
    };
}
