//! Channel handlers: what the client does with each inbound command.
//!
//! Each channel is read through a [`CommandStream`], a lazy sequence of
//! decoded commands pulled one at a time. The client's dispatch loop
//! takes commands off both streams and hands them to
//! [`on_registration_command`] or [`on_state_command`]. The handlers are
//! synchronous; all waiting happens in the stream.
//!
//! ```text
//! /request: Register(placeholder) ──→ Register(id) ──→ session.register
//! /state:   Register(id) ──→ Start(n) ──→ State ──→ State ──→ ...
//! ```

use puckline_protocol::{ClientId, Codec, Command, ProtocolError};
use puckline_session::Session;
use puckline_transport::Connection;

use crate::render::{ChannelKind, ExitEvent, ExitSink, Renderer, ScaledFrame};
use crate::PucklineError;

/// Decoded commands from one channel, in arrival order.
pub(crate) struct CommandStream<'a, C, K> {
    conn: &'a C,
    codec: &'a K,
    channel: ChannelKind,
    closed: bool,
}

impl<'a, C: Connection, K: Codec> CommandStream<'a, C, K> {
    pub(crate) fn new(conn: &'a C, codec: &'a K, channel: ChannelKind) -> Self {
        Self {
            conn,
            codec,
            channel,
            closed: false,
        }
    }

    /// Waits for the next frame and decodes it.
    ///
    /// - `Some(Ok(_))`: a decoded command.
    /// - `Some(Err(_))`: a frame that failed to decode (the stream goes
    ///   on), or a transport failure (the stream ends after it).
    /// - `None`: the channel is closed.
    pub(crate) async fn next(
        &mut self,
    ) -> Option<Result<Command, PucklineError>> {
        if self.closed {
            return None;
        }
        match self.conn.recv().await {
            Ok(Some(data)) => {
                Some(self.codec.decode(&data).map_err(PucklineError::from))
            }
            Ok(None) => {
                tracing::debug!(
                    channel = %self.channel,
                    conn = %self.conn.id(),
                    "stream ended"
                );
                self.closed = true;
                None
            }
            Err(e) => {
                self.closed = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Handles one command from the registration channel.
///
/// Returns the id when this command completed registration. Everything
/// else leaves the session as it was.
pub(crate) fn on_registration_command(
    session: &mut Session,
    command: Command,
) -> Option<ClientId> {
    match command {
        Command::Register { id } => match session.register(id) {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring repeated registration");
                None
            }
        },
        Command::Error => {
            tracing::warn!("server could not assign a client id");
            None
        }
        other @ (Command::Update { .. }
        | Command::Start { .. }
        | Command::State(_)) => {
            tracing::debug!(
                command = ?other.command_type(),
                "ignoring command on registration channel"
            );
            None
        }
    }
}

/// Handles one command from the state channel.
pub(crate) fn on_state_command<R: Renderer>(
    session: &mut Session,
    renderer: &mut R,
    command: Command,
) {
    match command {
        Command::State(frame) => {
            let scaled = ScaledFrame::from_state(&frame, session.scale());
            tracing::trace!(
                puck_x = scaled.puck.x,
                puck_y = scaled.puck.y,
                "state"
            );
            renderer.render(&scaled);
        }
        Command::Start { player_number } => {
            match session.assign_player_number(player_number) {
                Ok(()) => renderer.game_started(player_number),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring start frame");
                }
            }
        }
        other @ (Command::Register { .. }
        | Command::Error
        | Command::Update { .. }) => {
            tracing::debug!(
                command = ?other.command_type(),
                "ignoring command on state channel"
            );
        }
    }
}

/// Reads the registration channel until the server assigns an id.
///
/// There is no timeout: the client waits for as long as the channel
/// stays open.
pub(crate) async fn await_client_id<C, K, E>(
    stream: &mut CommandStream<'_, C, K>,
    session: &mut Session,
    exit: &E,
) -> Result<ClientId, PucklineError>
where
    C: Connection,
    K: Codec,
    E: ExitSink,
{
    while let Some(inbound) = stream.next().await {
        match inbound {
            Ok(command) => {
                if let Some(id) = on_registration_command(session, command) {
                    return Ok(id);
                }
            }
            Err(e) => report(exit, ChannelKind::Registration, e),
        }
    }
    exit.exit(ExitEvent::Closed {
        channel: ChannelKind::Registration,
    });
    Err(PucklineError::ChannelClosed(ChannelKind::Registration))
}

/// Passes an inbound failure to the exit sink.
///
/// Unknown command types are not failures: they are dropped with a debug
/// log.
pub(crate) fn report<E: ExitSink>(
    exit: &E,
    channel: ChannelKind,
    error: PucklineError,
) {
    match error {
        PucklineError::Protocol(ProtocolError::UnknownCommand(tag)) => {
            tracing::debug!(%channel, tag, "ignoring unknown command type");
        }
        error => exit.exit(ExitEvent::Error {
            channel,
            error: &error,
        }),
    }
}
