//! `PucklineClient` builder and the client run loop.
//!
//! This is the entry point for joining a game. It ties the layers
//! together: transport → protocol → session → renderer.

use puckline_protocol::{BinaryCodec, ClientId, Codec, Command};
use puckline_session::{Session, SessionError, TableScale};
use puckline_transport::{Connection, Connector, WebSocketConnector};
use tokio::sync::mpsc;

use crate::config::ClientConfig;
use crate::handler::{
    CommandStream, await_client_id, on_registration_command,
    on_state_command, report,
};
use crate::render::{
    ChannelKind, ExitEvent, ExitSink, LogExitSink, Renderer, Viewport,
};
use crate::PucklineError;

/// Builder for configuring a Puckline client.
///
/// # Example
///
/// ```rust,ignore
/// use puckline::prelude::*;
///
/// let mut client = PucklineClient::builder()
///     .host("127.0.0.1")
///     .port(5000)
///     .build(my_renderer);
/// client.run().await
/// ```
pub struct PucklineClientBuilder {
    config: ClientConfig,
}

impl PucklineClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the server host.
    pub fn host(mut self, host: &str) -> Self {
        self.config.host = host.to_string();
        self
    }

    /// Sets the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Uses `wss` instead of `ws`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.config.secure = secure;
        self
    }

    /// Sets the viewport the renderer's table is fitted into.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.config.viewport = viewport;
        self
    }

    /// Sets up the renderer and builds the client.
    ///
    /// Uses `WebSocketConnector` and `LogExitSink` as defaults; swap them
    /// with [`PucklineClient::with_connector`] and
    /// [`PucklineClient::with_exit_sink`].
    pub fn build<R: Renderer>(self, mut renderer: R) -> PucklineClient<R> {
        let table_size = renderer.setup(self.config.viewport);
        let session = Session::new(TableScale::new(table_size));
        tracing::debug!(table_size, "renderer ready");

        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        PucklineClient {
            config: self.config,
            renderer,
            exit: LogExitSink,
            connector: WebSocketConnector,
            codec: BinaryCodec,
            session,
            updates_tx,
            updates_rx,
        }
    }
}

impl Default for PucklineClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues position updates for a running client.
///
/// Cheap to clone; every clone feeds the same client.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    tx: mpsc::UnboundedSender<(u16, u16)>,
}

impl ClientHandle {
    /// Queues an `Update` frame carrying the local player's logical
    /// position. It is written to the registration channel once the
    /// client is running.
    ///
    /// # Errors
    /// `PucklineError::ClientStopped` once the registration channel has
    /// closed, the game has ended, or the client has been dropped.
    pub fn send_position(&self, x: u16, y: u16) -> Result<(), PucklineError> {
        self.tx
            .send((x, y))
            .map_err(|_| PucklineError::ClientStopped)
    }
}

/// A Puckline game client.
///
/// Call [`run()`](Self::run) to register and follow the game.
pub struct PucklineClient<R, E = LogExitSink, K = WebSocketConnector> {
    config: ClientConfig,
    renderer: R,
    exit: E,
    connector: K,
    codec: BinaryCodec,
    session: Session,
    updates_tx: mpsc::UnboundedSender<(u16, u16)>,
    updates_rx: mpsc::UnboundedReceiver<(u16, u16)>,
}

impl PucklineClient<()> {
    /// Creates a new builder.
    pub fn builder() -> PucklineClientBuilder {
        PucklineClientBuilder::new()
    }
}

impl<R, E, K> PucklineClient<R, E, K>
where
    R: Renderer,
    E: ExitSink,
    K: Connector,
{
    /// Replaces the sink that close and error events are reported to.
    pub fn with_exit_sink<E2: ExitSink>(
        self,
        exit: E2,
    ) -> PucklineClient<R, E2, K> {
        PucklineClient {
            config: self.config,
            renderer: self.renderer,
            exit,
            connector: self.connector,
            codec: self.codec,
            session: self.session,
            updates_tx: self.updates_tx,
            updates_rx: self.updates_rx,
        }
    }

    /// Replaces the connector used to open both channels.
    pub fn with_connector<K2: Connector>(
        self,
        connector: K2,
    ) -> PucklineClient<R, E, K2> {
        PucklineClient {
            config: self.config,
            renderer: self.renderer,
            exit: self.exit,
            connector,
            codec: self.codec,
            session: self.session,
            updates_tx: self.updates_tx,
            updates_rx: self.updates_rx,
        }
    }

    /// A handle for queuing position updates.
    pub fn handle(&self) -> ClientHandle {
        ClientHandle {
            tx: self.updates_tx.clone(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn exit_sink(&self) -> &E {
        &self.exit
    }

    /// Registers with the server and follows the game until the state
    /// channel closes.
    ///
    /// 1. Open `/request`, send `Register` with the placeholder id.
    /// 2. Wait (indefinitely) for the assigned id.
    /// 3. Open `/state`, send `Register` with that id.
    /// 4. Dispatch both channels until `/state` closes.
    ///
    /// A client registers once; calling `run` again after a successful
    /// registration fails with `SessionError::AlreadyRegistered`.
    pub async fn run(&mut self) -> Result<(), PucklineError> {
        if let Some(id) = self.session.client_id() {
            return Err(SessionError::AlreadyRegistered(*id).into());
        }

        // --- Step 1: Ask for an id ---
        let registration = self.open(ChannelKind::Registration).await?;
        self.send(
            &registration,
            ChannelKind::Registration,
            &Command::Register {
                id: ClientId::PLACEHOLDER,
            },
        )
        .await?;

        // --- Step 2: Wait for it ---
        let client_id = {
            let mut stream = CommandStream::new(
                &registration,
                &self.codec,
                ChannelKind::Registration,
            );
            await_client_id(&mut stream, &mut self.session, &self.exit).await?
        };

        // --- Step 3: Authenticate the state channel ---
        let state = self.open(ChannelKind::State).await?;
        self.send(
            &state,
            ChannelKind::State,
            &Command::Register { id: client_id },
        )
        .await?;

        // --- Step 4: Follow the game ---
        let registration_open = self.dispatch(&registration, &state).await;

        // --- Step 5: Leave ---
        if registration_open {
            if let Err(e) = registration.close().await {
                tracing::debug!(error = %e, "registration close failed");
            }
        }
        Ok(())
    }

    /// Multiplexes queued updates and both channels until `/state` closes.
    ///
    /// `biased` keeps the order fixed: outgoing updates first, then the
    /// registration channel, then state frames. Returns whether the
    /// registration channel is still open.
    async fn dispatch(
        &mut self,
        registration: &K::Connection,
        state: &K::Connection,
    ) -> bool {
        let mut registration_stream = CommandStream::new(
            registration,
            &self.codec,
            ChannelKind::Registration,
        );
        let mut state_stream =
            CommandStream::new(state, &self.codec, ChannelKind::State);
        let mut registration_open = true;

        loop {
            tokio::select! {
                biased;

                Some((x, y)) = self.updates_rx.recv(), if registration_open => {
                    let frame = self.codec.encode(&Command::Update { x, y });
                    if let Err(e) = registration.send(&frame).await {
                        report(&self.exit, ChannelKind::Registration, e.into());
                    }
                }

                inbound = registration_stream.next(), if registration_open => {
                    match inbound {
                        Some(Ok(command)) => {
                            on_registration_command(&mut self.session, command);
                        }
                        Some(Err(e)) => {
                            report(&self.exit, ChannelKind::Registration, e);
                        }
                        None => {
                            self.exit.exit(ExitEvent::Closed {
                                channel: ChannelKind::Registration,
                            });
                            registration_open = false;
                            stop_updates(&mut self.updates_rx);
                        }
                    }
                }

                inbound = state_stream.next() => {
                    match inbound {
                        Some(Ok(command)) => on_state_command(
                            &mut self.session,
                            &mut self.renderer,
                            command,
                        ),
                        Some(Err(e)) => {
                            report(&self.exit, ChannelKind::State, e);
                        }
                        None => {
                            self.exit.exit(ExitEvent::Closed {
                                channel: ChannelKind::State,
                            });
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("state channel closed, leaving game");
        stop_updates(&mut self.updates_rx);
        registration_open
    }

    /// Opens one channel, reporting a failure to the exit sink.
    async fn open(
        &self,
        channel: ChannelKind,
    ) -> Result<K::Connection, PucklineError> {
        let url = self.config.channel_url(channel);
        match self.connector.connect(&url).await {
            Ok(conn) => {
                tracing::info!(
                    %channel,
                    %url,
                    conn = %conn.id(),
                    "channel open"
                );
                Ok(conn)
            }
            Err(e) => {
                let error = PucklineError::from(e);
                self.exit.exit(ExitEvent::Error {
                    channel,
                    error: &error,
                });
                Err(error)
            }
        }
    }

    /// Sends one command, reporting a failure to the exit sink.
    async fn send(
        &self,
        conn: &K::Connection,
        channel: ChannelKind,
        command: &Command,
    ) -> Result<(), PucklineError> {
        let frame = self.codec.encode(command);
        if let Err(e) = conn.send(&frame).await {
            let error = PucklineError::from(e);
            self.exit.exit(ExitEvent::Error {
                channel,
                error: &error,
            });
            return Err(error);
        }
        Ok(())
    }
}

/// Refuses further updates and drops the ones still queued.
fn stop_updates(updates: &mut mpsc::UnboundedReceiver<(u16, u16)>) {
    updates.close();
    let mut dropped = 0_usize;
    while updates.try_recv().is_ok() {
        dropped += 1;
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped queued position updates");
    }
}
