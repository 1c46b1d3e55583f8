//! In-memory doubles for the unit tests: a channel-backed connection and
//! connector, plus a renderer and exit sink that record what they see.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use puckline_transport::{Connection, ConnectionId, Connector, TransportError};
use tokio::sync::mpsc;

use crate::render::{ExitEvent, ExitSink, Renderer, ScaledFrame};

/// A connection whose inbound frames are pushed by a [`MockPeer`].
pub(crate) struct MockConnection {
    id: ConnectionId,
    inbound: tokio::sync::Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    closed: Arc<AtomicBool>,
}

/// The server end of a [`MockConnection`]. Dropping it closes the
/// connection once the queued frames are read.
pub(crate) struct MockPeer {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    closed: Arc<AtomicBool>,
}

impl MockPeer {
    pub(crate) fn push(&self, frame: Vec<u8>) {
        let _ = self.tx.send(frame);
    }

    /// Everything the client has sent so far.
    pub(crate) fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    /// Whether the client called `close` on its end.
    pub(crate) fn closed_by_client(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Closes the connection, keeping a view of what the client sent.
    pub(crate) fn close(self) -> SentFrames {
        SentFrames(self.sent)
    }
}

pub(crate) struct SentFrames(Arc<Mutex<Vec<Vec<u8>>>>);

impl SentFrames {
    pub(crate) fn get(&self) -> Vec<Vec<u8>> {
        self.0.lock().unwrap().clone()
    }
}

pub(crate) fn mock_pair(id: u64) -> (MockConnection, MockPeer) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sent = Arc::new(Mutex::new(Vec::new()));
    let closed = Arc::new(AtomicBool::new(false));
    (
        MockConnection {
            id: ConnectionId::new(id),
            inbound: tokio::sync::Mutex::new(rx),
            sent: Arc::clone(&sent),
            closed: Arc::clone(&closed),
        },
        MockPeer { tx, sent, closed },
    )
}

impl Connection for MockConnection {
    async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
        Ok(self.inbound.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

/// Hands out pre-built connections by URL path.
#[derive(Default)]
pub(crate) struct MockConnector {
    conns: Mutex<HashMap<String, MockConnection>>,
}

impl MockConnector {
    pub(crate) fn serve(&self, path: &str, conn: MockConnection) {
        self.conns.lock().unwrap().insert(path.to_string(), conn);
    }
}

impl Connector for MockConnector {
    type Connection = MockConnection;

    async fn connect(
        &self,
        url: &str,
    ) -> Result<MockConnection, TransportError> {
        let mut conns = self.conns.lock().unwrap();
        let path = conns
            .keys()
            .find(|path| url.ends_with(path.as_str()))
            .cloned();
        path.and_then(|path| conns.remove(&path)).ok_or_else(|| {
            TransportError::ConnectFailed {
                url: url.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "nothing served here",
                ),
            }
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) frames: Vec<ScaledFrame>,
    pub(crate) started: Vec<u8>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &ScaledFrame) {
        self.frames.push(*frame);
    }

    fn game_started(&mut self, player_number: u8) {
        self.started.push(player_number);
    }
}

/// Records events as `closed:<channel>` or `error:<channel>:<message>`.
#[derive(Default)]
pub(crate) struct RecordingExitSink {
    events: Mutex<Vec<String>>,
}

impl RecordingExitSink {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ExitSink for RecordingExitSink {
    fn exit(&self, event: ExitEvent<'_>) {
        let line = match event {
            ExitEvent::Closed { channel } => format!("closed:{channel}"),
            ExitEvent::Error { channel, error } => {
                format!("error:{channel}:{error}")
            }
        };
        self.events.lock().unwrap().push(line);
    }
}
