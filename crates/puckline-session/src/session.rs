//! The per-run session context.

use puckline_protocol::{ClientId, PLAYER_COUNT};

use crate::{SessionError, TableScale};

/// State shared by the registration and state channel handlers.
///
/// Owned by the client and passed to the handlers by `&mut`; the handlers
/// run one at a time on the client's task, so no locking is involved.
///
/// ```text
/// new() ──→ register(id) ──→ assign_player_number(n) ──→ ... (n may change
///                                                         on each Start)
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    client_id: Option<ClientId>,
    player_number: Option<u8>,
    scale: TableScale,
}

impl Session {
    /// An unregistered session drawing onto `scale`.
    pub fn new(scale: TableScale) -> Self {
        Self {
            client_id: None,
            player_number: None,
            scale,
        }
    }

    /// The id the server assigned, once registration has completed.
    pub fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        self.client_id.is_some()
    }

    /// Stores the server-assigned id.
    ///
    /// The id is written once per session.
    ///
    /// # Errors
    /// `SessionError::AlreadyRegistered` if an id is already stored; the
    /// stored id is kept.
    pub fn register(&mut self, id: ClientId) -> Result<(), SessionError> {
        if let Some(existing) = self.client_id {
            return Err(SessionError::AlreadyRegistered(existing));
        }
        tracing::info!(client_id = %id, "registered with server");
        self.client_id = Some(id);
        Ok(())
    }

    /// The slot this client controls, once a game has started.
    pub fn player_number(&self) -> Option<u8> {
        self.player_number
    }

    /// Records the slot from a start frame. A later start replaces it.
    ///
    /// # Errors
    /// `SessionError::InvalidPlayerNumber` if `player_number` is not a
    /// slot on the table; the previous value is kept.
    pub fn assign_player_number(
        &mut self,
        player_number: u8,
    ) -> Result<(), SessionError> {
        if usize::from(player_number) >= PLAYER_COUNT {
            return Err(SessionError::InvalidPlayerNumber(player_number));
        }
        self.player_number = Some(player_number);
        Ok(())
    }

    pub fn scale(&self) -> &TableScale {
        &self.scale
    }
}
