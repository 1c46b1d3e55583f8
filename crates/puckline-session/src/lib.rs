//! Client session context for Puckline.
//!
//! One [`Session`] exists per client run. It holds everything the two
//! channel handlers share: the server-assigned [`ClientId`], the local
//! player's slot, and the [`TableScale`] that maps logical coordinates to
//! the rendering surface.
//!
//! [`ClientId`]: puckline_protocol::ClientId

mod error;
mod scale;
mod session;

pub use error::SessionError;
pub use scale::TableScale;
pub use session::Session;
