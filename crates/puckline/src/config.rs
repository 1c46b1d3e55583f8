//! Client configuration.

use serde::{Deserialize, Serialize};
use tokio_tungstenite::tungstenite::http::Uri;

use crate::render::{ChannelKind, Viewport};
use crate::PucklineError;

/// Where the server lives and how big the screen is.
///
/// Both channels are served from the same host and port as the page the
/// game is played from; `secure` selects `wss` over `ws` the way an
/// `https` page would.
///
/// Missing fields fall back to [`ClientConfig::default`] when
/// deserialized (`#[serde(default)]`), so a config file only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub viewport: Viewport,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            secure: false,
            viewport: Viewport::default(),
        }
    }
}

impl ClientConfig {
    /// Derives the server address from the URL of the game page.
    ///
    /// `http` maps to `ws` and `https` to `wss`; `ws`/`wss` URLs are
    /// taken as-is. Without an explicit port the scheme's default is used.
    ///
    /// # Errors
    /// `PucklineError::Config` if the URL does not parse, has no host, or
    /// uses another scheme.
    pub fn from_page_url(url: &str) -> Result<Self, PucklineError> {
        let uri: Uri = url
            .parse()
            .map_err(|e| PucklineError::Config(format!("{url}: {e}")))?;

        let secure = match uri.scheme_str() {
            Some("http" | "ws") => false,
            Some("https" | "wss") => true,
            Some(other) => {
                return Err(PucklineError::Config(format!(
                    "{url}: unsupported scheme {other}"
                )));
            }
            None => {
                return Err(PucklineError::Config(format!(
                    "{url}: missing scheme"
                )));
            }
        };
        let host = uri
            .host()
            .ok_or_else(|| {
                PucklineError::Config(format!("{url}: missing host"))
            })?
            .to_string();
        let port = uri.port_u16().unwrap_or(if secure { 443 } else { 80 });

        Ok(Self {
            host,
            port,
            secure,
            ..Self::default()
        })
    }

    /// `ws` or `wss`.
    pub fn scheme(&self) -> &'static str {
        if self.secure { "wss" } else { "ws" }
    }

    /// Full URL of one of the two channels.
    pub fn channel_url(&self, channel: ChannelKind) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme(),
            self.host,
            self.port,
            channel.path()
        )
    }
}
