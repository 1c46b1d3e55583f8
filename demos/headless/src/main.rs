use std::time::Duration;

use puckline::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Logs every snapshot as one JSON line instead of drawing it.
struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &ScaledFrame) {
        match serde_json::to_string(frame) {
            Ok(json) => tracing::info!(target: "frame", "{json}"),
            Err(e) => tracing::warn!(error = %e, "could not encode frame"),
        }
    }

    fn game_started(&mut self, player_number: u8) {
        tracing::info!(player_number, "game started");
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

fn load_config() -> Result<ClientConfig, Box<dyn std::error::Error>> {
    if let Some(url) = std::env::args().nth(1) {
        return Ok(ClientConfig::from_page_url(&url)?);
    }
    if let Ok(path) = std::env::var("PUCKLINE_CONFIG") {
        let text = std::fs::read_to_string(&path)?;
        return Ok(serde_json::from_str(&text)?);
    }
    Ok(ClientConfig::default())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    tracing::info!(
        url = %config.channel_url(ChannelKind::Registration),
        "joining game"
    );

    let mut client =
        PucklineClient::builder().config(config).build(LogRenderer);

    // Sweep the paddle across the table so the server sees movement.
    let handle = client.handle();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_millis(50));
        let mut x: u16 = 0;
        let mut step: i32 = 20;
        loop {
            tick.tick().await;
            if handle.send_position(x, 100).is_err() {
                break;
            }
            let next = i32::from(x) + step;
            if !(0..=1000).contains(&next) {
                step = -step;
            }
            x = (i32::from(x) + step).clamp(0, 1000) as u16;
        }
    });

    client.run().await?;
    Ok(())
}
