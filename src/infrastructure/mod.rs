pub mod backends;
pub mod editors;
pub mod views;

use anyhow::anyhow;
use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Event;

/// Sends a request to the terminal UI task. Fails once the UI has exited.
pub fn send_ui(tx: &mpsc::UnboundedSender<Event>, event: Event) -> Result<()> {
    return tx
        .send(event)
        .map_err(|_| return anyhow!("Terminal UI is no longer running"));
}
