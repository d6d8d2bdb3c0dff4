use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time;

use super::StatusLine;
use crate::domain::services::mocks::MockView;

const TIMEOUT: Duration = Duration::from_millis(3000);

#[tokio::test(start_paused = true)]
async fn it_reverts_to_ready_after_timeout() -> Result<()> {
    let view = Arc::new(MockView::default());
    let status = StatusLine::new(view.clone(), TIMEOUT);

    let message = status.show("File saved")?;
    assert!(message.expires_at.is_some());
    assert_eq!(view.last_status(), Some("File saved".to_string()));

    time::sleep(Duration::from_millis(2999)).await;
    assert_eq!(view.last_status(), Some("File saved".to_string()));

    time::sleep(Duration::from_millis(2)).await;
    assert_eq!(view.last_status(), Some("Ready".to_string()));

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_lets_an_older_timer_clear_a_newer_message() -> Result<()> {
    let view = Arc::new(MockView::default());
    let status = StatusLine::new(view.clone(), TIMEOUT);

    status.show("File opened")?;
    time::sleep(Duration::from_millis(2000)).await;
    status.show("Auto-saved")?;

    time::sleep(Duration::from_millis(1001)).await;
    assert_eq!(view.last_status(), Some("Ready".to_string()));

    assert_eq!(
        view.statuses(),
        vec![
            "File opened".to_string(),
            "Auto-saved".to_string(),
            "Ready".to_string(),
        ]
    );

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_keeps_errors_until_replaced() -> Result<()> {
    let view = Arc::new(MockView::default());
    let status = StatusLine::new(view.clone(), TIMEOUT);

    let message = status.show_error("Failed to save file: permission denied")?;
    assert!(message.expires_at.is_none());

    time::sleep(Duration::from_secs(10)).await;
    insta::assert_snapshot!(view.last_status().unwrap_or_default(), @"Error: Failed to save file: permission denied");

    return Ok(());
}

#[test]
fn it_shows_ready() -> Result<()> {
    let view = Arc::new(MockView::default());
    StatusLine::new(view.clone(), TIMEOUT).ready()?;

    assert_eq!(view.last_status(), Some("Ready".to_string()));

    return Ok(());
}
