//! Timed sidebar refresh owned by the tokio runtime

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::sidebar::Sidebar;

/// Refresh the sidebar immediately and then every `interval` until `cancel`
/// fires.
pub async fn poll_loop(sidebar: Sidebar, interval: Duration, cancel: CancellationToken) {
    tracing::debug!("Sidebar polling every {:?}", interval);
    loop {
        tokio::select! {
            _ = sidebar.refresh() => {}
            _ = cancel.cancelled() => break,
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancel.cancelled() => break,
        }
    }
    tracing::debug!("Sidebar polling loop cancelled");
}

/// Run [`poll_loop`] as a background task
pub fn spawn(sidebar: Sidebar, interval: Duration, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(poll_loop(sidebar, interval, cancel))
}
