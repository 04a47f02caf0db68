//! Sidebar updater: keeps the live status snapshot current and performs
//! the irrigation toggle

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

use crate::backend::Backend;
use crate::error::FetchError;
use crate::state::StateHandle;

/// Fetches live status into the shared snapshot
#[derive(Debug, Clone)]
pub struct Sidebar {
    backend: Arc<dyn Backend>,
    state: StateHandle,
    /// Held for a whole refresh so results are recorded in the order the
    /// fetches were issued
    refresh_lock: Arc<Mutex<()>>,
}

impl Sidebar {
    pub fn new(backend: Arc<dyn Backend>, state: StateHandle) -> Self {
        Self {
            backend,
            state,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Fetch sensor data and irrigation state and store both outcomes.
    ///
    /// Failures are recorded in the snapshot, never returned. Refreshes
    /// run one at a time, so a slow one cannot overwrite a newer result.
    pub async fn refresh(&self) {
        let _guard = self.refresh_lock.lock().await;
        let (sensor, irrigation) = tokio::join!(
            self.backend.fetch_sensor_data(),
            self.backend.fetch_irrigation_state()
        );
        let now_ms = current_epoch_ms();

        let failures = {
            let mut snapshot = self.state.write().await;
            snapshot.record(sensor, irrigation, now_ms);
            snapshot.consecutive_failures
        };

        if failures == 5 {
            tracing::warn!("Sidebar refresh has failed {} times in a row", failures);
        }
        tracing::debug!("Sidebar refreshed (consecutive failures: {})", failures);
    }

    /// Ask the backend for `requested_on`, then refresh on success.
    ///
    /// The snapshot is only changed by the refresh, so a rejected request
    /// leaves the displayed state as it was.
    pub async fn toggle(&self, requested_on: bool) -> Result<(), FetchError> {
        tracing::info!("Operator requested irrigation {}", on_off(requested_on));
        match self.backend.set_irrigation_state(requested_on).await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Irrigation toggle to {} failed: {}",
                    on_off(requested_on),
                    e
                );
                Err(e)
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

pub(crate) fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
