//! Shared snapshot of the latest sidebar refresh

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::FetchError;
use crate::models::{IrrigationState, SensorReading};

/// Outcome of the latest refresh, read by every page render
#[derive(Debug, Clone, Default)]
pub struct SidebarSnapshot {
    /// `None` until the first refresh has completed
    pub sensor: Option<Result<SensorReading, FetchError>>,
    pub irrigation: Option<Result<IrrigationState, FetchError>>,
    pub last_refresh_epoch_ms: u64,
    pub refresh_count: u64,
    pub consecutive_failures: u32,
}

impl SidebarSnapshot {
    /// Store a refresh outcome. A refresh counts as failed when either call
    /// failed.
    pub fn record(
        &mut self,
        sensor: Result<SensorReading, FetchError>,
        irrigation: Result<IrrigationState, FetchError>,
        now_ms: u64,
    ) {
        if sensor.is_err() || irrigation.is_err() {
            self.consecutive_failures += 1;
        } else {
            self.consecutive_failures = 0;
        }
        self.sensor = Some(sensor);
        self.irrigation = Some(irrigation);
        self.last_refresh_epoch_ms = now_ms;
        self.refresh_count += 1;
    }

    pub fn sensor_reading(&self) -> Option<SensorReading> {
        self.sensor.as_ref().and_then(|r| r.as_ref().ok().copied())
    }

    pub fn irrigation_state(&self) -> Option<IrrigationState> {
        self.irrigation.as_ref().and_then(|r| r.as_ref().ok().copied())
    }

    pub fn sensor_error(&self) -> Option<&FetchError> {
        self.sensor.as_ref().and_then(|r| r.as_ref().err())
    }

    pub fn irrigation_error(&self) -> Option<&FetchError> {
        self.irrigation.as_ref().and_then(|r| r.as_ref().err())
    }
}

/// Serializable view of the snapshot for `/api/sidebar`
#[derive(Debug, Clone, Serialize)]
pub struct SidebarStatus {
    pub sensor: Option<SensorReading>,
    pub sensor_error: Option<String>,
    pub irrigation_on: Option<bool>,
    pub irrigation_error: Option<String>,
    pub last_refresh_epoch_ms: u64,
    pub refresh_count: u64,
    pub consecutive_failures: u32,
}

impl From<&SidebarSnapshot> for SidebarStatus {
    fn from(snapshot: &SidebarSnapshot) -> Self {
        Self {
            sensor: snapshot.sensor_reading(),
            sensor_error: snapshot.sensor_error().map(|e| e.to_string()),
            irrigation_on: snapshot.irrigation_state().map(|s| s.irrigation_on),
            irrigation_error: snapshot.irrigation_error().map(|e| e.to_string()),
            last_refresh_epoch_ms: snapshot.last_refresh_epoch_ms,
            refresh_count: snapshot.refresh_count,
            consecutive_failures: snapshot.consecutive_failures,
        }
    }
}

/// Thread-safe shared snapshot handle
pub type StateHandle = Arc<RwLock<SidebarSnapshot>>;

pub fn new_state_handle() -> StateHandle {
    Arc::new(RwLock::new(SidebarSnapshot::default()))
}
