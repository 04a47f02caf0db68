//! Maps backend outcomes to the text the operator sees
//!
//! Nothing else in the crate chooses user-facing wording; handlers and the
//! sidebar updater hand their `Result`s here.

use serde::Serialize;

use crate::error::FetchError;
use crate::models::{FertilizerResult, IrrigationState, SensorReading};
use crate::state::SidebarSnapshot;

pub const SENSOR_UNAVAILABLE: &str = "Sensor Data Unavailable";
pub const IRRIGATION_UNAVAILABLE: &str = "Irrigation Status Unavailable";
pub const BACKEND_ERROR: &str = "Error from backend";

/// Severity of a message banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

/// A one-line message shown above the content it refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }
}

pub fn sensor_lines(reading: &SensorReading) -> Vec<String> {
    vec![
        format!("Temperature: {} °C", reading.temperature),
        format!("Humidity: {} %", reading.humidity),
        format!("Soil Moisture: {} %", reading.soil_moisture),
    ]
}

pub fn irrigation_status_line(state: IrrigationState) -> String {
    format!("Irrigation System: {}", state)
}

/// Label of the button that flips the current state
pub fn toggle_label(state: IrrigationState) -> String {
    format!("Turn Irrigation {}", IrrigationState::new(state.toggled()))
}

pub fn toggle_outcome(requested_on: bool, result: &Result<(), FetchError>) -> Banner {
    match result {
        Ok(()) => Banner::success(format!(
            "Irrigation system turned {}",
            IrrigationState::new(requested_on)
        )),
        Err(e) => Banner::error(format!("Failed to toggle irrigation state: {}", e)),
    }
}

pub fn prediction_outcome(result: &Result<FertilizerResult, FetchError>) -> Banner {
    match result {
        Ok(prediction) => Banner::success(format!("Predicted Fertilizer: {}", prediction.label)),
        Err(FetchError::Status(_)) => Banner::error(BACKEND_ERROR),
        Err(e) => Banner::error(format!("Request failed: {}", e)),
    }
}

/// The prediction form could not be read, so nothing was sent
pub fn invalid_form(reason: &str) -> Banner {
    Banner::error(format!("Request failed: {}", reason))
}

/// Toggle control for the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleButton {
    pub label: String,
    /// State submitted when the button is pressed
    pub requested_on: bool,
}

/// Everything the sidebar shows, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub sensor_lines: Vec<String>,
    pub irrigation_line: String,
    pub toggle: Option<ToggleButton>,
    pub warnings: Vec<Banner>,
}

impl From<&SidebarSnapshot> for SidebarView {
    fn from(snapshot: &SidebarSnapshot) -> Self {
        let mut warnings = Vec::new();

        let sensor_lines = match &snapshot.sensor {
            Some(Ok(reading)) => sensor_lines(reading),
            Some(Err(e)) => {
                warnings.push(Banner::warning(format!(
                    "Failed to fetch sensor data: {}",
                    e
                )));
                vec![SENSOR_UNAVAILABLE.to_string()]
            }
            None => vec![SENSOR_UNAVAILABLE.to_string()],
        };

        let (irrigation_line, toggle) = match &snapshot.irrigation {
            Some(Ok(state)) => (
                irrigation_status_line(*state),
                Some(ToggleButton {
                    label: toggle_label(*state),
                    requested_on: state.toggled(),
                }),
            ),
            Some(Err(e)) => {
                warnings.push(Banner::warning(format!(
                    "Failed to fetch irrigation state: {}",
                    e
                )));
                (IRRIGATION_UNAVAILABLE.to_string(), None)
            }
            None => (IRRIGATION_UNAVAILABLE.to_string(), None),
        };

        Self {
            sensor_lines,
            irrigation_line,
            toggle,
            warnings,
        }
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
