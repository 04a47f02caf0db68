//! Records exchanged with the backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// One reading from the field sensors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

/// Whether the watering mechanism is currently active.
///
/// An empty object carries no state and is rejected. A non-empty object
/// without `irrigation_state` reads as off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct IrrigationState {
    #[serde(rename = "irrigation_state")]
    pub irrigation_on: bool,
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for IrrigationState {
    type Error = String;

    fn try_from(body: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        if body.is_empty() {
            return Err("empty irrigation state".to_string());
        }
        match body.get("irrigation_state") {
            None => Ok(Self::new(false)),
            Some(serde_json::Value::Bool(on)) => Ok(Self::new(*on)),
            Some(other) => Err(format!("irrigation_state is not a boolean: {}", other)),
        }
    }
}

impl IrrigationState {
    pub fn new(irrigation_on: bool) -> Self {
        Self { irrigation_on }
    }

    /// The state a toggle would ask the backend for
    pub fn toggled(self) -> bool {
        !self.irrigation_on
    }
}

impl fmt::Display for IrrigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.irrigation_on {
            write!(f, "ON")
        } else {
            write!(f, "OFF")
        }
    }
}

/// A nutrient level in the inclusive range 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientLevel(u8);

impl NutrientLevel {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    /// Clamp an arbitrary integer into range, like a bounded number input does
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for NutrientLevel {
    fn default() -> Self {
        Self(10)
    }
}

impl fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Soil categories understood by the prediction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SoilType {
    #[default]
    Sandy,
    Loamy,
    Clayey,
    Peaty,
    Saline,
    Chalky,
    Silty,
}

impl SoilType {
    pub const ALL: [SoilType; 7] = [
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Clayey,
        SoilType::Peaty,
        SoilType::Saline,
        SoilType::Chalky,
        SoilType::Silty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoilType::Sandy => "Sandy",
            SoilType::Loamy => "Loamy",
            SoilType::Clayey => "Clayey",
            SoilType::Peaty => "Peaty",
            SoilType::Saline => "Saline",
            SoilType::Chalky => "Chalky",
            SoilType::Silty => "Silty",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crop categories understood by the prediction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropType {
    #[default]
    Wheat,
    Rice,
    Maize,
    Barley,
    Sugarcane,
    Cotton,
    Vegetables,
}

impl CropType {
    pub const ALL: [CropType; 7] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Maize,
        CropType::Barley,
        CropType::Sugarcane,
        CropType::Cotton,
        CropType::Vegetables,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Maize => "Maize",
            CropType::Barley => "Barley",
            CropType::Sugarcane => "Sugarcane",
            CropType::Cotton => "Cotton",
            CropType::Vegetables => "Vegetables",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator input for a fertilizer prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FertilizerRequest {
    pub nitrogen: NutrientLevel,
    pub potassium: NutrientLevel,
    pub phosphorous: NutrientLevel,
    #[serde(rename = "soilType")]
    pub soil_type: SoilType,
    #[serde(rename = "cropType")]
    pub crop_type: CropType,
}

pub const NO_PREDICTION_LABEL: &str = "No fertilizer prediction available";

/// The backend's recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizerResult {
    #[serde(rename = "Predicted Fertilizer", default = "default_label")]
    pub label: String,
}

fn default_label() -> String {
    NO_PREDICTION_LABEL.to_string()
}
