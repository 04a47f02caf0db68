//! Client for the prediction and irrigation backend

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::error::FetchError;
use crate::io::{HttpClient, HttpResponse};
use crate::models::{FertilizerRequest, FertilizerResult, IrrigationState, SensorReading};

const SENSOR_DATA_PATH: &str = "/get_sensor_data";
const GET_IRRIGATION_PATH: &str = "/get_irrigation_state";
const SET_IRRIGATION_PATH: &str = "/set_irrigation_state";
const PREDICTION_PATH: &str = "/process_data";

/// The four operations the dashboard needs from the backend
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Latest temperature, humidity and soil moisture
    async fn fetch_sensor_data(&self) -> Result<SensorReading, FetchError>;

    /// Whether irrigation is currently running
    async fn fetch_irrigation_state(&self) -> Result<IrrigationState, FetchError>;

    /// Ask the backend to switch irrigation on or off.
    ///
    /// `Ok` only means the backend answered 200; it does not confirm the
    /// state was applied.
    async fn set_irrigation_state(&self, on: bool) -> Result<(), FetchError>;

    /// Submit the soil/crop form and return the recommended fertilizer
    async fn submit_fertilizer_request(
        &self,
        request: &FertilizerRequest,
    ) -> Result<FertilizerResult, FetchError>;
}

/// HTTP implementation of [`Backend`]
pub struct BackendClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendClient {
    pub fn new(config: &BackendConfig, http: Arc<dyn HttpClient>) -> Self {
        let base_url = config.normalized_base_url().to_string();
        tracing::debug!("Created BackendClient for {}", base_url);
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        let response = self.http.get(&url).await.map_err(|e| {
            tracing::warn!("GET {} failed: {}", path, e);
            FetchError::from(e)
        })?;
        decode(path, response)
    }

    async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, FetchError> {
        let url = self.url(path);
        let response = self.http.post_json(&url, body).await.map_err(|e| {
            tracing::warn!("POST {} failed: {}", path, e);
            FetchError::from(e)
        })?;
        ensure_ok(path, response)
    }
}

fn ensure_ok(path: &str, response: HttpResponse) -> Result<HttpResponse, FetchError> {
    if response.status != 200 {
        tracing::warn!("{} returned status {}", path, response.status);
        return Err(FetchError::Status(response.status));
    }
    Ok(response)
}

fn decode<T: DeserializeOwned>(path: &str, response: HttpResponse) -> Result<T, FetchError> {
    let response = ensure_ok(path, response)?;
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!("Failed to parse response from {}: {}", path, e);
        FetchError::from(e)
    })
}

#[async_trait]
impl Backend for BackendClient {
    async fn fetch_sensor_data(&self) -> Result<SensorReading, FetchError> {
        self.get_json(SENSOR_DATA_PATH).await
    }

    async fn fetch_irrigation_state(&self) -> Result<IrrigationState, FetchError> {
        self.get_json(GET_IRRIGATION_PATH).await
    }

    async fn set_irrigation_state(&self, on: bool) -> Result<(), FetchError> {
        tracing::debug!("Requesting irrigation state {}", on);
        self.post(SET_IRRIGATION_PATH, &serde_json::json!({ "state": on }))
            .await?;
        Ok(())
    }

    async fn submit_fertilizer_request(
        &self,
        request: &FertilizerRequest,
    ) -> Result<FertilizerResult, FetchError> {
        let body = serde_json::to_value(request)?;
        let response = self.post(PREDICTION_PATH, &body).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!("Failed to parse response from {}: {}", PREDICTION_PATH, e);
            FetchError::from(e)
        })
    }
}
