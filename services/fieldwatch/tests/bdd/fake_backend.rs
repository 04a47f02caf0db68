//! In-memory stand-in for the prediction/irrigation backend

use std::sync::Mutex;

use async_trait::async_trait;
use fieldwatch::io::{HttpClient, HttpResponse};

/// A request the dashboard sent to the backend
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug)]
struct BackendScript {
    sensor: HttpResponse,
    irrigation_status: u16,
    irrigation_on: bool,
    /// Served verbatim instead of the `irrigation_state` object when set
    irrigation_body: Option<String>,
    set_status: u16,
    prediction: HttpResponse,
}

impl Default for BackendScript {
    fn default() -> Self {
        Self {
            sensor: ok(r#"{"temperature":20,"humidity":50,"soil_moisture":30}"#),
            irrigation_status: 200,
            irrigation_on: false,
            irrigation_body: None,
            set_status: 200,
            prediction: ok(r#"{"Predicted Fertilizer":"Urea"}"#),
        }
    }
}

fn ok(body: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: body.to_string(),
    }
}

fn failure(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        body: "Internal Server Error".to_string(),
    }
}

/// Serves the four backend endpoints from a script and records every call.
/// A successful `/set_irrigation_state` updates the served irrigation state,
/// like the real backend does.
#[derive(Debug, Default)]
pub struct FakeBackendHttp {
    script: Mutex<BackendScript>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeBackendHttp {
    pub fn serve_sensor_body(&self, body: &str) {
        self.script.lock().unwrap().sensor = ok(body);
    }

    pub fn fail_sensor(&self, status: u16) {
        self.script.lock().unwrap().sensor = failure(status);
    }

    pub fn serve_irrigation(&self, on: bool) {
        let mut script = self.script.lock().unwrap();
        script.irrigation_status = 200;
        script.irrigation_on = on;
        script.irrigation_body = None;
    }

    pub fn serve_irrigation_body(&self, body: &str) {
        let mut script = self.script.lock().unwrap();
        script.irrigation_status = 200;
        script.irrigation_body = Some(body.to_string());
    }

    pub fn fail_irrigation(&self, status: u16) {
        self.script.lock().unwrap().irrigation_status = status;
    }

    pub fn set_change_status(&self, status: u16) {
        self.script.lock().unwrap().set_status = status;
    }

    pub fn serve_prediction_body(&self, body: &str) {
        self.script.lock().unwrap().prediction = ok(body);
    }

    pub fn fail_prediction(&self, status: u16) {
        self.script.lock().unwrap().prediction = failure(status);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, method: &str, url: &str, body: Option<serde_json::Value>) -> String {
        let path = match url.rsplit_once('/') {
            Some((_, endpoint)) => format!("/{}", endpoint),
            None => url.to_string(),
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path: path.clone(),
            body,
        });
        path
    }
}

#[async_trait]
impl HttpClient for FakeBackendHttp {
    async fn get(&self, url: &str) -> fieldwatch::Result<HttpResponse> {
        let path = self.record("GET", url, None);
        let script = self.script.lock().unwrap();
        let response = match path.as_str() {
            "/get_sensor_data" => script.sensor.clone(),
            "/get_irrigation_state" if script.irrigation_status != 200 => {
                failure(script.irrigation_status)
            }
            "/get_irrigation_state" => match &script.irrigation_body {
                Some(body) => ok(body),
                None => ok(
                    &serde_json::json!({ "irrigation_state": script.irrigation_on }).to_string(),
                ),
            },
            _ => failure(404),
        };
        Ok(response)
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> fieldwatch::Result<HttpResponse> {
        let path = self.record("POST", url, Some(body.clone()));
        let mut script = self.script.lock().unwrap();
        let response = match path.as_str() {
            "/set_irrigation_state" if script.set_status == 200 => {
                script.irrigation_on = body["state"].as_bool().unwrap_or(false);
                script.irrigation_body = None;
                ok("{}")
            }
            "/set_irrigation_state" => failure(script.set_status),
            "/process_data" => script.prediction.clone(),
            _ => failure(404),
        };
        Ok(response)
    }
}
