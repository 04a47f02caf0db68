//! Fieldwatch - Fertilizer and irrigation monitoring dashboard
//!
//! Polls a remote backend for sensor readings and irrigation state, serves
//! them on a web page, lets the operator toggle irrigation and asks the
//! backend for fertilizer recommendations.

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod io;
pub mod models;
pub mod poller;
pub mod render;
pub mod sidebar;
pub mod state;

pub use config::{load_config, Config};
pub use error::{FetchError, FieldwatchError, Result};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::backend::{Backend, BackendClient};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::sidebar::Sidebar;

/// Assembles a [`Fieldwatch`] service, allowing test doubles to be injected
pub struct FieldwatchBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    backend: Option<Arc<dyn Backend>>,
    cancel: Option<CancellationToken>,
}

impl FieldwatchBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            backend: None,
            cancel: None,
        }
    }

    /// Use this HTTP client instead of a reqwest client
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Use this backend instead of one built from the config.
    /// Takes precedence over [`with_http_client`](Self::with_http_client).
    pub fn with_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Bind the dashboard listener and wire the components together
    pub async fn build(self) -> Result<Fieldwatch> {
        let backend = match self.backend {
            Some(backend) => backend,
            None => {
                let http = match self.http {
                    Some(http) => http,
                    None => Arc::new(ReqwestHttpClient::with_timeout(
                        self.config.backend.timeout(),
                    )?),
                };
                Arc::new(BackendClient::new(&self.config.backend, http))
            }
        };

        let state = state::new_state_handle();
        let sidebar = Sidebar::new(backend, state);

        let addr = format!(
            "{}:{}",
            self.config.dashboard.bind_address, self.config.dashboard.port
        );
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            FieldwatchError::Dashboard(format!("Failed to bind dashboard to {}: {}", addr, e))
        })?;

        Ok(Fieldwatch {
            config: self.config,
            sidebar,
            listener,
            cancel: self.cancel.unwrap_or_else(CancellationToken::new),
        })
    }
}

/// A built service, ready to start
pub struct Fieldwatch {
    config: Config,
    sidebar: Sidebar,
    listener: TcpListener,
    cancel: CancellationToken,
}

impl Fieldwatch {
    /// Address the dashboard is listening on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the refresh task and the dashboard until the cancellation token
    /// fires
    pub async fn start(self) -> Result<()> {
        let interval = self.config.polling.interval();
        let poller = poller::spawn(self.sidebar.clone(), interval, self.cancel.clone());

        let router = dashboard::build_router(self.sidebar, interval.as_millis() as u64);
        tracing::info!("Dashboard listening on http://{}", self.listener.local_addr()?);
        tracing::info!(
            "Polling {} every {:?}",
            self.config.backend.normalized_base_url(),
            interval
        );

        let cancel = self.cancel.clone();
        axum::serve(self.listener, router)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await
            .map_err(|e| FieldwatchError::Dashboard(format!("Dashboard server failed: {}", e)))?;

        self.cancel.cancel();
        if let Err(e) = poller.await {
            tracing::warn!("Polling task ended abnormally: {}", e);
        }

        tracing::info!("Fieldwatch stopped");
        Ok(())
    }
}
