//! BDD test world for fieldwatch

use std::sync::Arc;

use cucumber::World;
use fieldwatch::sidebar::Sidebar;
use fieldwatch::state::new_state_handle;
use tokio_util::sync::CancellationToken;

#[path = "fake_backend.rs"]
pub mod fake_backend;

use fake_backend::FakeBackendHttp;

#[derive(Debug, Default, World)]
pub struct FieldwatchWorld {
    pub http: Option<Arc<FakeBackendHttp>>,
    pub sidebar: Option<Sidebar>,
    pub response_status: Option<u16>,
    pub response_body: Option<String>,

    // Lifecycle testing
    pub lifecycle_cancel: Option<CancellationToken>,
    pub lifecycle_build_succeeded: Option<bool>,
    pub lifecycle_start_succeeded: Option<bool>,
}

impl FieldwatchWorld {
    pub fn http(&mut self) -> Arc<FakeBackendHttp> {
        Arc::clone(
            self.http
                .get_or_insert_with(|| Arc::new(FakeBackendHttp::default())),
        )
    }

    /// Sidebar wired to the fake backend through the real HTTP backend client
    pub fn sidebar(&mut self) -> Sidebar {
        if let Some(sidebar) = &self.sidebar {
            return sidebar.clone();
        }
        let http = self.http();
        let backend = fieldwatch::backend::BackendClient::new(
            &fieldwatch::config::BackendConfig::default(),
            http,
        );
        let sidebar = Sidebar::new(Arc::new(backend), new_state_handle());
        self.sidebar = Some(sidebar.clone());
        sidebar
    }

    pub fn body(&self) -> &str {
        self.response_body.as_deref().expect("no response body")
    }
}
