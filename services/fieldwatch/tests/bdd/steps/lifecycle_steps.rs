//! BDD step definitions for service assembly and shutdown

use std::sync::Arc;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use fieldwatch::config::{Config, DashboardConfig};
use fieldwatch::io::HttpClient;
use fieldwatch::FieldwatchBuilder;

use crate::world::FieldwatchWorld;

fn ephemeral_config() -> Config {
    Config {
        dashboard: DashboardConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
        },
        ..Config::default()
    }
}

#[given("a pre-cancelled cancellation token")]
fn pre_cancelled_token(world: &mut FieldwatchWorld) {
    let token = CancellationToken::new();
    token.cancel();
    world.lifecycle_cancel = Some(token);
}

#[when("the service is built and started")]
async fn service_built_and_started(world: &mut FieldwatchWorld) {
    let http = world.http() as Arc<dyn HttpClient>;
    let mut builder = FieldwatchBuilder::new(ephemeral_config()).with_http_client(http);
    if let Some(cancel) = world.lifecycle_cancel.take() {
        builder = builder.with_cancellation_token(cancel);
    }

    match builder.build().await {
        Ok(service) => {
            world.lifecycle_build_succeeded = Some(true);
            world.lifecycle_start_succeeded = Some(service.start().await.is_ok());
        }
        Err(_) => {
            world.lifecycle_build_succeeded = Some(false);
            world.lifecycle_start_succeeded = Some(false);
        }
    }
}

#[then("the lifecycle should complete successfully")]
fn lifecycle_should_complete(world: &mut FieldwatchWorld) {
    assert_eq!(
        world.lifecycle_build_succeeded,
        Some(true),
        "Expected build to succeed"
    );
    assert_eq!(
        world.lifecycle_start_succeeded,
        Some(true),
        "Expected start to succeed"
    );
}
