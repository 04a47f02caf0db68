//! Steps that drive the dashboard router the way a browser would

use axum::body::Body;
use axum::http::{header, Request};
use cucumber::{then, when};
use tower::ServiceExt;

use fieldwatch::dashboard::build_router;
use fieldwatch::render::SidebarView;

use crate::world::FieldwatchWorld;

async fn send(world: &mut FieldwatchWorld, request: Request<Body>) {
    let app = build_router(world.sidebar(), 3000);
    let response = app.oneshot(request).await.unwrap();
    world.response_status = Some(response.status().as_u16());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    world.response_body = Some(String::from_utf8(body.to_vec()).unwrap());
}

fn form_post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[when("the dashboard page is requested")]
async fn request_index(world: &mut FieldwatchWorld) {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    send(world, request).await;
}

#[when("the operator presses the irrigation toggle")]
async fn press_toggle(world: &mut FieldwatchWorld) {
    let toggle = {
        let sidebar = world.sidebar();
        let snapshot = sidebar.state().read().await;
        let view = SidebarView::from(&*snapshot);
        view.toggle.expect("toggle button is not shown")
    };
    send(
        world,
        form_post("/irrigation", format!("state={}", toggle.requested_on)),
    )
    .await;
}

#[when(
    expr = "the operator submits nitrogen {int}, potassium {int}, phosphorous {int}, soil {word} and crop {word}"
)]
async fn submit_prediction(
    world: &mut FieldwatchWorld,
    nitrogen: i64,
    potassium: i64,
    phosphorous: i64,
    soil: String,
    crop: String,
) {
    let body = format!(
        "nitrogen={}&potassium={}&phosphorous={}&soil_type={}&crop_type={}",
        nitrogen, potassium, phosphorous, soil, crop
    );
    send(world, form_post("/predict", body)).await;
}

#[then(expr = "the response status should be {int}")]
fn response_status(world: &mut FieldwatchWorld, expected: u16) {
    assert_eq!(world.response_status, Some(expected));
}

#[then(expr = "the page should contain {string}")]
fn page_contains(world: &mut FieldwatchWorld, expected: String) {
    let body = world.body();
    assert!(
        body.contains(&expected),
        "Expected page to contain '{}', but it didn't.\nPage:\n{}",
        expected,
        body
    );
}

#[then(expr = "the page should not contain {string}")]
fn page_does_not_contain(world: &mut FieldwatchWorld, unexpected: String) {
    let body = world.body();
    assert!(
        !body.contains(&unexpected),
        "Expected page not to contain '{}'.\nPage:\n{}",
        unexpected,
        body
    );
}
