//! Web dashboard: the operator page, its two actions and a JSON sidebar feed

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};

use crate::models::{CropType, FertilizerRequest, NutrientLevel, SoilType};
use crate::render::{self, escape_html, Banner, BannerKind, SidebarView};
use crate::sidebar::Sidebar;
use crate::state::SidebarStatus;

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub sidebar: Sidebar,
    pub refresh_interval_ms: u64,
}

/// Build the dashboard axum router
pub fn build_router(sidebar: Sidebar, refresh_interval_ms: u64) -> Router {
    let dashboard_state = DashboardState {
        sidebar,
        refresh_interval_ms,
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/irrigation", post(toggle_handler))
        .route("/predict", post(predict_handler))
        .route("/api/sidebar", get(sidebar_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

/// Body of the toggle button's form: the state being asked for
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub state: bool,
}

/// Body of the soil/crop form
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    pub nitrogen: i64,
    pub potassium: i64,
    pub phosphorous: i64,
    pub soil_type: SoilType,
    pub crop_type: CropType,
}

impl From<PredictForm> for FertilizerRequest {
    fn from(form: PredictForm) -> Self {
        Self {
            nitrogen: NutrientLevel::clamped(form.nitrogen),
            potassium: NutrientLevel::clamped(form.potassium),
            phosphorous: NutrientLevel::clamped(form.phosphorous),
            soil_type: form.soil_type,
            crop_type: form.crop_type,
        }
    }
}

/// Payload of `/api/sidebar`
#[derive(Debug, Serialize)]
pub struct SidebarPayload {
    pub status: SidebarStatus,
    pub view: SidebarView,
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let view = current_view(&dashboard).await;
    Html(render_page(
        &view,
        &FertilizerRequest::default(),
        None,
        None,
        dashboard.refresh_interval_ms,
    ))
}

async fn toggle_handler(
    State(dashboard): State<DashboardState>,
    Form(form): Form<ToggleForm>,
) -> impl IntoResponse {
    let result = dashboard.sidebar.toggle(form.state).await;
    let banner = render::toggle_outcome(form.state, &result);
    let view = current_view(&dashboard).await;
    Html(render_page(
        &view,
        &FertilizerRequest::default(),
        Some(&banner),
        None,
        dashboard.refresh_interval_ms,
    ))
}

async fn predict_handler(
    State(dashboard): State<DashboardState>,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!("Rejected prediction form: {}", rejection.body_text());
            let banner = render::invalid_form(&rejection.body_text());
            let view = current_view(&dashboard).await;
            let page = render_page(
                &view,
                &FertilizerRequest::default(),
                None,
                Some(&banner),
                dashboard.refresh_interval_ms,
            );
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };

    let request = FertilizerRequest::from(form);
    tracing::info!(
        "Prediction requested: N={} K={} P={} soil={} crop={}",
        request.nitrogen,
        request.potassium,
        request.phosphorous,
        request.soil_type,
        request.crop_type
    );

    let result = dashboard
        .sidebar
        .backend()
        .submit_fertilizer_request(&request)
        .await;
    let banner = render::prediction_outcome(&result);
    let view = current_view(&dashboard).await;
    Html(render_page(
        &view,
        &request,
        None,
        Some(&banner),
        dashboard.refresh_interval_ms,
    ))
    .into_response()
}

async fn sidebar_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let snapshot = dashboard.sidebar.state().read().await;
    Json(SidebarPayload {
        status: SidebarStatus::from(&*snapshot),
        view: SidebarView::from(&*snapshot),
    })
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn current_view(dashboard: &DashboardState) -> SidebarView {
    let snapshot = dashboard.sidebar.state().read().await;
    SidebarView::from(&*snapshot)
}

fn banner_colors(kind: BannerKind) -> (&'static str, &'static str) {
    match kind {
        BannerKind::Success => ("#155724", "#d4edda"),
        BannerKind::Warning => ("#856404", "#fff3cd"),
        BannerKind::Error => ("#721c24", "#f8d7da"),
    }
}

fn render_banner(banner: &Banner) -> String {
    let (color, bg) = banner_colors(banner.kind);
    format!(
        r#"<div class="banner" style="padding: 0.5rem 0.75rem; margin: 0.5rem 0; border-radius: 0.25rem; color: {}; background-color: {};">{}</div>"#,
        color,
        bg,
        escape_html(&banner.text)
    )
}

fn render_sidebar(view: &SidebarView) -> String {
    let warnings: String = view.warnings.iter().map(render_banner).collect();
    let sensor: String = view
        .sensor_lines
        .iter()
        .map(|line| format!("<p style=\"margin: 0.25rem 0;\">{}</p>", escape_html(line)))
        .collect();
    let toggle = match &view.toggle {
        Some(button) => format!(
            r#"<form method="post" action="/irrigation">
                <input type="hidden" name="state" value="{}">
                <button type="submit" style="background-color: #007bff; color: white; border: none; border-radius: 20px; padding: 10px 20px;">{}</button>
            </form>"#,
            button.requested_on,
            escape_html(&button.label)
        ),
        None => String::new(),
    };

    format!(
        r#"<div id="warnings-slot">{warnings}</div>
        <div id="sensor-slot">{sensor}</div>
        <p id="irrigation-slot" style="font-weight: 600;">{irrigation}</p>
        <div id="toggle-slot">{toggle}</div>"#,
        warnings = warnings,
        sensor = sensor,
        irrigation = escape_html(&view.irrigation_line),
        toggle = toggle,
    )
}

fn render_number_input(name: &str, label: &str, value: NutrientLevel) -> String {
    format!(
        r#"<label style="display: block; margin: 0.5rem 0;">{label}
            <input type="number" name="{name}" min="{min}" max="{max}" step="1" value="{value}" required>
        </label>"#,
        label = label,
        name = name,
        min = NutrientLevel::MIN,
        max = NutrientLevel::MAX,
        value = value,
    )
}

fn render_select<T: Copy + PartialEq + std::fmt::Display>(
    name: &str,
    label: &str,
    options: &[T],
    selected: T,
) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let selected_attr = if *option == selected { " selected" } else { "" };
            format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                option, selected_attr
            )
        })
        .collect();
    format!(
        r#"<label style="display: block; margin: 0.5rem 0;">{}
            <select name="{}">{}</select>
        </label>"#,
        label, name, options
    )
}

/// Render the whole operator page
pub fn render_page(
    view: &SidebarView,
    form: &FertilizerRequest,
    sidebar_banner: Option<&Banner>,
    prediction_banner: Option<&Banner>,
    refresh_interval_ms: u64,
) -> String {
    let sidebar_banner = sidebar_banner.map(render_banner).unwrap_or_default();
    let prediction_banner = prediction_banner.map(render_banner).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Fertilizer &amp; Irrigation Monitoring System</title>
    <script>
        function escapeHtml(text) {{
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }}
        const bannerColors = {{
            success: ['#155724', '#d4edda'],
            warning: ['#856404', '#fff3cd'],
            error: ['#721c24', '#f8d7da'],
        }};
        function renderBanner(banner) {{
            const [color, bg] = bannerColors[banner.kind];
            return `<div class="banner" style="padding: 0.5rem 0.75rem; margin: 0.5rem 0; border-radius: 0.25rem; color: ${{color}}; background-color: ${{bg}};">${{escapeHtml(banner.text)}}</div>`;
        }}
        function refreshSidebar() {{
            fetch('/api/sidebar')
                .then(r => r.json())
                .then(data => {{
                    const view = data.view;
                    document.getElementById('warnings-slot').innerHTML = view.warnings
                        .map(renderBanner)
                        .join('');
                    document.getElementById('sensor-slot').innerHTML = view.sensor_lines
                        .map(line => `<p style="margin: 0.25rem 0;">${{escapeHtml(line)}}</p>`)
                        .join('');
                    document.getElementById('irrigation-slot').textContent = view.irrigation_line;
                    document.getElementById('toggle-slot').innerHTML = view.toggle
                        ? `<form method="post" action="/irrigation">
                               <input type="hidden" name="state" value="${{view.toggle.requested_on}}">
                               <button type="submit" style="background-color: #007bff; color: white; border: none; border-radius: 20px; padding: 10px 20px;">${{escapeHtml(view.toggle.label)}}</button>
                           </form>`
                        : '';
                }});
        }}
        setInterval(refreshSidebar, {refresh_interval_ms});
    </script>
</head>
<body style="font-family: system-ui, sans-serif; margin: 0; display: flex;">
    <aside style="width: 300px; min-height: 100vh; padding: 1rem; background-color: #f0f2f6;">
        <h2>Live Sensor Data</h2>
        {sidebar_banner}
        <div id="sidebar">{sidebar}</div>
    </aside>
    <main style="flex: 1; max-width: 720px; padding: 1rem 2rem;">
        <h1>Fertilizer &amp; Irrigation Monitoring System</h1>
        <section>
            <h2>Soil &amp; Crop Information</h2>
            <form method="post" action="/predict">
                {nitrogen}
                {potassium}
                {phosphorous}
                {soil}
                {crop}
                <button type="submit" style="background-color: #007bff; color: white; border: none; border-radius: 20px; padding: 10px 20px;">Predict Fertilizer</button>
            </form>
            {prediction_banner}
        </section>
    </main>
</body>
</html>"#,
        refresh_interval_ms = refresh_interval_ms,
        sidebar_banner = sidebar_banner,
        sidebar = render_sidebar(view),
        nitrogen = render_number_input("nitrogen", "Nitrogen Level", form.nitrogen),
        potassium = render_number_input("potassium", "Potassium Level", form.potassium),
        phosphorous = render_number_input("phosphorous", "Phosphorous Level", form.phosphorous),
        soil = render_select("soil_type", "Soil Type", &SoilType::ALL, form.soil_type),
        crop = render_select("crop_type", "Crop Type", &CropType::ALL, form.crop_type),
        prediction_banner = prediction_banner,
    )
}
