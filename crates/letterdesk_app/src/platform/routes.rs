use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderValue, StatusCode},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use desk_logging::desk_debug;
use letterdesk_core::{Field, Flow, Msg};
use serde::{Deserialize, Serialize};

use super::app::App;
use super::guard::{guard_requests, HostGuard};
use super::ui;
use crate::errors::AppError;

pub fn build_router(app: Arc<App>, guard: HostGuard) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/:flow", get(show_flow))
        .route("/:flow/edit", post(edit_field))
        .route("/:flow/submit", post(submit_form))
        .route("/:flow/download", get(download))
        .route("/:flow/copy", post(copy_text))
        .layer(middleware::from_fn_with_state(
            Arc::new(guard),
            guard_requests,
        ))
        .with_state(app)
}

#[derive(Debug, Deserialize)]
struct EditRequest {
    field: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditResponse {
    submit_enabled: bool,
}

fn parse_flow(slug: &str) -> Result<Flow, AppError> {
    Flow::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("no page named '{slug}'")))
}

fn back_to(flow: Flow) -> Redirect {
    Redirect::to(&ui::constants::page_path(flow))
}

async fn root() -> Redirect {
    back_to(Flow::CoverLetter)
}

async fn show_flow(
    State(app): State<Arc<App>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let flow = parse_flow(&slug)?;
    app.dispatch(Msg::Navigated(flow));
    let view = app.view(flow);
    let page = ui::render::render_page(&view);
    let count = view.notifications.len();
    if count > 0 {
        app.dispatch(Msg::NotificationsShown { flow, count });
    }
    Ok(Html(page))
}

async fn edit_field(
    State(app): State<Arc<App>>,
    Path(slug): Path<String>,
    Form(edit): Form<EditRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let flow = parse_flow(&slug)?;
    let field = Field::from_key(&edit.field)
        .ok_or_else(|| AppError::Validation(format!("unknown field '{}'", edit.field)))?;
    app.dispatch(Msg::FieldEdited {
        flow,
        field,
        value: edit.value,
    });
    Ok(Json(EditResponse {
        submit_enabled: app.view(flow).submit_enabled,
    }))
}

async fn submit_form(
    State(app): State<Arc<App>>,
    Path(slug): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let flow = parse_flow(&slug)?;
    for (key, value) in fields {
        match Field::from_key(&key) {
            Some(field) => {
                app.dispatch(Msg::FieldEdited { flow, field, value });
            }
            None => desk_debug!("Ignoring unknown form key {}", key),
        }
    }
    app.dispatch(Msg::SubmitClicked(flow));
    Ok(back_to(flow))
}

async fn download(
    State(app): State<Arc<App>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let flow = parse_flow(&slug)?;
    match app.dispatch(Msg::DownloadClicked(flow)) {
        Some(url) => open_external(&url),
        None => Ok(back_to(flow).into_response()),
    }
}

/// Redirects to a URL supplied by the generator, which may not be a valid
/// header value.
fn open_external(url: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(url)
        .map_err(|_| AppError::Validation("download URL cannot be opened".to_string()))?;
    Ok((StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response())
}

async fn copy_text(
    State(app): State<Arc<App>>,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    let flow = parse_flow(&slug)?;
    // The clipboard write blocks until the clipboard thread answers.
    tokio::task::spawn_blocking(move || app.dispatch(Msg::CopyTextClicked(flow)))
        .await
        .map_err(|err| AppError::Internal(format!("copy task failed: {err}")))?;
    Ok(back_to(flow))
}
