use super::{
    page::{Outcome, render_page},
    types::{EnhanceRequest, EnhanceResponse, ErrorResponse, status_for},
};
use crate::enhance::{Enhancer, UserInputs};
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub enhancer: Arc<Enhancer>,
}

pub async fn index() -> Html<String> {
    Html(render_page(&UserInputs::default(), Outcome::Blank))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(request): Form<EnhanceRequest>,
) -> (StatusCode, Html<String>) {
    info!("Received form submission");

    let (credential, inputs) = request.into_parts();
    match state.enhancer.submit(&credential, &inputs).await {
        Ok(output) => (
            StatusCode::OK,
            Html(render_page(&inputs, Outcome::Rendered(&output))),
        ),
        Err(e) => {
            error!("Form submission failed: {}", e);
            (
                status_for(&e),
                Html(render_page(&inputs, Outcome::Failed(&e))),
            )
        }
    }
}

pub async fn enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("Received enhance API request");

    let (credential, inputs) = request.into_parts();
    match state.enhancer.submit(&credential, &inputs).await {
        Ok(output) => Ok(Json(output.into())),
        Err(e) => {
            error!("Enhance API request failed: {}", e);
            Err((status_for(&e), Json(ErrorResponse::from(&e))))
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}
