use axum::{extract::State, Form, Json};
use service::customize::{CustomizeFields, SubmissionReport};

use crate::errors::ApiError;
use crate::observability;
use crate::state::AppState;

pub async fn get_customize(State(state): State<AppState>) -> Result<Json<CustomizeFields>, ApiError> {
    let fields = state.customize.populate_from_stores().await?;
    Ok(Json(fields))
}

async fn apply(state: &AppState, fields: &CustomizeFields) -> Result<Json<SubmissionReport>, ApiError> {
    let report = state.customize.apply_submission(fields).await?;
    observability::record_submission(&report);
    Ok(Json(report))
}

/// HTML form post (`application/x-www-form-urlencoded`).
pub async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<CustomizeFields>,
) -> Result<Json<SubmissionReport>, ApiError> {
    apply(&state, &fields).await
}

pub async fn submit_json(
    State(state): State<AppState>,
    Json(fields): Json<CustomizeFields>,
) -> Result<Json<SubmissionReport>, ApiError> {
    apply(&state, &fields).await
}
