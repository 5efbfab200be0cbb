use axum::{extract::{Path, State}, Json};
use serde::Serialize;
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct ContentView {
    pub section: String,
    pub enabled: bool,
    /// Raw markdown; rendering is left to the client.
    pub body: Option<String>,
}

pub async fn get_content(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<ContentView>, ApiError> {
    let sec = state
        .customize
        .sections()
        .get(&section)
        .ok_or_else(|| ServiceError::not_found(&format!("section {section}")))?;

    let enabled = state.reader.exists(sec).await?;
    let body = if enabled { state.reader.body(sec).await? } else { None };
    Ok(Json(ContentView { section: sec.id.clone(), enabled, body }))
}
