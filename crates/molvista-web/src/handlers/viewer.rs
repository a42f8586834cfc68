//! Viewer page and the compound listing that feeds its picker.

use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::state::SharedState;

/// The viewer is a single static page; it talks to the JSON API from there.
const INDEX_HTML: &str = include_str!("../../templates/index.html");

pub async fn viewer_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Serialize)]
pub struct CompoundSummary {
    pub key: String,
    pub name: String,
    pub formula: String,
}

/// GET /api/compounds — every compound the registry can serve, key-sorted.
pub async fn api_compounds(State(state): State<SharedState>) -> Json<Vec<CompoundSummary>> {
    let compounds = state
        .registry
        .iter_sorted()
        .into_iter()
        .map(|record| CompoundSummary {
            key: record.key.clone(),
            name: record.name.clone(),
            formula: record.formula.clone(),
        })
        .collect();
    Json(compounds)
}
