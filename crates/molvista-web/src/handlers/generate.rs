//! 3D model generation endpoint — compound name in, molblock + metadata out.
//!
//! Every outcome is HTTP 200 with a `success` flag; callers inspect the flag,
//! not the status code. Failures come in three kinds: unknown compound,
//! unparsable structure data, and anything that goes wrong while generating
//! the conformer (including a panicking worker task).

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use molvista_chem::StructureError;
use molvista_common::CompoundRecord;

use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub compound: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerateResponse {
    fn success(record: &CompoundRecord, molblock: String) -> Self {
        Self {
            success: true,
            model: Some(molblock),
            name: Some(record.name.clone()),
            formula: Some(record.formula.clone()),
            description: Some(record.description.clone()),
            message: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            model: None,
            name: None,
            formula: None,
            description: None,
            message: Some(message),
        }
    }
}

/// Failure kinds for a generation request, in the order the pipeline can
/// produce them.
#[derive(Debug)]
enum GenerateError {
    NotFound,
    InvalidStructure,
    Generation(String),
}

impl GenerateError {
    fn message(&self) -> String {
        match self {
            Self::NotFound => "Compound not found.".to_string(),
            Self::InvalidStructure => "Invalid SMILES.".to_string(),
            Self::Generation(detail) => detail.clone(),
        }
    }
}

/// POST /generate_3d
///
/// The body is parsed leniently: a missing or malformed payload is treated
/// the same as an unknown compound. The contract never errors at the
/// transport level, so the extractor must not reject anything either.
pub async fn generate_3d(
    State(state): State<SharedState>,
    body: String,
) -> Json<GenerateResponse> {
    let request: GenerateRequest = serde_json::from_str(&body).unwrap_or_default();
    let compound = request.compound;

    match run(&state, &compound).await {
        Ok(response) => Json(response),
        Err(err) => {
            warn!(compound = %compound.trim(), error = ?err, "generation request failed");
            Json(GenerateResponse::failure(err.message()))
        }
    }
}

async fn run(state: &SharedState, compound: &str) -> Result<GenerateResponse, GenerateError> {
    let record = state
        .registry
        .lookup(compound)
        .ok_or(GenerateError::NotFound)?
        .clone();

    // Conformer generation is CPU-bound; keep it off the async workers.
    let smiles = record.smiles.clone();
    let name = record.name.clone();
    let joined =
        tokio::task::spawn_blocking(move || molvista_chem::generate_model(&smiles, &name)).await;

    let model = match joined {
        Ok(Ok(model)) => model,
        Ok(Err(StructureError::Parse(detail))) => {
            error!(key = %record.key, detail = %detail, "registry SMILES failed to parse");
            return Err(GenerateError::InvalidStructure);
        }
        Ok(Err(StructureError::Empty)) => return Err(GenerateError::InvalidStructure),
        Ok(Err(err @ StructureError::Generation(_))) => {
            return Err(GenerateError::Generation(err.to_string()));
        }
        // The blocking task panicked; surface it as a generic failure
        // instead of crashing the request cycle.
        Err(join_err) => return Err(GenerateError::Generation(join_err.to_string())),
    };

    info!(
        key = %record.key,
        atoms = model.total_atoms,
        "generated 3D model"
    );
    Ok(GenerateResponse::success(&record, model.molblock))
}
