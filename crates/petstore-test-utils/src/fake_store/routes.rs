use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use petstore_core::{Pet, PetId};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::state::{StoreState, WriteOutcome};

pub(crate) type SharedState = Arc<Mutex<StoreState>>;

/// Same routes as the public demo API.
pub(crate) fn router(state: SharedState) -> Router {
    Router::new()
        .route("/pet", post(create_pet).put(replace_pet))
        .route("/pet/:id", get(get_pet).delete(delete_pet))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_message(status: StatusCode, kind: &str, message: String) -> Response {
    (
        status,
        Json(json!({
            "code": status.as_u16(),
            "type": kind,
            "message": message,
        })),
    )
        .into_response()
}

fn not_found() -> Response {
    api_message(StatusCode::NOT_FOUND, "error", "Pet not found".to_string())
}

fn rejected(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    api_message(status, "error", "write rejected by fake pet store".to_string())
}

async fn create_pet(State(state): State<SharedState>, Json(pet): Json<Pet>) -> Response {
    let outcome = state.lock().create(pet.clone());
    debug!(pet_id = pet.id, ?outcome, "POST /pet");
    match outcome {
        WriteOutcome::Accepted => Json(pet).into_response(),
        WriteOutcome::Missing => not_found(),
        WriteOutcome::Rejected(status) => rejected(status),
    }
}

async fn replace_pet(State(state): State<SharedState>, Json(pet): Json<Pet>) -> Response {
    let outcome = state.lock().replace(pet.clone());
    debug!(pet_id = pet.id, ?outcome, "PUT /pet");
    match outcome {
        WriteOutcome::Accepted => Json(pet).into_response(),
        WriteOutcome::Missing => not_found(),
        WriteOutcome::Rejected(status) => rejected(status),
    }
}

async fn get_pet(State(state): State<SharedState>, Path(id): Path<PetId>) -> Response {
    let pet = state.lock().fetch(id);
    debug!(pet_id = id, found = pet.is_some(), "GET /pet/{{id}}");
    match pet {
        Some(pet) => Json(pet).into_response(),
        None => not_found(),
    }
}

async fn delete_pet(State(state): State<SharedState>, Path(id): Path<PetId>) -> Response {
    let outcome = state.lock().delete(id);
    debug!(pet_id = id, ?outcome, "DELETE /pet/{{id}}");
    match outcome {
        WriteOutcome::Accepted => api_message(StatusCode::OK, "unknown", id.to_string()),
        WriteOutcome::Missing => not_found(),
        WriteOutcome::Rejected(status) => rejected(status),
    }
}
