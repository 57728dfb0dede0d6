use std::sync::Arc;

use crate::{
    domain::{
        repositories::registration_repository::RegistrationRepository,
        services::email_service::EmailSender,
    },
    usecase::submit_registration_usecase::{
        RegistrationInput, RegistrationResult, SubmitRegistrationUsecase,
    },
};
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use tracing::info;

// Request

/// json for seminar registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub company: String,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
}

impl From<RegisterRequest> for RegistrationInput {
    fn from(request: RegisterRequest) -> Self {
        Self {
            company: request.company,
            name: request.name,
            position: request.position,
            email: request.email,
            phone: request.phone,
            challenge: request.challenge,
        }
    }
}

// Response

/// json for seminar registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
}

impl From<RegistrationResult> for RegistrationResponse {
    fn from(result: RegistrationResult) -> Self {
        Self {
            success: result.success,
            message: result.message,
        }
    }
}

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router under "/api"
pub fn create_seminar_router<
    R: RegistrationRepository + Send + Sync + 'static,
    E: EmailSender + 'static,
>(
    register_service: SubmitRegistrationUsecase<R, E>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/seminar/register", post(register::<R, E>))
        .with_state(state)
}

pub struct AppState<R: RegistrationRepository, E: EmailSender> {
    pub register_service: Arc<SubmitRegistrationUsecase<R, E>>,
}

// derive(Clone) would require R: Clone and E: Clone
impl<R: RegistrationRepository, E: EmailSender> Clone for AppState<R, E> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
        }
    }
}

/// handler function for seminar registration.
/// Failures are reported in the body, so the status is always 200 once the json parses.
async fn register<R: RegistrationRepository + Send + Sync, E: EmailSender>(
    State(state): State<AppState<R, E>>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!(company = %payload.company, "registration request received");

    let result = state.register_service.submit(payload.into()).await;

    (StatusCode::OK, Json(RegistrationResponse::from(result))).into_response()
}
