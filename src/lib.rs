//! Registration backend for the 「商談時間」を最大化する webinar landing page.
//!
//! A submission is saved to MySQL, then the organizer and the participant are
//! each sent an email through SendGrid. Only the insert decides whether the
//! caller sees `success: true`.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod usecase;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::{
        repositories::registration_repository::RegistrationRepository,
        services::email_service::EmailSender,
    },
    presentation::handlers::registration_handler::create_seminar_router,
    usecase::submit_registration_usecase::SubmitRegistrationUsecase,
};

/// Main router: liveness text on "/" and the registration API under "/api"
pub fn create_app<R, E>(register_service: SubmitRegistrationUsecase<R, E>) -> Router
where
    R: RegistrationRepository + Send + Sync + 'static,
    E: EmailSender + 'static,
{
    Router::new()
        .route("/", get(|| async { "Seminar registration is running" }))
        .nest("/api", create_seminar_router(register_service))
        .layer(TraceLayer::new_for_http())
}
