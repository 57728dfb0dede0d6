use tracing::{error, info, warn};

use crate::{
    domain::{
        models::{registration::NewRegistration, seminar::Seminar},
        repositories::registration_repository::RegistrationRepository,
        services::email_service::EmailSender,
    },
    usecase::registration_mail::{admin_notification, participant_confirmation},
};

pub const REGISTRATION_COMPLETED: &str = "Registration completed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Input of one registration, as received from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    pub company: String,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub challenge: Option<String>,
}

impl From<RegistrationInput> for NewRegistration {
    fn from(input: RegistrationInput) -> Self {
        Self {
            company_name: input.company,
            name: input.name,
            position: input.position,
            email: input.email,
            phone: input.phone,
            challenge: input.challenge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResult {
    pub success: bool,
    pub message: String,
}

impl RegistrationResult {
    fn completed() -> Self {
        Self {
            success: true,
            message: REGISTRATION_COMPLETED.to_string(),
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            message: REGISTRATION_FAILED.to_string(),
        }
    }
}

pub struct SubmitRegistrationUsecase<R: RegistrationRepository, E: EmailSender> {
    registration_repository: R,
    email_sender: E,
    admin_email: String,
    seminar: Seminar,
}

impl<R: RegistrationRepository, E: EmailSender> SubmitRegistrationUsecase<R, E> {
    pub fn new(registration_repository: R, email_sender: E, admin_email: String, seminar: Seminar) -> Self {
        Self {
            registration_repository,
            email_sender,
            admin_email,
            seminar,
        }
    }

    /// Persist the registration, then notify the organizer and the submitter.
    ///
    /// Only the insert decides the outcome. Email delivery failures are logged
    /// and do not change the result.
    pub async fn submit(&self, input: RegistrationInput) -> RegistrationResult
    where
        R: Send + Sync,
    {
        let record = NewRegistration::from(input);

        let id = match self.registration_repository.create(record.clone()).await {
            Ok(id) => id,
            Err(e) => {
                error!("Failed to save registration: {e}");
                return RegistrationResult::failed();
            }
        };
        info!(id, "registration saved");

        let admin_mail = admin_notification(&self.admin_email, &self.seminar, &record);
        if !self.email_sender.send(&admin_mail).await {
            warn!(id, "admin notification was not delivered");
        }

        let confirmation = participant_confirmation(&self.seminar, &record);
        if !self.email_sender.send(&confirmation).await {
            warn!(id, "confirmation email was not delivered");
        }

        RegistrationResult::completed()
    }
}
