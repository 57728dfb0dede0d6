use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::registration::{NewRegistration, Registration, RegistrationId},
};

/// Persistence for seminar registrations. Rows are insert-only.
#[async_trait]
pub trait RegistrationRepository {
    /// Insert a registration, failing with `DatabaseUnavailable` when there is no connection
    async fn create(&self, record: NewRegistration) -> Result<RegistrationId, RepositoryError>;

    /// All registrations in no particular order; empty when there is no connection
    async fn list_all(&self) -> Vec<Registration>;
}
