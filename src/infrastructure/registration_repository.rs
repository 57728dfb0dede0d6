use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ConnectionTrait, DatabaseConnection, EntityTrait, Schema,
};
use tracing::{error, info, warn};

use crate::{
    domain::{
        error::RepositoryError,
        models::registration::{NewRegistration, Registration, RegistrationId},
        repositories::registration_repository::RegistrationRepository,
    },
    infrastructure::entity::registrations,
};

/// MySQL backed store. `db` is `None` when no connection could be obtained at startup.
pub struct MySqlRegistrationRepository {
    db: Option<DatabaseConnection>,
}

impl MySqlRegistrationRepository {
    pub fn new(db: Option<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn is_available(&self) -> bool {
        self.db.is_some()
    }

    /// Create the registrations table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        let db = self.db.as_ref().ok_or(RepositoryError::DatabaseUnavailable)?;

        let backend = db.get_database_backend();
        let mut statement = Schema::new(backend).create_table_from_entity(registrations::Entity);
        statement.if_not_exists();

        db.execute(backend.build(&statement))
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        info!("registrations table is ready");
        Ok(())
    }
}

impl From<registrations::Model> for Registration {
    fn from(model: registrations::Model) -> Self {
        Registration::reconstruct(
            model.id,
            NewRegistration {
                company_name: model.company_name,
                name: model.name,
                position: model.position,
                email: model.email,
                phone: model.phone,
                challenge: model.challenge,
            },
            model.created_at,
        )
    }
}

#[async_trait]
impl RegistrationRepository for MySqlRegistrationRepository {
    async fn create(&self, record: NewRegistration) -> Result<RegistrationId, RepositoryError> {
        let db = self.db.as_ref().ok_or(RepositoryError::DatabaseUnavailable)?;

        let model = registrations::ActiveModel {
            id: NotSet,
            company_name: Set(record.company_name),
            name: Set(record.name),
            position: Set(record.position),
            email: Set(record.email),
            phone: Set(record.phone),
            challenge: Set(record.challenge),
            created_at: Set(Utc::now()),
        };

        let insert_result = registrations::Entity::insert(model)
            .exec(db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(insert_result.last_insert_id)
    }

    async fn list_all(&self) -> Vec<Registration> {
        let Some(db) = self.db.as_ref() else {
            warn!("Cannot list registrations: database not available");
            return Vec::new();
        };

        match registrations::Entity::find().all(db).await {
            Ok(models) => models.into_iter().map(Registration::from).collect(),
            Err(e) => {
                error!("Failed to list registrations: {e}");
                Vec::new()
            }
        }
    }
}
