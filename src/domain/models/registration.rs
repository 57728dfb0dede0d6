use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RegistrationId = i32;

/// Registration as handed to the store, before id and timestamp are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub company_name: String,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub challenge: Option<String>,
}

/// Persisted registration. There is no update path, so only getters are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    id: RegistrationId,
    company_name: String,
    name: String,
    position: String,
    email: String,
    phone: String,
    challenge: Option<String>,
    created_at: DateTime<Utc>,
}

impl Registration {
    pub fn reconstruct(id: RegistrationId, record: NewRegistration, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            company_name: record.company_name,
            name: record.name,
            position: record.position,
            email: record.email,
            phone: record.phone,
            challenge: record.challenge,
            created_at,
        }
    }

    pub fn id(&self) -> RegistrationId {
        self.id
    }
    pub fn company_name(&self) -> &str {
        &self.company_name
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn position(&self) -> &str {
        &self.position
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn phone(&self) -> &str {
        &self.phone
    }
    pub fn challenge(&self) -> Option<&str> {
        self.challenge.as_deref()
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
