use std::{fmt::Display, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";
const DEFAULT_FROM_EMAIL: &str = "noreply@anyenv-inc.com";
const DEFAULT_ADMIN_EMAIL: &str = "info@anyenv-inc.com";

/// Credentials and addressing for the SendGrid v3 mail API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendGridConfig {
    /// `None` disables delivery; every send then reports failure
    pub api_key: Option<String>,
    pub from_email: String,
    pub endpoint: String,
}

impl SendGridConfig {
    pub fn new(api_key: Option<String>, from_email: impl Into<String>) -> Self {
        Self {
            api_key,
            from_email: from_email.into(),
            endpoint: DEFAULT_SENDGRID_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// `None` leaves the registration store without a connection
    pub database_url: Option<String>,
    pub admin_email: String,
    pub sendgrid: SendGridConfig,
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` has been loaded)
    pub fn load() -> Self {
        let sendgrid = SendGridConfig {
            api_key: optional("SENDGRID_API_KEY"),
            from_email: with_default("SENDGRID_FROM_EMAIL", DEFAULT_FROM_EMAIL),
            endpoint: with_default("SENDGRID_ENDPOINT", DEFAULT_SENDGRID_ENDPOINT),
        };

        Self {
            port: parse_or("PORT", 8080),
            database_url: optional("DATABASE_URL"),
            admin_email: with_default("ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            sendgrid,
        }
    }
}

fn optional(key: &str) -> Option<String> {
    let value = non_blank(dotenvy::var(key).ok());
    if value.is_none() {
        warn!("{key} not set");
    }
    value
}

fn with_default(key: &str, default: &str) -> String {
    non_blank(dotenvy::var(key).ok()).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

/// Blank values in `.env` count as unset
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match dotenvy::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
