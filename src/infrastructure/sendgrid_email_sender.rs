use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    config::SendGridConfig,
    domain::services::email_service::{EmailMessage, EmailSender},
};

// SendGrid v3 mail/send body

#[derive(Serialize)]
struct MailSendBody<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime_type: &'static str,
    value: &'a str,
}

impl<'a> MailSendBody<'a> {
    fn new(from: &'a str, message: &'a EmailMessage) -> Self {
        // text/plain must come before text/html
        let mut content = vec![Content {
            mime_type: "text/plain",
            value: &message.text,
        }];
        if let Some(html) = message.html.as_deref() {
            content.push(Content {
                mime_type: "text/html",
                value: html,
            });
        }

        Self {
            personalizations: vec![Personalization {
                to: vec![Address { email: &message.to }],
            }],
            from: Address { email: from },
            subject: &message.subject,
            content,
        }
    }
}

#[derive(Clone)]
pub struct SendGridEmailSender {
    config: SendGridConfig,
    client: Client,
}

impl SendGridEmailSender {
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl EmailSender for SendGridEmailSender {
    async fn send(&self, message: &EmailMessage) -> bool {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!(to = %message.to, "SENDGRID_API_KEY is not configured, email not sent");
            return false;
        };

        let body = MailSendBody::new(&self.config.from_email, message);
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => {
                debug!(to = %message.to, status = %res.status(), "email accepted");
                true
            }
            Ok(res) => {
                let status = res.status();
                let detail = res.text().await.unwrap_or_default();
                error!(to = %message.to, %status, "SendGrid rejected email: {detail}");
                false
            }
            Err(e) => {
                error!(to = %message.to, "Failed to send email: {e}");
                false
            }
        }
    }
}
