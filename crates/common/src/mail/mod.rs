//! Outbound mail via an HTTP transactional-mail API
//!
//! Used for contact-form notifications. Delivery is best-effort: the
//! contact flow treats a failed send as a logged warning, never as a
//! request failure. When no API endpoint is configured the mailer is
//! disabled and sends become no-ops.

use crate::config::MailConfig;
use crate::db::models::ContactMessage;
use crate::errors::{AppError, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Transactional mail client
pub struct Mailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl Mailer {
    /// Create a new mailer from configuration
    pub fn new(config: MailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to build mail HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// Whether outbound mail is configured
    pub fn is_enabled(&self) -> bool {
        self.config.api_url.is_some() && self.config.api_key.is_some()
    }

    /// Send the staff notification for a new contact message
    pub async fn notify_contact(&self, message: &ContactMessage) -> Result<()> {
        let subject = format!("Nouveau message de contact de {}", message.name);
        let body = contact_notification_body(message);
        self.send(&subject, &body).await
    }

    async fn send(&self, subject: &str, text: &str) -> Result<()> {
        let (api_url, api_key) = match (&self.config.api_url, &self.config.api_key) {
            (Some(url), Some(key)) => (url, key),
            _ => {
                debug!(subject = %subject, "Mail disabled, skipping send");
                return Ok(());
            }
        };

        let request = SendRequest {
            from: &self.config.from_address,
            to: &self.config.notify_address,
            subject,
            text,
        };

        let response = self
            .client
            .post(api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::MailError {
                message: format!("Mail request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::MailError {
                message: format!("Mail API returned {}: {}", status, detail),
            });
        }

        info!(subject = %subject, "Notification mail sent");
        Ok(())
    }
}

/// Plain-text body of the contact notification
fn contact_notification_body(message: &ContactMessage) -> String {
    format!(
        "Nom: {}\n\
         Email: {}\n\
         Téléphone: {}\n\
         Entreprise: {}\n\
         Budget: {}\n\n\
         Message:\n{}\n",
        message.name,
        message.email,
        message.phone.as_deref().unwrap_or("-"),
        message.company.as_deref().unwrap_or("-"),
        message.budget.as_deref().unwrap_or("-"),
        message.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> ContactMessage {
        ContactMessage {
            id: 1,
            name: "Awa Diallo".to_string(),
            email: "awa@example.com".to_string(),
            phone: Some("+221 77 000 00 00".to_string()),
            company: None,
            budget: Some("500000-1000000".to_string()),
            message: "Bonjour, je souhaite un devis.".to_string(),
            created_at: chrono::Utc::now().into(),
            read: false,
        }
    }

    #[test]
    fn test_mailer_disabled_without_api_url() {
        let mailer = Mailer::new(MailConfig::default()).unwrap();
        assert!(!mailer.is_enabled());
    }

    #[test]
    fn test_disabled_send_is_noop() {
        let mailer = Mailer::new(MailConfig::default()).unwrap();
        let result = tokio_test::block_on(mailer.notify_contact(&sample_message()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_notification_body_contents() {
        let body = contact_notification_body(&sample_message());
        assert!(body.contains("Awa Diallo"));
        assert!(body.contains("awa@example.com"));
        assert!(body.contains("Entreprise: -"));
        assert!(body.contains("je souhaite un devis"));
    }
}
