//! Contact form handlers

use axum::{
    extract::State,
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::PageMeta;
use crate::AppState;
use vitrine_common::{
    db::{NewContactMessage, Repository},
    errors::{AppError, Result},
    metrics::{record_contact_mail, record_contact_message},
};

/// Budget brackets offered by the form. A submitted budget must be one
/// of these values.
pub const BUDGET_CHOICES: &[&str] = &[
    "< 500 000 FCFA",
    "500 000 - 1 000 000 FCFA",
    "1 000 000 - 2 000 000 FCFA",
    "2 000 000 - 5 000 000 FCFA",
    "> 5 000 000 FCFA",
];

#[derive(Serialize)]
pub struct ContactPageResponse {
    pub meta: PageMeta,
    pub budget_choices: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    pub message: String,
}

/// Cleaned form values, normalized before validation
#[derive(Debug, Validate)]
struct CleanContactForm {
    #[validate(length(min = 2, max = 100))]
    name: String,

    /// Lowercased and trimmed
    #[validate(email)]
    email: String,

    #[validate(length(max = 20))]
    phone: Option<String>,

    #[validate(length(max = 100))]
    company: Option<String>,

    budget: Option<String>,

    #[validate(length(min = 1))]
    message: String,
}

fn clean(form: ContactFormData) -> CleanContactForm {
    let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    CleanContactForm {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        phone: non_empty(form.phone),
        company: non_empty(form.company),
        budget: non_empty(form.budget),
        message: form.message.trim().to_string(),
    }
}

fn validate(form: &CleanContactForm) -> Result<()> {
    form.validate().map_err(|e| {
        let field = e.field_errors().keys().next().map(|k| k.to_string());
        AppError::Validation {
            message: e.to_string(),
            field,
        }
    })?;

    if let Some(ref budget) = form.budget {
        if !BUDGET_CHOICES.contains(&budget.as_str()) {
            return Err(AppError::Validation {
                message: format!("Budget inconnu: {}", budget),
                field: Some("budget".to_string()),
            });
        }
    }

    Ok(())
}

/// Contact page payload
pub async fn contact_page(State(state): State<AppState>) -> Json<ContactPageResponse> {
    let meta = PageMeta::new(
        &format!("Contact - {} | Agence Web", state.config.site.name),
        "Contactez-nous pour vos projets web. Devis gratuit pour création \
         de site web, SEO et refonte.",
    );

    Json(ContactPageResponse {
        meta,
        budget_choices: BUDGET_CHOICES.to_vec(),
    })
}

/// Accept a contact form submission.
///
/// Valid submissions are stored, a notification mail goes out on a
/// background task, and the visitor is redirected back to the contact
/// page with a success flag. Validation failures return field errors.
pub async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactFormData>,
) -> Result<Redirect> {
    let form = clean(form);
    validate(&form)?;

    let repo = Repository::new(state.db.clone());
    let message = repo
        .create_contact_message(NewContactMessage {
            name: form.name,
            email: form.email,
            phone: form.phone,
            company: form.company,
            budget: form.budget,
            message: form.message,
        })
        .await?;

    record_contact_message();
    tracing::info!(id = message.id, email = %message.email, "Contact message received");

    // Notification mail must never fail the submission
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        match mailer.notify_contact(&message).await {
            Ok(_) => record_contact_mail(true),
            Err(e) => {
                record_contact_mail(false);
                tracing::warn!(error = %e, "Contact notification mail failed");
            }
        }
    });

    Ok(Redirect::to("/contact/?sent=1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, budget: Option<&str>) -> ContactFormData {
        ContactFormData {
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: Some("+226 70 00 00 00".to_string()),
            company: Some("Test Company".to_string()),
            budget: budget.map(String::from),
            message: "Test message".to_string(),
        }
    }

    #[test]
    fn test_email_lowercased_and_trimmed() {
        let cleaned = clean(form("  Test@Example.COM ", None));
        assert_eq!(cleaned.email, "test@example.com");
        assert!(validate(&cleaned).is_ok());
    }

    #[test]
    fn test_empty_optionals_become_none() {
        let mut data = form("test@example.com", None);
        data.phone = Some("   ".to_string());
        data.company = Some(String::new());
        let cleaned = clean(data);
        assert!(cleaned.phone.is_none());
        assert!(cleaned.company.is_none());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let cleaned = clean(form("pas-un-email", None));
        let err = validate(&cleaned).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_known_budget_accepted() {
        let cleaned = clean(form("test@example.com", Some("500 000 - 1 000 000 FCFA")));
        assert!(validate(&cleaned).is_ok());
    }

    #[test]
    fn test_unknown_budget_rejected() {
        let cleaned = clean(form("test@example.com", Some("1 FCFA")));
        let err = validate(&cleaned).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("budget")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_short_name_rejected() {
        let mut data = form("test@example.com", None);
        data.name = "A".to_string();
        let cleaned = clean(data);
        assert!(validate(&cleaned).is_err());
    }
}
