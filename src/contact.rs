use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::RepositoryState;

/// ContactForm
///
/// Input payload of the contact page (POST /api/inquiries).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<InquirySubject>,
    #[serde(default)]
    pub message: String,
}

/// InquirySubject
///
/// The fixed topics a visitor picks from on the contact page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum InquirySubject {
    General,
    Reservation,
    Catering,
    Events,
    Feedback,
    Complaint,
}

/// FieldError
///
/// A single violated rule on one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// ValidationError
///
/// Every violation found on a submitted form. Submission is blocked until the
/// list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ContactForm {
    /// Checks the required fields (`name`, `email`, `subject`, `message`) and the email shape.
    /// Reports all violations at once rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        let mut fail = |field: &str, message: &str| {
            fields.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            })
        };

        if self.name.trim().is_empty() {
            fail("name", "name is required");
        }
        if self.email.trim().is_empty() {
            fail("email", "email is required");
        } else if !looks_like_email(self.email.trim()) {
            fail("email", "email address is not valid");
        }
        if self.subject.is_none() {
            fail("subject", "subject is required");
        }
        if self.message.trim().is_empty() {
            fail("message", "message is required");
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// InquiryStatus
///
/// Triage state an admin moves an inquiry through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Read,
    Replied,
}

/// ContactInquiry
///
/// A recorded contact form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: InquirySubject,
    pub message: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub status: InquiryStatus,
}

impl ContactInquiry {
    /// Validates `form` and turns it into a fresh `New` inquiry.
    fn from_form(form: ContactForm) -> Result<Self, ValidationError> {
        form.validate()?;
        let subject = form.subject.ok_or_else(|| ValidationError {
            fields: vec![FieldError {
                field: "subject".to_string(),
                message: "subject is required".to_string(),
            }],
        })?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.filter(|phone| !phone.trim().is_empty()),
            subject,
            message: form.message,
            created_at: Utc::now(),
            status: InquiryStatus::New,
        })
    }
}

/// StatusUpdate
///
/// Input payload for PATCH /api/admin/inquiries/{id}/status.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct StatusUpdate {
    pub status: InquiryStatus,
}

/// InquiryService
///
/// Validates and records contact submissions. The configured delay stands in
/// for the round trip to a real mail or CRM backend; an in-flight submission
/// cannot be cancelled.
#[derive(Clone)]
pub struct InquiryService {
    repo: RepositoryState,
    submit_delay: Duration,
}

impl InquiryService {
    pub fn new(repo: RepositoryState, submit_delay: Duration) -> Self {
        Self { repo, submit_delay }
    }

    pub async fn submit(&self, form: ContactForm) -> Result<ContactInquiry, ValidationError> {
        form.validate()?;

        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }

        let inquiry = self
            .repo
            .insert_inquiry(ContactInquiry::from_form(form)?)
            .await;
        tracing::info!(inquiry_id = %inquiry.id, "contact inquiry recorded");
        Ok(inquiry)
    }

    pub async fn list(&self) -> Vec<ContactInquiry> {
        self.repo.list_inquiries().await
    }

    pub async fn set_status(&self, id: Uuid, status: InquiryStatus) -> Option<ContactInquiry> {
        self.repo.set_inquiry_status(id, status).await
    }
}
