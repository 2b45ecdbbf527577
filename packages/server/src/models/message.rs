use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::entity::message;
use crate::error::AppError;
use crate::models::shared::required_text;

/// Contact form submission.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Ada Obi")]
    #[serde(default)]
    pub name: String,
    #[schema(example = "ada@example.com")]
    #[serde(default)]
    pub email: String,
    #[schema(example = "I'd love to commission a portrait.")]
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    /// Checks name, then email, then message.
    pub fn validate(self) -> Result<ContactInput, AppError> {
        let name = required_text(Some(self.name.as_str()), 256, "Name", "Name is required.")?;

        let email = self.email.trim();
        if email.chars().count() > 320 || !email.validate_email() {
            return Err(AppError::Validation("Invalid email address.".into()));
        }

        let message = required_text(
            Some(self.message.as_str()),
            10_000,
            "Message",
            "Message cannot be empty.",
        )?;

        Ok(ContactInput {
            name,
            email: email.to_string(),
            message,
        })
    }
}

/// Query parameters for the inbox.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessageListQuery {
    /// Only unread messages when `true`.
    pub unread: Option<bool>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct MarkReadRequest {
    #[schema(example = true)]
    pub read: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<message::Model> for MessageResponse {
    fn from(model: message::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            email: model.email,
            message: model.message,
            read: model.read,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
    pub total: u64,
    pub unread: u64,
}
