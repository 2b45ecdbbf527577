use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::testimonial;
use crate::error::AppError;
use crate::models::shared::{optional_text, required_text};

/// Request body for creating or replacing a testimonial.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct TestimonialRequest {
    #[schema(example = "Ada Obi")]
    pub name: String,
    #[schema(example = "Gallery curator")]
    #[serde(default)]
    pub role: Option<String>,
    #[schema(example = "Divine's work stopped visitors in their tracks.")]
    pub text: String,
    /// 1-5 stars.
    #[schema(example = 5)]
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub approved: Option<bool>,
}

/// A testimonial after validation and normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialInput {
    pub name: String,
    pub role: Option<String>,
    pub text: String,
    pub rating: Option<i32>,
    pub approved: bool,
}

impl TestimonialRequest {
    pub fn validate(self) -> Result<TestimonialInput, AppError> {
        let name = required_text(
            Some(self.name.as_str()),
            256,
            "Client name",
            "Client name is required.",
        )?;
        let text = required_text(
            Some(self.text.as_str()),
            5_000,
            "Testimonial text",
            "Testimonial text is required.",
        )?;
        if let Some(rating) = self.rating
            && !(1..=5).contains(&rating)
        {
            return Err(AppError::Validation("Rating must be between 1 and 5.".into()));
        }
        let role = optional_text(self.role.as_deref(), 256, "Role")?;

        Ok(TestimonialInput {
            name,
            role,
            text,
            rating: self.rating,
            approved: self.approved.unwrap_or(false),
        })
    }
}

/// Body of the approval toggle: the flag value the client last saw.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ToggleApprovalRequest {
    #[schema(example = false)]
    pub current: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TestimonialResponse {
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub text: String,
    pub rating: Option<i32>,
    pub approved: bool,
    /// Initials for the avatar badge.
    #[schema(example = "AO")]
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<testimonial::Model> for TestimonialResponse {
    fn from(model: testimonial::Model) -> Self {
        Self {
            id: model.id.to_string(),
            avatar: initials(&model.name),
            name: model.name,
            role: model.role,
            text: model.text,
            rating: model.rating,
            approved: model.approved,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TestimonialListResponse {
    pub testimonials: Vec<TestimonialResponse>,
    pub total: u64,
}

/// Up to two uppercase initials from a display name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
