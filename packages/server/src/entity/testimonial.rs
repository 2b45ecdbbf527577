use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonial")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub role: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    /// 1-5 stars.
    pub rating: Option<i32>,

    /// Only approved testimonials are shown publicly.
    #[sea_orm(default_value = false)]
    pub approved: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
