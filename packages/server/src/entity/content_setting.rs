use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Text or image override for a piece of marketing copy, keyed by name.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_setting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub key: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub value_text: Option<String>,
    pub value_image_url: Option<String>,
    pub value_image_width: Option<i32>,
    pub value_image_height: Option<i32>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
