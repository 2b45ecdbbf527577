use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A portfolio piece: an image, an embedded video, or a downloadable document.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(indexed)]
    pub category: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// One of: image, video, document.
    #[sea_orm(column_name = "type")]
    pub work_type: String,

    pub image_url: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub document_url: Option<String>,

    #[sea_orm(default_value = false)]
    pub is_favorite: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
