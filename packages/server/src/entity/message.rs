use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A contact form submission.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,

    #[sea_orm(default_value = false)]
    pub read: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
