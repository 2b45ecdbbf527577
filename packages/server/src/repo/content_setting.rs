use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::content_setting;
use crate::error::AppError;

/// New value of an override row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingValue {
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
}

pub async fn find_by_key<C: ConnectionTrait>(
    db: &C,
    key: &str,
) -> Result<Option<content_setting::Model>, AppError> {
    Ok(content_setting::Entity::find()
        .filter(content_setting::Column::Key.eq(key))
        .one(db)
        .await?)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<content_setting::Model>, AppError> {
    Ok(content_setting::Entity::find()
        .order_by_asc(content_setting::Column::Key)
        .all(db)
        .await?)
}

/// Stored overrides by key.
pub async fn map<C: ConnectionTrait>(
    db: &C,
) -> Result<HashMap<String, content_setting::Model>, AppError> {
    Ok(list(db)
        .await?
        .into_iter()
        .map(|row| (row.key.clone(), row))
        .collect())
}

/// Insert or overwrite the row for `key` in a single statement.
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    key: &str,
    value: SettingValue,
) -> Result<content_setting::Model, AppError> {
    let now = Utc::now();
    let model = content_setting::ActiveModel {
        id: Set(Uuid::now_v7()),
        key: Set(key.to_string()),
        value_text: Set(value.text),
        value_image_url: Set(value.image_url),
        value_image_width: Set(value.image_width),
        value_image_height: Set(value.image_height),
        created_at: Set(now),
        updated_at: Set(now),
    };

    content_setting::Entity::insert(model)
        .on_conflict(
            OnConflict::column(content_setting::Column::Key)
                .update_columns([
                    content_setting::Column::ValueText,
                    content_setting::Column::ValueImageUrl,
                    content_setting::Column::ValueImageWidth,
                    content_setting::Column::ValueImageHeight,
                    content_setting::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    find_by_key(db, key)
        .await?
        .ok_or_else(|| AppError::Internal("content_setting missing after upsert".into()))
}

pub async fn delete<C: ConnectionTrait>(db: &C, key: &str) -> Result<bool, AppError> {
    let res = content_setting::Entity::delete_many()
        .filter(content_setting::Column::Key.eq(key))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
