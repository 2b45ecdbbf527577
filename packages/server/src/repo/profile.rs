use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::profile;
use crate::error::AppError;

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<profile::Model>, AppError> {
    Ok(profile::Entity::find_by_id(id).one(db).await?)
}

/// Emails are compared case-insensitively by storing them lower-cased.
pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<profile::Model>, AppError> {
    Ok(profile::Entity::find()
        .filter(profile::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await?)
}

/// Insert unless a profile with the same email exists. Returns whether a row
/// was written.
pub async fn insert_if_absent<C: ConnectionTrait>(
    db: &C,
    model: profile::ActiveModel,
) -> Result<bool, DbErr> {
    let result = profile::Entity::insert(model)
        .on_conflict(
            OnConflict::column(profile::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(rows) => Ok(rows > 0),
        Err(DbErr::RecordNotInserted) => Ok(false),
        Err(e) => Err(e),
    }
}
