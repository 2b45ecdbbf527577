use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::message;
use crate::error::AppError;

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<message::Model, AppError> {
    message::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".into()))
}

/// Inbox, newest first.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    unread_only: bool,
) -> Result<Vec<message::Model>, AppError> {
    let mut select = message::Entity::find();
    if unread_only {
        select = select.filter(message::Column::Read.eq(false));
    }
    Ok(select
        .order_by_desc(message::Column::CreatedAt)
        .order_by_desc(message::Column::Id)
        .all(db)
        .await?)
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    model: message::ActiveModel,
) -> Result<message::Model, AppError> {
    Ok(model.insert(db).await?)
}

pub async fn set_read<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    read: bool,
) -> Result<message::Model, AppError> {
    let mut active: message::ActiveModel = find(db, id).await?.into();
    active.read = Set(read);
    Ok(active.update(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, AppError> {
    let res = message::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn count<C: ConnectionTrait>(db: &C, unread_only: bool) -> Result<u64, AppError> {
    let mut select = message::Entity::find();
    if unread_only {
        select = select.filter(message::Column::Read.eq(false));
    }
    Ok(select.count(db).await?)
}
