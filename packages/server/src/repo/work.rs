use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity::work;
use crate::error::AppError;
use crate::models::work::{WorkListQuery, is_renderable};

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<work::Model, AppError> {
    work::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Work not found".into()))
}

/// Works matching `query`, newest first.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    query: &WorkListQuery,
) -> Result<Vec<work::Model>, AppError> {
    let mut select = work::Entity::find();
    if let Some(favorite) = query.favorite {
        select = select.filter(work::Column::IsFavorite.eq(favorite));
    }
    if let Some(category) = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        select = select.filter(work::Column::Category.eq(category));
    }
    if let Some(work_type) = query.work_type {
        select = select.filter(work::Column::WorkType.eq(work_type.as_str()));
    }

    Ok(select
        .order_by_desc(work::Column::CreatedAt)
        .order_by_desc(work::Column::Id)
        .all(db)
        .await?)
}

/// Favourites that can be shown as gallery tiles, newest first.
pub async fn renderable_favorites<C: ConnectionTrait>(
    db: &C,
    limit: usize,
) -> Result<Vec<work::Model>, AppError> {
    let query = WorkListQuery {
        favorite: Some(true),
        ..Default::default()
    };
    Ok(list(db, &query)
        .await?
        .into_iter()
        .filter(is_renderable)
        .take(limit)
        .collect())
}

/// Distinct categories in ascending order.
pub async fn categories<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, AppError> {
    Ok(work::Entity::find()
        .select_only()
        .column(work::Column::Category)
        .distinct()
        .order_by_asc(work::Column::Category)
        .into_tuple::<String>()
        .all(db)
        .await?)
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    model: work::ActiveModel,
) -> Result<work::Model, AppError> {
    Ok(model.insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    model: work::ActiveModel,
) -> Result<work::Model, AppError> {
    Ok(model.update(db).await?)
}

/// Returns `false` when no row had that id.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, AppError> {
    let res = work::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn count<C: ConnectionTrait>(db: &C, favorites_only: bool) -> Result<u64, AppError> {
    let mut select = work::Entity::find();
    if favorites_only {
        select = select.filter(work::Column::IsFavorite.eq(true));
    }
    Ok(select.count(db).await?)
}
