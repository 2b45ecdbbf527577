use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::entity::testimonial;
use crate::error::AppError;

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<testimonial::Model, AppError> {
    testimonial::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".into()))
}

/// All testimonials, or only approved ones, newest first.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    approved_only: bool,
) -> Result<Vec<testimonial::Model>, AppError> {
    let mut select = testimonial::Entity::find();
    if approved_only {
        select = select.filter(testimonial::Column::Approved.eq(true));
    }
    Ok(select
        .order_by_desc(testimonial::Column::CreatedAt)
        .order_by_desc(testimonial::Column::Id)
        .all(db)
        .await?)
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    model: testimonial::ActiveModel,
) -> Result<testimonial::Model, AppError> {
    Ok(model.insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    model: testimonial::ActiveModel,
) -> Result<testimonial::Model, AppError> {
    Ok(model.update(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, AppError> {
    let res = testimonial::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Flip `approved` from `current` to `!current` in one conditional UPDATE.
///
/// When the stored flag no longer equals `current`, nothing is written and
/// the caller gets `Conflict`.
pub async fn toggle_approval<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    current: bool,
) -> Result<bool, AppError> {
    let res = testimonial::Entity::update_many()
        .col_expr(testimonial::Column::Approved, Expr::value(!current))
        .col_expr(testimonial::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(testimonial::Column::Id.eq(id))
        .filter(testimonial::Column::Approved.eq(current))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        find(db, id).await?;
        return Err(AppError::Conflict(
            "Testimonial approval was changed by someone else; refresh and try again".into(),
        ));
    }
    Ok(!current)
}

pub async fn count<C: ConnectionTrait>(db: &C, pending_only: bool) -> Result<u64, AppError> {
    let mut select = testimonial::Entity::find();
    if pending_only {
        select = select.filter(testimonial::Column::Approved.eq(false));
    }
    Ok(select.count(db).await?)
}
