use chrono::Utc;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::entity::{message, profile, testimonial, work};
use crate::repo;
use crate::utils::hash::hash_password;

/// Create the admin profile from `auth.admin_email` / `auth.admin_password`
/// when both are set and no profile with that email exists yet.
///
/// An existing profile is left untouched, including its password.
pub async fn ensure_admin_profile(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (auth.admin_email.as_deref(), auth.admin_password.as_deref())
    else {
        return Ok(());
    };
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        warn!("Admin email or password is empty, skipping admin seeding");
        return Ok(());
    }

    let password = hash_password(password)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?;
    let now = Utc::now();
    let model = profile::ActiveModel {
        id: Set(Uuid::now_v7()),
        email: Set(email.clone()),
        password: Set(password),
        role: Set(profile::ADMIN_ROLE.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if repo::profile::insert_if_absent(db, model).await? {
        info!(email = %email, "Seeded admin profile");
    }
    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't create composite indexes, so the list
/// orderings used by the admin panel get theirs here.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Works page and home favourites: WHERE is_favorite ORDER BY created_at
    create_index(
        db,
        "idx_work_favorite_created",
        Index::create()
            .table(work::Entity)
            .col(work::Column::IsFavorite)
            .col(work::Column::CreatedAt)
            .to_owned(),
    )
    .await;

    create_index(
        db,
        "idx_testimonial_approved_created",
        Index::create()
            .table(testimonial::Entity)
            .col(testimonial::Column::Approved)
            .col(testimonial::Column::CreatedAt)
            .to_owned(),
    )
    .await;

    create_index(
        db,
        "idx_message_read_created",
        Index::create()
            .table(message::Entity)
            .col(message::Column::Read)
            .col(message::Column::CreatedAt)
            .to_owned(),
    )
    .await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, mut stmt: IndexCreateStatement) {
    stmt.if_not_exists().name(name);
    let stmt = db.get_database_backend().build(&stmt);

    match db.execute_raw(stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
