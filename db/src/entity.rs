use common::{
    error::{AppError, Res},
    misc::EntityKind,
};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::entity::{CompanyCreate, UserCreate},
    models::entity::{Company, Entity, User},
};

pub async fn exists_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    email: &str,
) -> Res<bool> {
    let sql = match kind {
        EntityKind::User => "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        EntityKind::Company => "SELECT EXISTS(SELECT 1 FROM companies WHERE email = $1)",
    };
    sqlx::query_scalar::<_, bool>(sql)
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    email: &str,
) -> Res<Option<Entity>> {
    match kind {
        EntityKind::User => sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Entity::User))
            .map_err(AppError::from),
        EntityKind::Company => {
            sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE email = $1")
                .bind(email)
                .fetch_optional(executor)
                .await
                .map(|row| row.map(Entity::Company))
                .map_err(AppError::from)
        }
    }
}

pub async fn find_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    id: i64,
) -> Res<Option<Entity>> {
    match kind {
        EntityKind::User => sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Entity::User))
            .map_err(AppError::from),
        EntityKind::Company => {
            sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await
                .map(|row| row.map(Entity::Company))
                .map_err(AppError::from)
        }
    }
}

/// Ban flag lookup used by the guards. A missing row reads as not banned; the
/// request then fails later on the actual resource lookup.
pub async fn is_banned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    id: i64,
) -> Res<bool> {
    let sql = match kind {
        EntityKind::User => "SELECT is_banned FROM users WHERE id = $1",
        EntityKind::Company => "SELECT is_banned FROM companies WHERE id = $1",
    };
    sqlx::query_scalar::<_, bool>(sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map(|row| row.unwrap_or(false))
        .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserCreate,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, name, skills, bio, location)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.name)
    .bind(data.skills)
    .bind(data.bio)
    .bind(data.location)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_company<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: CompanyCreate,
) -> Res<Company> {
    sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (email, password_hash, name, website, about, industry, logo)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.name)
    .bind(data.website)
    .bind(data.about)
    .bind(data.industry)
    .bind(data.logo)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
