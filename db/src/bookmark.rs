use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::bookmark::{Bookmark, BookmarkWithJob};

pub async fn find<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: i64,
    job_id: i64,
) -> Res<Option<Bookmark>> {
    sqlx::query_as::<_, Bookmark>("SELECT * FROM bookmarks WHERE user_id = $1 AND job_id = $2")
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: i64,
    job_id: i64,
) -> Res<Bookmark> {
    sqlx::query_as::<_, Bookmark>(
        "INSERT INTO bookmarks (user_id, job_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(user_id)
    .bind(job_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    bookmark_id: i64,
) -> Res<()> {
    sqlx::query("DELETE FROM bookmarks WHERE id = $1")
        .bind(bookmark_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: i64,
    offset: i64,
    limit: i64,
) -> Res<Vec<BookmarkWithJob>> {
    sqlx::query_as::<_, BookmarkWithJob>(
        r#"
        SELECT b.id, b.job_id, b.created_at,
               j.title AS job_title, j.description AS job_description,
               j.location AS job_location, j.salary AS job_salary, j.job_type,
               c.id AS company_id, c.name AS company_name, c.logo AS company_logo,
               c.industry AS company_industry
        FROM bookmarks b
        JOIN jobs j ON j.id = b.job_id
        JOIN companies c ON c.id = j.company_id
        WHERE b.user_id = $1
        ORDER BY b.created_at DESC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(offset)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: i64,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookmarks WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}
