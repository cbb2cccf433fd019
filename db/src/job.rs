use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::job::{JobCreate, JobFilter, JobUpdate},
    models::job::{Job, JobWithApplicationCount, JobWithCompany},
};

const PUBLIC_COLUMNS: &str = "j.id, j.company_id, j.title, j.description, j.location, j.salary, \
     j.job_type, j.created_at, c.name AS company_name, c.logo AS company_logo, \
     c.industry AS company_industry, c.website AS company_website, c.about AS company_about";

pub async fn list_public<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    filter: &JobFilter,
    offset: i64,
    limit: i64,
) -> Res<Vec<JobWithCompany>> {
    let sql = format!(
        r#"
        SELECT {PUBLIC_COLUMNS}
        FROM jobs j
        JOIN companies c ON c.id = j.company_id
        WHERE j.is_removed = FALSE
          AND ($1::text IS NULL OR j.job_type = $1)
          AND ($2::text IS NULL OR j.location ILIKE '%' || $2 || '%')
          AND ($3::text IS NULL OR c.name ILIKE '%' || $3 || '%')
        ORDER BY j.created_at DESC
        OFFSET $4 LIMIT $5
        "#
    );
    sqlx::query_as::<_, JobWithCompany>(&sql)
        .bind(filter.job_type.as_deref())
        .bind(filter.location.as_deref())
        .bind(filter.company.as_deref())
        .bind(offset)
        .bind(limit)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn count_public<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    filter: &JobFilter,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM jobs j
        JOIN companies c ON c.id = j.company_id
        WHERE j.is_removed = FALSE
          AND ($1::text IS NULL OR j.job_type = $1)
          AND ($2::text IS NULL OR j.location ILIKE '%' || $2 || '%')
          AND ($3::text IS NULL OR c.name ILIKE '%' || $3 || '%')
        "#,
    )
    .bind(filter.job_type.as_deref())
    .bind(filter.location.as_deref())
    .bind(filter.company.as_deref())
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn find_public<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
) -> Res<Option<JobWithCompany>> {
    let sql = format!(
        r#"
        SELECT {PUBLIC_COLUMNS}
        FROM jobs j
        JOIN companies c ON c.id = j.company_id
        WHERE j.id = $1 AND j.is_removed = FALSE
        "#
    );
    sqlx::query_as::<_, JobWithCompany>(&sql)
        .bind(job_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// A live (not removed) job row, without the company join. Used for
/// existence checks before applying or bookmarking.
pub async fn find_live<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
) -> Res<Option<Job>> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1 AND is_removed = FALSE")
        .bind(job_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// A live job row only if it belongs to the given company.
pub async fn find_owned<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
    company_id: i64,
) -> Res<Option<Job>> {
    sqlx::query_as::<_, Job>(
        "SELECT * FROM jobs WHERE id = $1 AND company_id = $2 AND is_removed = FALSE",
    )
    .bind(job_id)
    .bind(company_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: JobCreate,
) -> Res<Job> {
    sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (company_id, title, description, location, salary, job_type)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.company_id)
    .bind(data.title)
    .bind(data.description)
    .bind(data.location)
    .bind(data.salary)
    .bind(data.job_type)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
    data: JobUpdate,
) -> Res<Job> {
    sqlx::query_as::<_, Job>(
        r#"
        UPDATE jobs
        SET title = $2, description = $3, location = $4, salary = $5, job_type = $6,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(data.title)
    .bind(data.description)
    .bind(data.location)
    .bind(data.salary)
    .bind(data.job_type)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn soft_delete<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
) -> Res<()> {
    sqlx::query("UPDATE jobs SET is_removed = TRUE, updated_at = now() WHERE id = $1")
        .bind(job_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_for_company<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    company_id: i64,
    offset: i64,
    limit: i64,
) -> Res<Vec<JobWithApplicationCount>> {
    sqlx::query_as::<_, JobWithApplicationCount>(
        r#"
        SELECT j.id, j.title, j.description, j.location, j.salary, j.job_type, j.created_at,
               COUNT(a.id) AS application_count
        FROM jobs j
        LEFT JOIN job_applications a ON a.job_id = j.id
        WHERE j.company_id = $1 AND j.is_removed = FALSE
        GROUP BY j.id
        ORDER BY j.created_at DESC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(company_id)
    .bind(offset)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_for_company<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    company_id: i64,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM jobs WHERE company_id = $1 AND is_removed = FALSE",
    )
    .bind(company_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
