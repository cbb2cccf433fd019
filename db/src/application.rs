use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::application::ApplicationCreate,
    models::application::{Application, ApplicationWithApplicant, ApplicationWithJob},
};

const JOB_VIEW_COLUMNS: &str = "a.id, a.job_id, a.resume, a.cover_letter, a.status, a.applied_at, \
     j.title AS job_title, j.location AS job_location, j.salary AS job_salary, \
     j.job_type, c.id AS company_id, c.name AS company_name, c.logo AS company_logo";

pub async fn exists_for<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
    applicant_id: i64,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM job_applications WHERE job_id = $1 AND applicant_id = $2)",
    )
    .bind(job_id)
    .bind(applicant_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ApplicationCreate,
) -> Res<Application> {
    sqlx::query_as::<_, Application>(
        r#"
        INSERT INTO job_applications (job_id, applicant_id, resume, cover_letter)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(data.job_id)
    .bind(data.applicant_id)
    .bind(data.resume)
    .bind(data.cover_letter)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_for_applicant<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    applicant_id: i64,
    status: Option<&str>,
    offset: i64,
    limit: i64,
) -> Res<Vec<ApplicationWithJob>> {
    let sql = format!(
        r#"
        SELECT {JOB_VIEW_COLUMNS}
        FROM job_applications a
        JOIN jobs j ON j.id = a.job_id
        JOIN companies c ON c.id = j.company_id
        WHERE a.applicant_id = $1 AND ($2::text IS NULL OR a.status = $2)
        ORDER BY a.applied_at DESC
        OFFSET $3 LIMIT $4
        "#
    );
    sqlx::query_as::<_, ApplicationWithJob>(&sql)
        .bind(applicant_id)
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn count_for_applicant<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    applicant_id: i64,
    status: Option<&str>,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM job_applications \
         WHERE applicant_id = $1 AND ($2::text IS NULL OR status = $2)",
    )
    .bind(applicant_id)
    .bind(status)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn find_for_applicant<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    application_id: i64,
    applicant_id: i64,
) -> Res<Option<ApplicationWithJob>> {
    let sql = format!(
        r#"
        SELECT {JOB_VIEW_COLUMNS}
        FROM job_applications a
        JOIN jobs j ON j.id = a.job_id
        JOIN companies c ON c.id = j.company_id
        WHERE a.id = $1 AND a.applicant_id = $2
        "#
    );
    sqlx::query_as::<_, ApplicationWithJob>(&sql)
        .bind(application_id)
        .bind(applicant_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Bare application row owned by the applicant, for the withdraw path.
pub async fn find_row_for_applicant<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    application_id: i64,
    applicant_id: i64,
) -> Res<Option<Application>> {
    sqlx::query_as::<_, Application>(
        "SELECT * FROM job_applications WHERE id = $1 AND applicant_id = $2",
    )
    .bind(application_id)
    .bind(applicant_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Application row only if it targets one of the company's jobs.
pub async fn find_for_company<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    application_id: i64,
    company_id: i64,
) -> Res<Option<Application>> {
    sqlx::query_as::<_, Application>(
        r#"
        SELECT a.*
        FROM job_applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE a.id = $1 AND j.company_id = $2
        "#,
    )
    .bind(application_id)
    .bind(company_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn set_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    application_id: i64,
    status: &str,
) -> Res<Application> {
    sqlx::query_as::<_, Application>(
        "UPDATE job_applications SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(application_id)
    .bind(status)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_for_job<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
    status: Option<&str>,
    offset: i64,
    limit: i64,
) -> Res<Vec<ApplicationWithApplicant>> {
    sqlx::query_as::<_, ApplicationWithApplicant>(
        r#"
        SELECT a.id, a.job_id, a.resume, a.cover_letter, a.status, a.applied_at,
               u.id AS applicant_id, u.name AS applicant_name, u.email AS applicant_email,
               u.skills AS applicant_skills, u.bio AS applicant_bio,
               u.location AS applicant_location
        FROM job_applications a
        JOIN users u ON u.id = a.applicant_id
        WHERE a.job_id = $1 AND ($2::text IS NULL OR a.status = $2)
        ORDER BY a.applied_at DESC
        OFFSET $3 LIMIT $4
        "#,
    )
    .bind(job_id)
    .bind(status)
    .bind(offset)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_for_job<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    job_id: i64,
    status: Option<&str>,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM job_applications \
         WHERE job_id = $1 AND ($2::text IS NULL OR status = $2)",
    )
    .bind(job_id)
    .bind(status)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
