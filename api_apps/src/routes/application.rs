use actix_web::{Responder, delete, get, patch, post, web};
use common::error::{AppError, Res};
use common::http::{PageQuery, Pagination, Success};
use db::dtos::application::ApplicationCreate;
use db::models::enums::ApplicationStatus;
use extractor::identity::{CompanyIdentity, UserIdentity};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::application::{ApplicationRequest, StatusFilterQuery, StatusUpdateRequest};

/// Applies to a live job. One application per user per job; the quota
/// consume and the insert commit together.
#[post("")]
pub async fn post_application(
    identity: UserIdentity,
    req: web::Json<ApplicationRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    db::job::find_live(pg_pool, req.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    if db::application::exists_for(pg_pool, req.job_id, identity.user_id).await? {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    let mut tx = pg_pool.begin().await?;
    quota::consume(&mut tx, identity.user_id, quota::UsageKind::Applications).await?;
    let application = db::application::insert(
        &mut *tx,
        ApplicationCreate {
            job_id: req.job_id,
            applicant_id: identity.user_id,
            resume: req.resume,
            cover_letter: req.cover_letter,
        },
    )
    .await?;
    tx.commit().await?;

    Success::created(application)
}

/// Applicant's own applications, optionally filtered by status.
#[get("/my-applications")]
pub async fn get_my_applications(
    identity: UserIdentity,
    filter: web::Query<StatusFilterQuery>,
    page: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let status = match filter.status.as_deref() {
        Some(raw) => Some(ApplicationStatus::from_str(raw)?),
        None => None,
    };
    let status = status.map(|s| s.as_str());

    let (offset, limit) = page.bounds();
    let applications =
        db::application::list_for_applicant(pg_pool, identity.user_id, status, offset, limit)
            .await?;
    let total = db::application::count_for_applicant(pg_pool, identity.user_id, status).await?;
    Success::ok(json!({
        "applications": applications,
        "pagination": Pagination::new(&page, total),
    }))
}

#[get("/{id}")]
pub async fn get_application(
    identity: UserIdentity,
    path: web::Path<i64>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let application = db::application::find_for_applicant(pg_pool, path.into_inner(), identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    Success::ok(application)
}

/// Company moves an application through the review pipeline. Only
/// applications against the company's own jobs are reachable.
#[patch("/{id}/status")]
pub async fn patch_application_status(
    identity: CompanyIdentity,
    path: web::Path<i64>,
    req: web::Json<StatusUpdateRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let status = ApplicationStatus::from_str(&req.status)?;
    if status == ApplicationStatus::Withdrawn {
        return Err(AppError::BadRequest(
            "Only the applicant can withdraw an application".to_string(),
        ));
    }

    let application =
        db::application::find_for_company(pg_pool, path.into_inner(), identity.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    let updated = db::application::set_status(pg_pool, application.id, status.as_str()).await?;
    Success::ok(updated)
}

/// Applicant withdraws. Settled applications (accepted or rejected) stay as
/// they are.
#[delete("/{id}")]
pub async fn delete_application(
    identity: UserIdentity,
    path: web::Path<i64>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let application =
        db::application::find_row_for_applicant(pg_pool, path.into_inner(), identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let status = ApplicationStatus::from_str(&application.status)?;
    if status.is_settled() {
        return Err(AppError::Conflict(
            "A settled application cannot be withdrawn".to_string(),
        ));
    }
    let updated = db::application::set_status(
        pg_pool,
        application.id,
        ApplicationStatus::Withdrawn.as_str(),
    )
    .await?;
    Success::ok(updated)
}

/// Company's view of all applications for one of its jobs.
#[get("/job/{job_id}")]
pub async fn get_job_applications(
    identity: CompanyIdentity,
    path: web::Path<i64>,
    filter: web::Query<StatusFilterQuery>,
    page: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let job = db::job::find_owned(pg_pool, path.into_inner(), identity.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let status = match filter.status.as_deref() {
        Some(raw) => Some(ApplicationStatus::from_str(raw)?),
        None => None,
    };
    let status = status.map(|s| s.as_str());

    let (offset, limit) = page.bounds();
    let applications =
        db::application::list_for_job(pg_pool, job.id, status, offset, limit).await?;
    let total = db::application::count_for_job(pg_pool, job.id, status).await?;
    Success::ok(json!({
        "applications": applications,
        "pagination": Pagination::new(&page, total),
    }))
}
