use actix_web::{Responder, delete, get, post, put, web};
use common::error::{AppError, Res};
use common::http::{PageQuery, Pagination, Success};
use db::dtos::job::{JobCreate, JobFilter, JobUpdate};
use db::models::enums::JobType;
use extractor::identity::CompanyIdentity;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::job::{JobCreateRequest, JobFilterQuery, JobUpdateRequest};

fn validate_job_fields(title: &str, description: &str, location: &str) -> Res<()> {
    if title.trim().is_empty() || description.trim().is_empty() || location.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Title, description and location are required".to_string(),
        ));
    }
    Ok(())
}

/// Public job listing with optional type, location and company filters.
#[get("")]
pub async fn get_jobs(
    filter: web::Query<JobFilterQuery>,
    page: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let job_type = match filter.job_type.as_deref() {
        Some(raw) => Some(JobType::from_str(raw)?.as_str().to_string()),
        None => None,
    };
    let filter = JobFilter {
        job_type,
        location: filter.location.clone(),
        company: filter.company.clone(),
    };

    let (offset, limit) = page.bounds();
    let jobs = db::job::list_public(pg_pool, &filter, offset, limit).await?;
    let total = db::job::count_public(pg_pool, &filter).await?;
    Success::ok(json!({
        "jobs": jobs,
        "pagination": Pagination::new(&page, total),
    }))
}

#[get("/{id}")]
pub async fn get_job(path: web::Path<i64>, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let job = db::job::find_public(pg_pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    Success::ok(job)
}

/// Creates a posting. The quota consume and the insert share one transaction,
/// so a failed insert releases the consumed unit.
#[post("")]
pub async fn post_job(
    identity: CompanyIdentity,
    req: web::Json<JobCreateRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    validate_job_fields(&req.title, &req.description, &req.location)?;
    let job_type = JobType::from_str(&req.job_type)?;
    let usage = match job_type {
        JobType::FullTime => quota::UsageKind::Jobs,
        JobType::Internship => quota::UsageKind::Internships,
    };

    let mut tx = pg_pool.begin().await?;
    quota::consume(&mut tx, identity.company_id, usage).await?;
    let job = db::job::insert(
        &mut *tx,
        JobCreate {
            company_id: identity.company_id,
            title: req.title,
            description: req.description,
            location: req.location,
            salary: req.salary,
            job_type: job_type.as_str().to_string(),
        },
    )
    .await?;
    tx.commit().await?;

    Success::created(job)
}

/// Edits an owned posting. The job type is fixed at creation; allowing it to
/// change would let a posting hop between quota counters.
#[put("/{id}")]
pub async fn put_job(
    identity: CompanyIdentity,
    path: web::Path<i64>,
    req: web::Json<JobUpdateRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let job_id = path.into_inner();
    let req = req.into_inner();
    validate_job_fields(&req.title, &req.description, &req.location)?;

    let existing = db::job::find_owned(pg_pool, job_id, identity.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let job = db::job::update(
        pg_pool,
        job_id,
        JobUpdate {
            title: req.title,
            description: req.description,
            location: req.location,
            salary: req.salary,
            job_type: existing.job_type,
        },
    )
    .await?;
    Success::ok(job)
}

/// Soft delete. The row stays so existing applications keep their context,
/// but the posting drops out of every public listing.
#[delete("/{id}")]
pub async fn delete_job(
    identity: CompanyIdentity,
    path: web::Path<i64>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let job_id = path.into_inner();
    db::job::find_owned(pg_pool, job_id, identity.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    db::job::soft_delete(pg_pool, job_id).await?;
    Success::ok(json!({ "message": "Job removed" }))
}

/// Company dashboard: own postings with application counts.
#[get("/company/my-jobs")]
pub async fn get_my_jobs(
    identity: CompanyIdentity,
    page: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (offset, limit) = page.bounds();
    let jobs = db::job::list_for_company(pg_pool, identity.company_id, offset, limit).await?;
    let total = db::job::count_for_company(pg_pool, identity.company_id).await?;
    Success::ok(json!({
        "jobs": jobs,
        "pagination": Pagination::new(&page, total),
    }))
}
