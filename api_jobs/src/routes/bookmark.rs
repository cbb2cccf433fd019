use actix_web::{Responder, delete, get, post, web};
use common::error::{AppError, Res};
use common::http::{PageQuery, Pagination, Success};
use extractor::identity::UserIdentity;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::job::BookmarkRequest;

#[post("")]
pub async fn post_bookmark(
    identity: UserIdentity,
    req: web::Json<BookmarkRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    db::job::find_live(pg_pool, req.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    if db::bookmark::find(pg_pool, identity.user_id, req.job_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Job already bookmarked".to_string()));
    }
    let bookmark = db::bookmark::insert(pg_pool, identity.user_id, req.job_id).await?;
    Success::created(bookmark)
}

#[get("")]
pub async fn get_bookmarks(
    identity: UserIdentity,
    page: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (offset, limit) = page.bounds();
    let bookmarks = db::bookmark::list_for_user(pg_pool, identity.user_id, offset, limit).await?;
    let total = db::bookmark::count_for_user(pg_pool, identity.user_id).await?;
    Success::ok(json!({
        "bookmarks": bookmarks,
        "pagination": Pagination::new(&page, total),
    }))
}

#[delete("/{job_id}")]
pub async fn delete_bookmark(
    identity: UserIdentity,
    path: web::Path<i64>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let bookmark = db::bookmark::find(pg_pool, identity.user_id, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Bookmark not found".to_string()))?;
    db::bookmark::delete(pg_pool, bookmark.id).await?;
    Success::ok(json!({ "message": "Bookmark removed" }))
}

/// Lets the job detail page render its bookmark toggle without fetching the
/// whole bookmark list.
#[get("/check/{job_id}")]
pub async fn get_bookmark_check(
    identity: UserIdentity,
    path: web::Path<i64>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let bookmarked = db::bookmark::find(pg_pool, identity.user_id, path.into_inner())
        .await?
        .is_some();
    Success::ok(json!({ "bookmarked": bookmarked }))
}
