use actix_web::{Responder, delete, get, post, web};
use common::error::{AppError, Res};
use common::http::Success;
use extractor::identity::Identity;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::sub::SubscribeRequest;
use crate::services;

/// Public plan catalog, cheapest first.
#[get("/plans")]
pub async fn get_plans(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let plans = db::plan::list(pg_pool).await?;
    Success::ok(plans)
}

#[get("/current")]
pub async fn get_current(identity: Identity, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (subscription, plan) =
        services::sub::current_with_plan(pg_pool, identity.kind, identity.entity_id).await?;
    Success::ok(json!({
        "subscription": subscription,
        "plan": plan,
    }))
}

/// Subscribes the caller to a plan. Paid plans come back PENDING and need a
/// verified payment before quota checks pass.
#[post("")]
pub async fn post_subscribe(
    identity: Identity,
    req: web::Json<SubscribeRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    if req.plan_id <= 0 {
        return Err(AppError::BadRequest("Invalid plan id".to_string()));
    }
    let subscription =
        services::sub::select_plan(pg_pool, identity.kind, identity.entity_id, req.plan_id).await?;
    Success::created(subscription)
}

#[delete("")]
pub async fn delete_subscription(
    identity: Identity,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let subscription = services::sub::cancel(pg_pool, identity.kind, identity.entity_id).await?;
    Success::ok(subscription)
}

/// Current usage against plan limits, per counter for the caller's kind.
#[get("/usage")]
pub async fn get_usage(identity: Identity, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (subscription, plan) =
        services::sub::current_with_plan(pg_pool, identity.kind, identity.entity_id).await?;
    let counters = services::sub::usage_counters(&subscription, &plan);
    let usage: serde_json::Map<String, serde_json::Value> = counters
        .into_iter()
        .map(|(name, counter)| (name.to_string(), json!(counter)))
        .collect();
    Success::ok(json!({
        "plan": plan.name,
        "status": subscription.status(),
        "usage": usage,
    }))
}
