use actix_web::{Responder, get, post, web};
use common::error::Res;
use common::http::{PageQuery, Pagination, Success};
use extractor::identity::Identity;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::pay::VerifyRequest;
use crate::misc::provider::PaymentProvider;
use crate::services;

/// Mints a provider order for the caller's pending subscription. The
/// response carries what the checkout widget needs.
#[post("/create-order")]
pub async fn post_create_order(
    identity: Identity,
    pool: web::Data<Arc<PgPool>>,
    provider: web::Data<PaymentProvider>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (payment, order) =
        services::pay::create_order(pg_pool, &provider, identity.kind, identity.entity_id).await?;
    Success::created(json!({
        "payment": payment,
        "order": {
            "id": order.order_id,
            "amount": order.amount_minor,
            "currency": order.currency,
            "key_id": provider.key_id(),
        },
    }))
}

/// Confirms a checkout. A valid signature completes the payment and
/// activates the subscription it funds; replays are no-ops.
#[post("/verify")]
pub async fn post_verify(
    identity: Identity,
    req: web::Json<VerifyRequest>,
    pool: web::Data<Arc<PgPool>>,
    provider: web::Data<PaymentProvider>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (payment, activated) = services::pay::verify(
        pg_pool,
        &provider,
        identity.kind,
        identity.entity_id,
        &req.into_inner(),
    )
    .await?;
    Success::ok(json!({
        "payment": payment,
        "subscription_activated": activated,
    }))
}

#[get("/history")]
pub async fn get_history(
    identity: Identity,
    page: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let (offset, limit) = page.bounds();
    let (payments, total) =
        services::pay::history(pg_pool, identity.kind, identity.entity_id, offset, limit).await?;
    Success::ok(json!({
        "payments": payments,
        "pagination": Pagination::new(&page, total),
    }))
}
