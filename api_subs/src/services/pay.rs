use common::{
    error::{AppError, Res},
    misc::EntityKind,
};
use db::{
    dtos::payment::PaymentCreate,
    models::{enums::SubscriptionStatus, payment::Payment, subscription::Subscription},
};
use sqlx::PgPool;

use crate::dtos::pay::VerifyRequest;
use crate::misc::provider::{PROVIDER_NAME, PaymentProvider, ProviderOrder};

/// Creates a provider order for the owner's pending subscription and records
/// it as a PENDING payment.
pub async fn create_order(
    pool: &PgPool,
    provider: &PaymentProvider,
    kind: EntityKind,
    owner_id: i64,
) -> Res<(Payment, ProviderOrder)> {
    let (subscription, plan) = super::sub::current_with_plan(pool, kind, owner_id).await?;
    if plan.price == 0.0 {
        return Err(AppError::BadRequest(
            "Free plans do not require payment".to_string(),
        ));
    }
    if subscription.status() == SubscriptionStatus::Active.as_str() {
        return Err(AppError::Conflict(
            "Subscription is already active".to_string(),
        ));
    }

    let receipt = format!("sub_{}", subscription.id());
    let order = provider.create_order(plan.price, &receipt).await?;

    let (user_subscription_id, company_subscription_id) = match &subscription {
        Subscription::User(sub) => (Some(sub.id), None),
        Subscription::Company(sub) => (None, Some(sub.id)),
    };
    let payment = db::payment::insert(
        pool,
        PaymentCreate {
            amount: plan.price,
            currency: order.currency.clone(),
            provider: PROVIDER_NAME.to_string(),
            provider_order_id: order.order_id.clone(),
            user_subscription_id,
            company_subscription_id,
        },
    )
    .await?;

    Ok((payment, order))
}

/// Verifies a checkout signature and, on success, completes the payment and
/// activates the pending subscription it funds. Both transitions are status
/// guarded, so replaying a verification is a no-op rather than an error.
pub async fn verify(
    pool: &PgPool,
    provider: &PaymentProvider,
    kind: EntityKind,
    owner_id: i64,
    req: &VerifyRequest,
) -> Res<(Payment, bool)> {
    if !provider.verify_signature(&req.order_id, &req.payment_id, &req.signature) {
        return Err(AppError::BadRequest(
            "Invalid payment signature".to_string(),
        ));
    }

    let payment = db::payment::find_by_order_id(pool, &req.order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

    // The payment must fund the caller's own subscription.
    let subscription = db::subscription::find_for_owner(pool, kind, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No subscription found".to_string()))?;
    let funded_subscription_id = match kind {
        EntityKind::User => payment.user_subscription_id,
        EntityKind::Company => payment.company_subscription_id,
    };
    if funded_subscription_id != Some(subscription.id()) {
        return Err(AppError::NotFound("Payment not found".to_string()));
    }

    let mut tx = pool.begin().await?;
    let completed =
        db::payment::complete_if_pending(&mut *tx, payment.id, &req.payment_id).await?;
    let mut activated = false;
    if completed {
        activated =
            db::subscription::activate_if_pending(&mut *tx, kind, subscription.id()).await?;
    }
    tx.commit().await?;

    let payment = db::payment::find_by_order_id(pool, &req.order_id)
        .await?
        .ok_or_else(|| AppError::Internal("Payment disappeared during verify".to_string()))?;
    Ok((payment, activated))
}

pub async fn history(
    pool: &PgPool,
    kind: EntityKind,
    owner_id: i64,
    offset: i64,
    limit: i64,
) -> Res<(Vec<Payment>, i64)> {
    let Some(subscription) = db::subscription::find_for_owner(pool, kind, owner_id).await? else {
        return Ok((Vec::new(), 0));
    };
    let (payments, total) = match kind {
        EntityKind::User => (
            db::payment::list_for_user_subscription(pool, subscription.id(), offset, limit).await?,
            db::payment::count_for_user_subscription(pool, subscription.id()).await?,
        ),
        EntityKind::Company => (
            db::payment::list_for_company_subscription(pool, subscription.id(), offset, limit)
                .await?,
            db::payment::count_for_company_subscription(pool, subscription.id()).await?,
        ),
    };
    Ok((payments, total))
}
