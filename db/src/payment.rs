use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{dtos::payment::PaymentCreate, models::payment::Payment};

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PaymentCreate,
) -> Res<Payment> {
    sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments
            (amount, currency, provider, provider_order_id,
             user_subscription_id, company_subscription_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.amount)
    .bind(data.currency)
    .bind(data.provider)
    .bind(data.provider_order_id)
    .bind(data.user_subscription_id)
    .bind(data.company_subscription_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn find_by_order_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    provider_order_id: &str,
) -> Res<Option<Payment>> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE provider_order_id = $1")
        .bind(provider_order_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// PENDING -> COMPLETED transition. Returns false when the payment was
/// already completed, which makes repeated verification idempotent.
pub async fn complete_if_pending<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    payment_id: i64,
    provider_payment_id: &str,
) -> Res<bool> {
    let result = sqlx::query(
        "UPDATE payments SET status = 'COMPLETED', provider_payment_id = $2, updated_at = now() \
         WHERE id = $1 AND status = 'PENDING'",
    )
    .bind(payment_id)
    .bind(provider_payment_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_for_user_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    subscription_id: i64,
    offset: i64,
    limit: i64,
) -> Res<Vec<Payment>> {
    sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE user_subscription_id = $1 \
         ORDER BY created_at DESC OFFSET $2 LIMIT $3",
    )
    .bind(subscription_id)
    .bind(offset)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_for_company_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    subscription_id: i64,
    offset: i64,
    limit: i64,
) -> Res<Vec<Payment>> {
    sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE company_subscription_id = $1 \
         ORDER BY created_at DESC OFFSET $2 LIMIT $3",
    )
    .bind(subscription_id)
    .bind(offset)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_for_user_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    subscription_id: i64,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments WHERE user_subscription_id = $1")
        .bind(subscription_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn count_for_company_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    subscription_id: i64,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM payments WHERE company_subscription_id = $1",
    )
    .bind(subscription_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
