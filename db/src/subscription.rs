use chrono::NaiveDateTime;
use common::{
    error::{AppError, Res},
    misc::EntityKind,
};
use sqlx::{Executor, Postgres};

use crate::models::subscription::{CompanySubscription, Subscription, UserSubscription};

pub async fn find_for_owner<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    owner_id: i64,
) -> Res<Option<Subscription>> {
    match kind {
        EntityKind::User => sqlx::query_as::<_, UserSubscription>(
            "SELECT * FROM user_subscriptions WHERE user_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(executor)
        .await
        .map(|row| row.map(Subscription::User))
        .map_err(AppError::from),
        EntityKind::Company => sqlx::query_as::<_, CompanySubscription>(
            "SELECT * FROM company_subscriptions WHERE company_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(executor)
        .await
        .map(|row| row.map(Subscription::Company))
        .map_err(AppError::from),
    }
}

/// Creates or replaces the owner's single subscription row. Usage counters
/// reset on every plan change.
pub async fn upsert_for_owner<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    owner_id: i64,
    plan_id: i64,
    status: &str,
    end_date: NaiveDateTime,
) -> Res<Subscription> {
    match kind {
        EntityKind::User => sqlx::query_as::<_, UserSubscription>(
            r#"
            INSERT INTO user_subscriptions (user_id, plan_id, status, end_date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET plan_id = EXCLUDED.plan_id,
                status = EXCLUDED.status,
                applications_used = 0,
                start_date = now(),
                end_date = EXCLUDED.end_date,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(plan_id)
        .bind(status)
        .bind(end_date)
        .fetch_one(executor)
        .await
        .map(Subscription::User)
        .map_err(AppError::from),
        EntityKind::Company => sqlx::query_as::<_, CompanySubscription>(
            r#"
            INSERT INTO company_subscriptions (company_id, plan_id, status, end_date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_id) DO UPDATE
            SET plan_id = EXCLUDED.plan_id,
                status = EXCLUDED.status,
                jobs_posted = 0,
                internships_posted = 0,
                start_date = now(),
                end_date = EXCLUDED.end_date,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(plan_id)
        .bind(status)
        .bind(end_date)
        .fetch_one(executor)
        .await
        .map(Subscription::Company)
        .map_err(AppError::from),
    }
}

/// ACTIVE -> CANCELLED transition. The status predicate makes the transition
/// atomic: of two racing cancels only one gets the row back, and a row a
/// concurrent re-subscribe already replaced is left alone.
pub async fn cancel_if_active<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    owner_id: i64,
) -> Res<Option<Subscription>> {
    match kind {
        EntityKind::User => sqlx::query_as::<_, UserSubscription>(
            "UPDATE user_subscriptions SET status = 'CANCELLED', updated_at = now() \
             WHERE user_id = $1 AND status = 'ACTIVE' RETURNING *",
        )
        .bind(owner_id)
        .fetch_optional(executor)
        .await
        .map(|row| row.map(Subscription::User))
        .map_err(AppError::from),
        EntityKind::Company => sqlx::query_as::<_, CompanySubscription>(
            "UPDATE company_subscriptions SET status = 'CANCELLED', updated_at = now() \
             WHERE company_id = $1 AND status = 'ACTIVE' RETURNING *",
        )
        .bind(owner_id)
        .fetch_optional(executor)
        .await
        .map(|row| row.map(Subscription::Company))
        .map_err(AppError::from),
    }
}

/// PENDING -> ACTIVE transition by subscription id; the status predicate makes
/// repeated activation (idempotent payment verification) a no-op.
pub async fn activate_if_pending<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    kind: EntityKind,
    subscription_id: i64,
) -> Res<bool> {
    let sql = match kind {
        EntityKind::User => {
            "UPDATE user_subscriptions SET status = 'ACTIVE', updated_at = now() \
             WHERE id = $1 AND status = 'PENDING'"
        }
        EntityKind::Company => {
            "UPDATE company_subscriptions SET status = 'ACTIVE', updated_at = now() \
             WHERE id = $1 AND status = 'PENDING'"
        }
    };
    let result = sqlx::query(sql).bind(subscription_id).execute(executor).await?;
    Ok(result.rows_affected() > 0)
}
