use chrono::{Duration, Utc};
use common::{
    error::{AppError, Res},
    misc::EntityKind,
};
use db::models::{
    enums::SubscriptionStatus,
    plan::Plan,
    subscription::Subscription,
};
use sqlx::PgPool;

use crate::dtos::sub::UsageCounter;

/// An ACTIVE subscription blocks any further plan selection; the owner must
/// cancel first. PENDING and CANCELLED rows may be replaced freely.
fn ensure_can_select(existing: Option<&Subscription>) -> Res<()> {
    match existing {
        Some(sub) if sub.status() == SubscriptionStatus::Active.as_str() => {
            Err(AppError::Conflict(
                "An active subscription already exists. Cancel it before choosing a new plan."
                    .to_string(),
            ))
        }
        _ => Ok(()),
    }
}

/// Puts the owner on the given plan. Free plans activate immediately; paid
/// plans sit PENDING until a payment for them verifies. Re-subscribing
/// replaces the single subscription row and resets its counters.
pub async fn select_plan(
    pool: &PgPool,
    kind: EntityKind,
    owner_id: i64,
    plan_id: i64,
) -> Res<Subscription> {
    let plan = db::plan::find_by_id(pool, plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

    let existing = db::subscription::find_for_owner(pool, kind, owner_id).await?;
    ensure_can_select(existing.as_ref())?;

    let status = SubscriptionStatus::initial_for_price(plan.price);
    let end_date = (Utc::now() + Duration::days(plan.duration_days as i64)).naive_utc();
    db::subscription::upsert_for_owner(pool, kind, owner_id, plan.id, status.as_str(), end_date)
        .await
}

/// A cancel that found no ACTIVE row: Conflict when a row in another state
/// exists, NotFound when the owner has no subscription at all.
fn cancel_miss_error(existing: Option<&Subscription>) -> AppError {
    match existing {
        Some(_) => AppError::Conflict("No active subscription to cancel".to_string()),
        None => AppError::NotFound("No subscription found".to_string()),
    }
}

/// Cancels the owner's active subscription. The transition is a single
/// status-guarded UPDATE, so two racing cancels resolve to one success and
/// one Conflict. Cancelling keeps the row, so the owner's history and a
/// later re-subscribe both work.
pub async fn cancel(pool: &PgPool, kind: EntityKind, owner_id: i64) -> Res<Subscription> {
    if let Some(cancelled) = db::subscription::cancel_if_active(pool, kind, owner_id).await? {
        return Ok(cancelled);
    }
    let existing = db::subscription::find_for_owner(pool, kind, owner_id).await?;
    Err(cancel_miss_error(existing.as_ref()))
}

pub async fn current_with_plan(
    pool: &PgPool,
    kind: EntityKind,
    owner_id: i64,
) -> Res<(Subscription, Plan)> {
    let subscription = db::subscription::find_for_owner(pool, kind, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No subscription found".to_string()))?;
    let plan = db::plan::find_by_id(pool, subscription.plan_id())
        .await?
        .ok_or_else(|| AppError::Internal("Subscription references a missing plan".to_string()))?;
    Ok((subscription, plan))
}

/// Usage counters for the owner's kind, measured against the plan limits.
pub fn usage_counters(subscription: &Subscription, plan: &Plan) -> Vec<(&'static str, UsageCounter)> {
    match subscription {
        Subscription::User(sub) => vec![(
            "applications",
            UsageCounter::new(sub.applications_used, plan.user_applications_limit),
        )],
        Subscription::Company(sub) => vec![
            (
                "jobs",
                UsageCounter::new(sub.jobs_posted, plan.company_jobs_limit),
            ),
            (
                "internships",
                UsageCounter::new(sub.internships_posted, plan.company_internships_limit),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use db::models::subscription::{CompanySubscription, UserSubscription};

    fn plan() -> Plan {
        Plan {
            id: 1,
            name: "Free Plan".to_string(),
            description: "".to_string(),
            price: 0.0,
            duration_days: 30,
            user_applications_limit: 5,
            company_jobs_limit: 1,
            company_internships_limit: 2,
            created_at: NaiveDateTime::default(),
        }
    }

    fn user_sub(plan_id: i64, status: &str) -> Subscription {
        Subscription::User(UserSubscription {
            id: 1,
            user_id: 10,
            plan_id,
            status: status.to_string(),
            applications_used: 2,
            start_date: NaiveDateTime::default(),
            end_date: NaiveDateTime::default(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        })
    }

    #[test]
    fn active_subscription_blocks_any_plan_selection() {
        let on_plan_1 = user_sub(1, "ACTIVE");
        assert!(matches!(
            ensure_can_select(Some(&on_plan_1)),
            Err(AppError::Conflict(_))
        ));
        // Switching to a different plan is still blocked until cancel.
        let on_plan_2 = user_sub(2, "ACTIVE");
        assert!(matches!(
            ensure_can_select(Some(&on_plan_2)),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn non_active_rows_allow_plan_selection() {
        assert!(ensure_can_select(None).is_ok());
        assert!(ensure_can_select(Some(&user_sub(1, "PENDING"))).is_ok());
        assert!(ensure_can_select(Some(&user_sub(1, "CANCELLED"))).is_ok());
    }

    #[test]
    fn cancel_miss_distinguishes_conflict_from_not_found() {
        assert!(matches!(
            cancel_miss_error(Some(&user_sub(1, "CANCELLED"))),
            AppError::Conflict(_)
        ));
        assert!(matches!(cancel_miss_error(None), AppError::NotFound(_)));
    }

    #[test]
    fn user_usage_reports_applications_only() {
        let sub = user_sub(1, "ACTIVE");
        let counters = usage_counters(&sub, &plan());
        assert_eq!(counters.len(), 1);
        assert_eq!(counters[0].0, "applications");
        assert_eq!(counters[0].1.remaining, Some(3));
    }

    #[test]
    fn company_usage_reports_both_posting_kinds() {
        let sub = Subscription::Company(CompanySubscription {
            id: 2,
            company_id: 20,
            plan_id: 1,
            status: "ACTIVE".to_string(),
            jobs_posted: 1,
            internships_posted: 0,
            start_date: NaiveDateTime::default(),
            end_date: NaiveDateTime::default(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        });
        let counters = usage_counters(&sub, &plan());
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[0].1.remaining, Some(0));
        assert_eq!(counters[1].1.remaining, Some(2));
    }
}
