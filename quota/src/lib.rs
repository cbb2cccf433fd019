//! Usage-counter enforcement against plan limits.
//!
//! Every billable create (job application, job posting) consumes one unit of
//! the owner's subscription quota. The check and the increment are one
//! conditional UPDATE so two concurrent creations cannot both observe "under
//! limit" and overshoot the cap. Callers run [`consume`] and the resource
//! insert inside the same transaction: either both commit or neither does.

use common::error::{AppError, Res};
use sqlx::PgConnection;

/// Plans store this sentinel where a counter has no cap.
pub const UNLIMITED: i32 = 999_999;

/// Billable resource kinds, each tracked by its own subscription counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    /// Job applications, consumed by Users.
    Applications,
    /// Full-time job postings, consumed by Companies.
    Jobs,
    /// Internship postings, consumed by Companies.
    Internships,
}

impl UsageKind {
    fn resource_noun(&self) -> &'static str {
        match self {
            UsageKind::Applications => "applications",
            UsageKind::Jobs => "jobs",
            UsageKind::Internships => "internships",
        }
    }

    fn limit_message(&self) -> &'static str {
        match self {
            UsageKind::Applications => {
                "Application limit reached. Upgrade to premium for unlimited applications."
            }
            UsageKind::Jobs => {
                "Job posting limit reached. Upgrade to premium for unlimited jobs."
            }
            UsageKind::Internships => {
                "Internship posting limit reached. Upgrade to premium for unlimited internships."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// Counter incremented; holds the new value.
    Allowed { used: i32 },
    Denied(QuotaDenial),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDenial {
    /// No subscription row, or its status is not ACTIVE.
    SubscriptionRequired,
    /// The plan's finite limit for this counter is exhausted.
    LimitReached,
}

impl QuotaDenial {
    pub fn to_error(self, kind: UsageKind) -> AppError {
        match self {
            QuotaDenial::SubscriptionRequired => {
                AppError::Forbidden("Active subscription required".to_string())
            }
            QuotaDenial::LimitReached => AppError::Forbidden(kind.limit_message().to_string()),
        }
    }
}

/// Atomically checks the owner's counter against the plan limit and
/// increments it when under. The guarded UPDATE is the serialization point:
/// row-level locking on the subscription row orders concurrent consumers.
pub async fn try_consume(
    conn: &mut PgConnection,
    owner_id: i64,
    kind: UsageKind,
) -> Res<QuotaDecision> {
    let sql = match kind {
        UsageKind::Applications => {
            "UPDATE user_subscriptions s
             SET applications_used = s.applications_used + 1, updated_at = now()
             FROM plans p
             WHERE s.user_id = $1
               AND p.id = s.plan_id
               AND s.status = 'ACTIVE'
               AND (p.user_applications_limit >= $2 OR s.applications_used < p.user_applications_limit)
             RETURNING s.applications_used"
        }
        UsageKind::Jobs => {
            "UPDATE company_subscriptions s
             SET jobs_posted = s.jobs_posted + 1, updated_at = now()
             FROM plans p
             WHERE s.company_id = $1
               AND p.id = s.plan_id
               AND s.status = 'ACTIVE'
               AND (p.company_jobs_limit >= $2 OR s.jobs_posted < p.company_jobs_limit)
             RETURNING s.jobs_posted"
        }
        UsageKind::Internships => {
            "UPDATE company_subscriptions s
             SET internships_posted = s.internships_posted + 1, updated_at = now()
             FROM plans p
             WHERE s.company_id = $1
               AND p.id = s.plan_id
               AND s.status = 'ACTIVE'
               AND (p.company_internships_limit >= $2 OR s.internships_posted < p.company_internships_limit)
             RETURNING s.internships_posted"
        }
    };

    let used: Option<i32> = sqlx::query_scalar(sql)
        .bind(owner_id)
        .bind(UNLIMITED)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(used) = used {
        return Ok(QuotaDecision::Allowed { used });
    }

    // The guarded update missed: tell "no active subscription" apart from
    // "limit exhausted" for the caller's error message.
    let status_sql = match kind {
        UsageKind::Applications => "SELECT status FROM user_subscriptions WHERE user_id = $1",
        UsageKind::Jobs | UsageKind::Internships => {
            "SELECT status FROM company_subscriptions WHERE company_id = $1"
        }
    };
    let status: Option<String> = sqlx::query_scalar(status_sql)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;

    let denial = match status.as_deref() {
        Some("ACTIVE") => QuotaDenial::LimitReached,
        _ => QuotaDenial::SubscriptionRequired,
    };
    log::debug!(
        "quota denied for owner {} ({}): {:?}",
        owner_id,
        kind.resource_noun(),
        denial
    );
    Ok(QuotaDecision::Denied(denial))
}

/// [`try_consume`] with denials mapped to `Forbidden` responses.
pub async fn consume(conn: &mut PgConnection, owner_id: i64, kind: UsageKind) -> Res<i32> {
    match try_consume(conn, owner_id, kind).await? {
        QuotaDecision::Allowed { used } => Ok(used),
        QuotaDecision::Denied(denial) => Err(denial.to_error(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_maps_to_forbidden() {
        for kind in [UsageKind::Applications, UsageKind::Jobs, UsageKind::Internships] {
            for denial in [QuotaDenial::SubscriptionRequired, QuotaDenial::LimitReached] {
                assert!(matches!(denial.to_error(kind), AppError::Forbidden(_)));
            }
        }
    }

    #[test]
    fn limit_messages_suggest_upgrade() {
        for kind in [UsageKind::Applications, UsageKind::Jobs, UsageKind::Internships] {
            let err = QuotaDenial::LimitReached.to_error(kind);
            assert!(err.to_string().contains("Upgrade to premium"));
        }
    }

    #[test]
    fn subscription_required_message() {
        let err = QuotaDenial::SubscriptionRequired.to_error(UsageKind::Applications);
        assert!(err.to_string().contains("Active subscription required"));
    }
}
