use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UserSubscription {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub status: String,
    pub applications_used: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct CompanySubscription {
    pub id: i64,
    pub company_id: i64,
    pub plan_id: i64,
    pub status: String,
    pub jobs_posted: i32,
    pub internships_posted: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One subscription row per owner, whichever kind the owner is.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Subscription {
    User(UserSubscription),
    Company(CompanySubscription),
}

impl Subscription {
    pub fn id(&self) -> i64 {
        match self {
            Subscription::User(s) => s.id,
            Subscription::Company(s) => s.id,
        }
    }

    pub fn plan_id(&self) -> i64 {
        match self {
            Subscription::User(s) => s.plan_id,
            Subscription::Company(s) => s.plan_id,
        }
    }

    pub fn status(&self) -> &str {
        match self {
            Subscription::User(s) => &s.status,
            Subscription::Company(s) => &s.status,
        }
    }
}
