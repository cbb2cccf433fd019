use chrono::NaiveDateTime;
use serde::Serialize;

/// Immutable reference data binding a price to per-resource limits.
/// A limit of 999999 means unlimited.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_days: i32,
    pub user_applications_limit: i32,
    pub company_jobs_limit: i32,
    pub company_internships_limit: i32,
    pub created_at: NaiveDateTime,
}
