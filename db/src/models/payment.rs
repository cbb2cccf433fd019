use chrono::NaiveDateTime;
use serde::Serialize;

/// A payment order funding exactly one subscription. Created PENDING at
/// order time, COMPLETED only after signature verification succeeds.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    pub id: i64,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub provider: String,
    pub provider_order_id: String,
    pub provider_payment_id: Option<String>,
    pub user_subscription_id: Option<i64>,
    pub company_subscription_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
