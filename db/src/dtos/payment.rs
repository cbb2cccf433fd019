pub struct PaymentCreate {
    pub amount: f64,
    pub currency: String,
    pub provider: String,
    pub provider_order_id: String,
    pub user_subscription_id: Option<i64>,
    pub company_subscription_id: Option<i64>,
}
