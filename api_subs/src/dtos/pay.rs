use serde::Deserialize;

/// Checkout callback payload: the provider's order and payment ids plus the
/// signature it computed over them.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}
