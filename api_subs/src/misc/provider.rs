use common::{
    env_config::PaymentConfig,
    error::{AppError, Res},
};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const PROVIDER_NAME: &str = "razorpay";

/// Order record returned by the provider (or minted locally in mock mode).
/// Amounts are in minor units (paise for INR).
#[derive(Debug, Clone)]
pub struct ProviderOrder {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Thin client for the payment provider's order API.
///
/// Without credentials the adapter runs in mock mode: orders get a local id
/// and every signature verifies. That keeps the full subscribe/pay/activate
/// flow exercisable in development.
#[derive(Clone)]
pub struct PaymentProvider {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
    currency: String,
}

impl PaymentProvider {
    pub fn new(config: &PaymentConfig) -> Self {
        PaymentProvider {
            http: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            currency: config.currency.clone(),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.key_id.is_empty()
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub async fn create_order(&self, amount: f64, receipt: &str) -> Res<ProviderOrder> {
        let amount_minor = (amount * 100.0).round() as i64;
        if self.is_mock() {
            log::warn!("payment provider in mock mode; minting local order for {}", receipt);
            return Ok(ProviderOrder {
                order_id: format!("order_mock_{}", Uuid::new_v4().simple()),
                amount_minor,
                currency: self.currency.clone(),
            });
        }

        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_minor,
                "currency": self.currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to reach payment provider: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Provider(format!(
                "Order API returned status {}",
                response.status()
            )));
        }

        let order: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse order response: {}", e)))?;
        let order_id = order["id"]
            .as_str()
            .ok_or_else(|| AppError::Provider("Order response missing id".to_string()))?
            .to_string();

        Ok(ProviderOrder {
            order_id,
            amount_minor,
            currency: self.currency.clone(),
        })
    }

    /// Checks the checkout signature: HMAC-SHA256 over "order_id|payment_id"
    /// keyed with the API secret, hex encoded.
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        if self.is_mock() {
            return true;
        }
        let Ok(mut mac) = HmacSha256::new_from_slice(self.key_secret.as_bytes()) else {
            return false;
        };
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        let expected: String = mac
            .finalize()
            .into_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        expected == signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(key_id: &str, key_secret: &str) -> PaymentProvider {
        PaymentProvider::new(&PaymentConfig {
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
            api_base_url: "https://api.razorpay.com/v1".to_string(),
            currency: "INR".to_string(),
        })
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        mac.finalize()
            .into_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    #[test]
    fn accepts_matching_signature() {
        let provider = provider("key_abc", "secret");
        let signature = sign("secret", "order_1", "pay_1");
        assert!(provider.verify_signature("order_1", "pay_1", &signature));
    }

    #[test]
    fn rejects_tampered_ids() {
        let provider = provider("key_abc", "secret");
        let signature = sign("secret", "order_1", "pay_1");
        assert!(!provider.verify_signature("order_2", "pay_1", &signature));
        assert!(!provider.verify_signature("order_1", "pay_2", &signature));
    }

    #[test]
    fn rejects_wrong_secret() {
        let provider = provider("key_abc", "secret");
        let signature = sign("other-secret", "order_1", "pay_1");
        assert!(!provider.verify_signature("order_1", "pay_1", &signature));
    }

    #[test]
    fn mock_mode_accepts_anything() {
        let provider = provider("", "");
        assert!(provider.is_mock());
        assert!(provider.verify_signature("order_1", "pay_1", "garbage"));
    }

    #[actix_web::test]
    async fn mock_mode_mints_local_orders() {
        let provider = provider("", "");
        let order = provider.create_order(29.99, "sub_1").await.unwrap();
        assert!(order.order_id.starts_with("order_mock_"));
        assert_eq!(order.amount_minor, 2999);
        assert_eq!(order.currency, "INR");
    }
}
