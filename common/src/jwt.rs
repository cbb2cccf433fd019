use actix_web::{HttpMessage, HttpResponse, dev::ServiceRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
    misc::EntityKind,
};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub entity_id: i64,
    pub entity_kind: EntityKind,
    pub iat: usize,
    pub exp: usize,
}

pub struct ClaimsSpec {
    pub entity_id: i64,
    pub entity_kind: EntityKind,
}

/// Generates a signed identity token for the given entity.
/// Expiry is a fixed window from now (7 days by default).
pub fn generate_jwt(spec: ClaimsSpec, config: &JwtConfig) -> Res<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::days(config.expiration_days))
        .expect("valid timestamp")
        .timestamp();

    let claims = JwtClaims {
        entity_id: spec.entity_id,
        entity_kind: spec.entity_kind,
        iat: now.timestamp() as usize,
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts claims from a token. Tokens with a bad signature, a missing
/// field, or a past expiry all fail with Unauthorized. There is no server-side
/// revocation: a token stays valid until its natural expiry.
pub fn validate_jwt(token: &str, secret: &str) -> Res<JwtClaims> {
    let token_data = jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;
    Ok(token_data.claims)
}

pub fn get_jwt_claims_or_error(req: &ServiceRequest) -> Result<JwtClaims, HttpResponse> {
    if let Some(jwt_claims_res) = req.extensions().get::<Res<JwtClaims>>() {
        match jwt_claims_res {
            Ok(claims) => Ok(claims.clone()),
            Err(app_error) => Err(app_error.to_http_response()),
        }
    } else {
        Err(
            AppError::Unauthorized("No authorization token provided".to_string())
                .to_http_response(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_days: 7,
        }
    }

    #[test]
    fn roundtrip_preserves_identity() {
        let config = config();
        let token = generate_jwt(
            ClaimsSpec {
                entity_id: 42,
                entity_kind: EntityKind::Company,
            },
            &config,
        )
        .unwrap();

        let claims = validate_jwt(&token, &config.secret).unwrap();
        assert_eq!(claims.entity_id, 42);
        assert_eq!(claims.entity_kind, EntityKind::Company);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_jwt(
            ClaimsSpec {
                entity_id: 1,
                entity_kind: EntityKind::User,
            },
            &config(),
        )
        .unwrap();

        assert!(matches!(
            validate_jwt(&token, "other-secret"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        // Hand-roll a token whose expiry is well past the default leeway.
        let config = config();
        let past = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let claims = JwtClaims {
            entity_id: 7,
            entity_kind: EntityKind::User,
            iat: past,
            exp: past,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validate_jwt(&token, &config.secret),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(validate_jwt("not.a.token", "test-secret").is_err());
    }
}
