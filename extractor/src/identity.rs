//! Request guards for authenticated routes.
//!
//! [`Identity`] only requires a valid token. [`UserIdentity`] and
//! [`CompanyIdentity`] additionally pin the caller's kind and reject banned
//! accounts. The kind check runs before the ban lookup, so a company token
//! on a user route gets the kind error even when the account is banned.

use std::sync::Arc;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures::future::{LocalBoxFuture, Ready, ready};
use sqlx::PgPool;

use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
    misc::EntityKind,
};

/// Any authenticated caller, user or company.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub entity_id: i64,
    pub kind: EntityKind,
}

impl Identity {
    fn from_extensions(req: &HttpRequest) -> Res<Self> {
        let extensions = req.extensions();
        let Some(claims_res) = extensions.get::<Res<JwtClaims>>() else {
            return Err(AppError::Unauthorized("Authentication required".to_string()));
        };
        match claims_res {
            Ok(claims) => Ok(Identity {
                entity_id: claims.entity_id,
                kind: claims.entity_kind,
            }),
            Err(_) => Err(AppError::Unauthorized(
                "Invalid or expired token".to_string(),
            )),
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Res<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Identity::from_extensions(req))
    }
}

fn pool_from(req: &HttpRequest) -> Res<Arc<PgPool>> {
    req.app_data::<web::Data<Arc<PgPool>>>()
        .map(|data| Arc::clone(data.get_ref()))
        .ok_or_else(|| AppError::Internal("Database pool is not configured".to_string()))
}

async fn reject_banned(pool: &PgPool, kind: EntityKind, id: i64) -> Res<()> {
    if db::entity::is_banned(pool, kind, id).await? {
        return Err(AppError::Forbidden("Account is banned".to_string()));
    }
    Ok(())
}

/// An authenticated, non-banned user account.
#[derive(Debug, Clone, Copy)]
pub struct UserIdentity {
    pub user_id: i64,
}

impl FromRequest for UserIdentity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Res<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_extensions(req);
        let pool = pool_from(req);
        Box::pin(async move {
            let identity = identity?;
            if identity.kind != EntityKind::User {
                return Err(AppError::Forbidden(
                    "Only users can perform this action".to_string(),
                ));
            }
            let pool = pool?;
            reject_banned(&pool, EntityKind::User, identity.entity_id).await?;
            Ok(UserIdentity {
                user_id: identity.entity_id,
            })
        })
    }
}

/// An authenticated, non-banned company account.
#[derive(Debug, Clone, Copy)]
pub struct CompanyIdentity {
    pub company_id: i64,
}

impl FromRequest for CompanyIdentity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Res<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_extensions(req);
        let pool = pool_from(req);
        Box::pin(async move {
            let identity = identity?;
            if identity.kind != EntityKind::Company {
                return Err(AppError::Forbidden(
                    "Only companies can perform this action".to_string(),
                ));
            }
            let pool = pool?;
            reject_banned(&pool, EntityKind::Company, identity.entity_id).await?;
            Ok(CompanyIdentity {
                company_id: identity.entity_id,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn missing_claims_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = Identity::from_extensions(&req).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[actix_web::test]
    async fn stored_claims_are_read_back() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert::<Res<JwtClaims>>(Ok(JwtClaims {
            entity_id: 42,
            entity_kind: EntityKind::Company,
            iat: 0,
            exp: 0,
        }));
        let identity = Identity::from_extensions(&req).unwrap();
        assert_eq!(identity.entity_id, 42);
        assert_eq!(identity.kind, EntityKind::Company);
    }

    #[actix_web::test]
    async fn stored_error_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert::<Res<JwtClaims>>(Err(
            AppError::Unauthorized("Invalid or expired token".to_string()),
        ));
        let err = Identity::from_extensions(&req).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
