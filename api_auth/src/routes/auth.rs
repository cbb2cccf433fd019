use actix_web::{Responder, get, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec};
use common::misc::EntityKind;
use db::models::entity::Entity;
use extractor::identity::Identity;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::{AuthResponse, LoginRequest, RegisterCompanyRequest, RegisterUserRequest};
use crate::services;

/// Registers a job-seeker account.
///
/// The account, its free-plan subscription, and nothing else are created in
/// one transaction. Responds 201 with a token, or 409 when the email is
/// already taken.
#[post("/register/user")]
async fn post_register_user(
    req: web::Json<RegisterUserRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    services::auth::validate_credentials(&req.email, &req.password)?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if db::entity::exists_by_email(pg_pool, EntityKind::User, &req.email).await? {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = services::auth::hash_password(&req.password)?;
    let mut tx = pg_pool.begin().await?;
    let user = db::entity::insert_user(
        &mut *tx,
        db::dtos::entity::UserCreate {
            email: req.email,
            password_hash,
            name: req.name,
            skills: req.skills,
            bio: req.bio,
            location: req.location,
        },
    )
    .await?;
    services::auth::grant_free_plan(&mut tx, EntityKind::User, user.id).await?;
    tx.commit().await?;

    let token = jwt::generate_jwt(
        ClaimsSpec {
            entity_id: user.id,
            entity_kind: EntityKind::User,
        },
        &config.jwt_config,
    )?;
    Success::created(AuthResponse {
        token,
        account: Entity::User(user),
    })
}

/// Registers an employer account. Same flow as user registration but in the
/// company namespace.
#[post("/register/company")]
async fn post_register_company(
    req: web::Json<RegisterCompanyRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();
    services::auth::validate_credentials(&req.email, &req.password)?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if db::entity::exists_by_email(pg_pool, EntityKind::Company, &req.email).await? {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = services::auth::hash_password(&req.password)?;
    let mut tx = pg_pool.begin().await?;
    let company = db::entity::insert_company(
        &mut *tx,
        db::dtos::entity::CompanyCreate {
            email: req.email,
            password_hash,
            name: req.name,
            website: req.website,
            about: req.about,
            industry: req.industry,
            logo: req.logo,
        },
    )
    .await?;
    services::auth::grant_free_plan(&mut tx, EntityKind::Company, company.id).await?;
    tx.commit().await?;

    let token = jwt::generate_jwt(
        ClaimsSpec {
            entity_id: company.id,
            entity_kind: EntityKind::Company,
        },
        &config.jwt_config,
    )?;
    Success::created(AuthResponse {
        token,
        account: Entity::Company(company),
    })
}

/// Authenticates against the namespace named by `entity_type`.
/// Returns 401 for bad credentials, 403 for banned accounts.
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let login_data = login_data.into_inner();
    let kind = EntityKind::from_str(&login_data.entity_type)?;

    let mut conn = pool.acquire().await?;
    let account =
        services::auth::authenticate(&mut conn, kind, &login_data.email, &login_data.password)
            .await?;

    let token = jwt::generate_jwt(
        ClaimsSpec {
            entity_id: account.id(),
            entity_kind: kind,
        },
        &config.jwt_config,
    )?;
    Success::ok(AuthResponse { token, account })
}

/// Profile plus current subscription for the calling account.
#[get("/me")]
pub async fn get_me(identity: Identity, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let account = db::entity::find_by_id(pg_pool, identity.kind, identity.entity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
    let subscription =
        db::subscription::find_for_owner(pg_pool, identity.kind, identity.entity_id).await?;
    Success::ok(json!({
        "account": account,
        "subscription": subscription,
    }))
}

/// Tokens are not tracked server side, so logout is advisory: the client
/// drops its copy and the token ages out at expiry.
#[post("/logout")]
pub async fn post_logout(_identity: Identity) -> Res<impl Responder> {
    Success::ok(json!({ "message": "Logged out" }))
}
