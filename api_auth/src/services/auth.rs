use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier},
};
use chrono::{Duration, Utc};
use common::{
    error::{AppError, Res},
    misc::EntityKind,
};
use db::models::{entity::Entity, enums::SubscriptionStatus};
use sqlx::PgConnection;

pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn validate_credentials(email: &str, password: &str) -> Res<()> {
    if !email.contains('@') || email.len() < 3 {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

/// Looks up the account in the given namespace and checks the password.
/// Missing account and wrong password produce the same error, so a login
/// attempt cannot probe which emails are registered.
pub async fn authenticate(
    conn: &mut PgConnection,
    kind: EntityKind,
    email: &str,
    password: &str,
) -> Res<Entity> {
    let Some(entity) = db::entity::find_by_email(&mut *conn, kind, email).await? else {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };
    if !verify_password(password, entity.password_hash()) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }
    if entity.is_banned() {
        return Err(AppError::Forbidden("Account is banned".to_string()));
    }
    Ok(entity)
}

/// Puts a fresh account on the seeded free plan so quota checks work from
/// the first request. Free plans activate without payment.
pub async fn grant_free_plan(conn: &mut PgConnection, kind: EntityKind, owner_id: i64) -> Res<()> {
    let Some(plan) = db::plan::find_by_name(&mut *conn, "Free Plan").await? else {
        log::warn!("free plan is not seeded; account {} starts without a subscription", owner_id);
        return Ok(());
    };
    let end_date = (Utc::now() + Duration::days(plan.duration_days as i64)).naive_utc();
    db::subscription::upsert_for_owner(
        &mut *conn,
        kind,
        owner_id,
        plan.id,
        SubscriptionStatus::Active.as_str(),
        end_date,
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn credential_validation() {
        assert!(validate_credentials("a@b.co", "longenough").is_ok());
        assert!(validate_credentials("nodomain", "longenough").is_err());
        assert!(validate_credentials("a@b.co", "short").is_err());
    }
}
