use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub is_banned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Company {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub website: Option<String>,
    pub about: Option<String>,
    pub industry: Option<String>,
    pub logo: Option<String>,
    pub is_banned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Closed tagged variant over the two principal kinds. Shares authorization
/// semantics while keeping storage and profile fields distinct.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Entity {
    User(User),
    Company(Company),
}

impl Entity {
    pub fn id(&self) -> i64 {
        match self {
            Entity::User(u) => u.id,
            Entity::Company(c) => c.id,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Entity::User(u) => &u.password_hash,
            Entity::Company(c) => &c.password_hash,
        }
    }

    pub fn is_banned(&self) -> bool {
        match self {
            Entity::User(u) => u.is_banned,
            Entity::Company(c) => c.is_banned,
        }
    }
}
