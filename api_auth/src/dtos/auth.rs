use db::models::entity::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterCompanyRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub website: Option<String>,
    pub about: Option<String>,
    pub industry: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// "User" or "Company"; the two namespaces have separate credentials.
    pub entity_type: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub account: Entity,
}
