use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Job {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub job_type: String,
    pub is_removed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Job row joined with the posting company's public profile.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct JobWithCompany {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub job_type: String,
    pub created_at: NaiveDateTime,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub company_industry: Option<String>,
    pub company_website: Option<String>,
    pub company_about: Option<String>,
}

/// Company dashboard view: job row plus how many applications it received.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct JobWithApplicationCount {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub job_type: String,
    pub created_at: NaiveDateTime,
    pub application_count: i64,
}
