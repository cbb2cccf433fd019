use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub job_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BookmarkWithJob {
    pub id: i64,
    pub job_id: i64,
    pub created_at: NaiveDateTime,
    pub job_title: String,
    pub job_description: String,
    pub job_location: String,
    pub job_salary: Option<String>,
    pub job_type: String,
    pub company_id: i64,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub company_industry: Option<String>,
}
