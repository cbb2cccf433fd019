use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub status: String,
    pub applied_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Applicant's view: application joined with the job and company it targets.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ApplicationWithJob {
    pub id: i64,
    pub job_id: i64,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub status: String,
    pub applied_at: NaiveDateTime,
    pub job_title: String,
    pub job_location: String,
    pub job_salary: Option<String>,
    pub job_type: String,
    pub company_id: i64,
    pub company_name: String,
    pub company_logo: Option<String>,
}

/// Company's view: application joined with the applicant's profile.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ApplicationWithApplicant {
    pub id: i64,
    pub job_id: i64,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub status: String,
    pub applied_at: NaiveDateTime,
    pub applicant_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_skills: Option<String>,
    pub applicant_bio: Option<String>,
    pub applicant_location: Option<String>,
}
