use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JobCreateRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    /// "FULL_TIME" or "INTERNSHIP"; decides which quota counter is consumed.
    pub job_type: String,
}

#[derive(Debug, Deserialize)]
pub struct JobUpdateRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
}

/// Optional filters for the public listing, combined with `?page=&limit=`.
#[derive(Debug, Deserialize)]
pub struct JobFilterQuery {
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    pub job_id: i64,
}
