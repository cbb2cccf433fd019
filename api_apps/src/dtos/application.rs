use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub job_id: i64,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// `?status=` filter combined with the shared pagination query.
#[derive(Debug, Deserialize)]
pub struct StatusFilterQuery {
    pub status: Option<String>,
}
