pub struct JobCreate {
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub job_type: String,
}

pub struct JobUpdate {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub job_type: String,
}

/// Optional filters for the public job listing.
#[derive(Debug, Default)]
pub struct JobFilter {
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}
