pub struct ApplicationCreate {
    pub job_id: i64,
    pub applicant_id: i64,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}
