pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

pub struct CompanyCreate {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub website: Option<String>,
    pub about: Option<String>,
    pub industry: Option<String>,
    pub logo: Option<String>,
}
