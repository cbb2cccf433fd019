use actix_web::web::{self};

pub mod routes {
    pub mod application;
}

mod dtos {
    pub(crate) mod application;
}

pub fn mount() -> actix_web::Scope {
    web::scope("/applications")
        .service(routes::application::get_my_applications)
        .service(routes::application::get_job_applications)
        .service(routes::application::post_application)
        .service(routes::application::patch_application_status)
        .service(routes::application::get_application)
        .service(routes::application::delete_application)
}
