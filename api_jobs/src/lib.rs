use actix_web::web::{self};

pub mod routes {
    pub mod bookmark;
    pub mod job;
}

mod dtos {
    pub(crate) mod job;
}

pub fn mount_jobs() -> actix_web::Scope {
    web::scope("/jobs")
        .service(routes::job::get_my_jobs)
        .service(routes::job::get_jobs)
        .service(routes::job::get_job)
        .service(routes::job::post_job)
        .service(routes::job::put_job)
        .service(routes::job::delete_job)
}

pub fn mount_bookmarks() -> actix_web::Scope {
    web::scope("/bookmarks")
        .service(routes::bookmark::get_bookmark_check)
        .service(routes::bookmark::post_bookmark)
        .service(routes::bookmark::get_bookmarks)
        .service(routes::bookmark::delete_bookmark)
}
