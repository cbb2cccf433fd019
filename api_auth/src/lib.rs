use actix_web::web::{self};

pub mod routes {
    pub mod auth;
}

mod services {
    pub(crate) mod auth;
}

mod dtos {
    pub(crate) mod auth;
}

pub fn mount() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register_user)
        .service(routes::auth::post_register_company)
        .service(routes::auth::post_login)
        .service(routes::auth::get_me)
        .service(routes::auth::post_logout)
}
