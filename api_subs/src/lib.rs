use actix_web::web::{self};

pub mod routes {
    pub mod pay;
    pub mod sub;
}

mod services {
    pub(crate) mod pay;
    pub(crate) mod sub;
}

mod dtos {
    pub(crate) mod pay;
    pub(crate) mod sub;
}

pub mod misc {
    pub mod provider;
}

pub use misc::provider::PaymentProvider;

pub fn mount_subs() -> actix_web::Scope {
    web::scope("/subscriptions")
        .service(routes::sub::get_plans)
        .service(routes::sub::get_current)
        .service(routes::sub::get_usage)
        .service(routes::sub::post_subscribe)
        .service(routes::sub::delete_subscription)
}

pub fn mount_pay() -> actix_web::Scope {
    web::scope("/payments")
        .service(routes::pay::post_create_order)
        .service(routes::pay::post_verify)
        .service(routes::pay::get_history)
}
