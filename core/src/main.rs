mod cors;

use actix_web::{
    App, HttpResponse, HttpServer, Responder, get,
    web::{self},
};
use api_subs::PaymentProvider;
use common::env_config::Config;

#[get("/")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection and run migrations
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // payment provider client, shared across workers
    let provider = PaymentProvider::new(&config.payment);
    if provider.is_mock() && is_production {
        panic!("Payment credentials must be set in production");
    }

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(provider.clone()))
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(health)
            .service(
                web::scope("/api")
                    .service(api_auth::mount())
                    .service(api_jobs::mount_jobs())
                    .service(api_jobs::mount_bookmarks())
                    .service(api_apps::mount())
                    .service(api_subs::mount_subs())
                    .service(api_subs::mount_pay()),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
