use std::sync::Arc;
use std::time::Instant;

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use colored::Colorize;
use common::env_config::Config;
use common::jwt::get_jwt_claims_or_error;
use futures::future::{LocalBoxFuture, Ready, ready};
use log::info;

pub struct LoggerMiddleware {}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Arc::new(service),
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();

        let console_logging_enabled = req
            .app_data::<web::Data<Arc<Config>>>()
            .map(|config| config.console_logging_enabled)
            .unwrap_or(true);
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let started = Instant::now();
            let claims = get_jwt_claims_or_error(&req).ok();
            let entity = claims
                .map(|c| format!("{}:{}", c.entity_kind.as_str(), c.entity_id))
                .unwrap_or_else(|| "anonymous".to_string());

            let res = srv.call(req).await?;

            if console_logging_enabled {
                let status_code = res.status().as_u16();
                let colored_status = match status_code {
                    200..=299 => status_code.to_string().green(),
                    300..=399 => status_code.to_string().yellow(),
                    400..=499 => status_code.to_string().bright_red(),
                    _ => status_code.to_string().red(),
                };

                let colored_method = match method.as_str() {
                    "GET" => method.blue(),
                    "POST" => method.yellow(),
                    "PUT" | "PATCH" => method.purple(),
                    "DELETE" => method.red(),
                    _ => method.normal(),
                };

                info!(
                    "[{}] {} {} {} entity={}",
                    colored_status,
                    colored_method,
                    path.bright_white(),
                    format!("({}ms)", started.elapsed().as_millis()).bright_black(),
                    entity.bright_blue(),
                );
            }

            Ok(res)
        })
    }
}
