//! API Server
//!
//! actix-web server exposing the correction endpoints to the desktop client.

use super::handlers;
use crate::core::ModelInvoker;
use crate::error::ErrorDetail;
use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{error, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};

/// Register routes and shared state on an app or test service
pub fn configure(invoker: Arc<ModelInvoker>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(invoker))
            .app_data(json_config())
            .service(handlers::root)
            .service(handlers::health)
            .service(handlers::correct)
            .service(handlers::rephrase);
    }
}

/// Malformed bodies are answered with 422 and a `detail` message
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        let response = HttpResponse::UnprocessableEntity().json(ErrorDetail {
            detail: err.to_string(),
        });
        error::InternalError::from_response(err, response).into()
    })
}

/// The full application: routes, shared state and CORS.
///
/// Any origin, method and header is accepted; deploy behind a private
/// network only.
pub fn app(
    invoker: Arc<ModelInvoker>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Cors::permissive())
        .configure(configure(invoker))
}

/// Run the HTTP server until shutdown (Ctrl-C)
pub async fn run(host: &str, port: u16, invoker: Arc<ModelInvoker>) -> std::io::Result<()> {
    info!("🌐 Fluenter API listening on http://{}:{}", host, port);

    HttpServer::new(move || app(invoker.clone()))
        .bind((host, port))?
        .run()
        .await
}
