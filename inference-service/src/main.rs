mod inference;
mod routes;
mod types;

use actix_web::error::InternalError;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use std::sync::Arc;

use routes::AppState;
use types::ErrorResponse;

const DEFAULT_MODEL_PATH: &str = "models/model.onnx";
const DEFAULT_MODEL_INPUTS: usize = 7;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());
    let model_inputs = std::env::var("MODEL_INPUTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MODEL_INPUTS);

    let model = match inference::ModelInference::load(&model_path, model_inputs) {
        Ok(model) => {
            info!("ONNX model loaded from {} ({} inputs)", model_path, model_inputs);
            model
        }
        Err(e) => {
            error!("failed to load model from {}: {}", model_path, e);
            return Err(e);
        }
    };

    let state = web::Data::new(AppState {
        predictor: Arc::new(model) as Arc<dyn inference::Predictor>,
        model_path,
    });

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("{}:{}", host, port);

    info!("serving on http://{}", bind_address);
    info!("  GET  /            - liveness greeting");
    info!("  GET  /model-info  - loaded model description");
    info!("  POST /predict     - single-sample prediction");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let body = ErrorResponse::new(format!("invalid request body: {}", err));
                InternalError::from_response(err, actix_web::HttpResponse::BadRequest().json(body))
                    .into()
            }))
            .service(routes::home)
            .service(routes::model_info)
            .service(routes::predict)
            .default_service(web::route().to(routes::not_found))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
