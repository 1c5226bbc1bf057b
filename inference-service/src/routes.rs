use actix_web::{get, post, web, HttpResponse, Responder};
use log::error;
use std::sync::Arc;

use crate::inference::Predictor;
use crate::types::{ErrorResponse, ModelInfo, PredictRequest, PredictResponse};

/// Shared per-process state: the model is loaded once at startup and
/// read-only for the lifetime of the server.
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    pub model_path: String,
}

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().body("Actix + tract AI service is running")
}

#[get("/model-info")]
pub async fn model_info(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ModelInfo {
        inputs: state.predictor.input_len(),
        model_path: state.model_path.clone(),
    })
}

#[post("/predict")]
pub async fn predict(
    state: web::Data<AppState>,
    input: web::Json<PredictRequest>,
) -> impl Responder {
    let features = &input.features;
    let expected = state.predictor.input_len();

    if features.len() != expected {
        return HttpResponse::BadRequest().json(ErrorResponse::new(format!(
            "expected {} features, got {}",
            expected,
            features.len()
        )));
    }

    match state.predictor.predict(features) {
        Ok(prediction) => HttpResponse::Ok().json(PredictResponse { prediction }),
        Err(e) => {
            error!("prediction failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("prediction failed: {}", e)))
        }
    }
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorResponse::new("endpoint not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    struct StubPredictor {
        inputs: usize,
        output: Vec<f32>,
    }

    impl Predictor for StubPredictor {
        fn input_len(&self) -> usize {
            self.inputs
        }

        fn predict(&self, _features: &[f32]) -> anyhow::Result<Vec<f32>> {
            Ok(self.output.clone())
        }
    }

    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn input_len(&self) -> usize {
            3
        }

        fn predict(&self, _features: &[f32]) -> anyhow::Result<Vec<f32>> {
            anyhow::bail!("tensor shape mismatch")
        }
    }

    fn state(predictor: Arc<dyn Predictor>) -> web::Data<AppState> {
        web::Data::new(AppState {
            predictor,
            model_path: "models/model.onnx".to_string(),
        })
    }

    #[actix_web::test]
    async fn home_returns_fixed_greeting() {
        let app = test::init_service(App::new().service(home)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "Actix + tract AI service is running");
    }

    #[actix_web::test]
    async fn predict_returns_single_sample_prediction() {
        let stub = Arc::new(StubPredictor {
            inputs: 3,
            output: vec![0.5],
        });
        let app = test::init_service(App::new().app_data(state(stub)).service(predict)).await;

        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(PredictRequest {
                features: vec![0.1, 0.2, 0.3],
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // one input sample yields exactly one prediction
        let body: PredictResponse = test::read_body_json(resp).await;
        assert_eq!(body.prediction.len(), 1);
        assert_eq!(body.prediction, vec![0.5]);
    }

    #[actix_web::test]
    async fn predict_rejects_wrong_arity_with_400() {
        let stub = Arc::new(StubPredictor {
            inputs: 3,
            output: vec![1.0],
        });
        let app = test::init_service(App::new().app_data(state(stub)).service(predict)).await;

        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(PredictRequest {
                features: vec![0.1, 0.2],
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "expected 3 features, got 2");
    }

    #[actix_web::test]
    async fn predict_rejects_missing_features_field() {
        let stub = Arc::new(StubPredictor {
            inputs: 3,
            output: vec![1.0],
        });
        let app = test::init_service(App::new().app_data(state(stub)).service(predict)).await;

        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(serde_json::json!({ "inputs": [1.0, 2.0, 3.0] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn predict_maps_model_failure_to_500() {
        let app = test::init_service(
            App::new().app_data(state(Arc::new(FailingPredictor))).service(predict),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(PredictRequest {
                features: vec![0.1, 0.2, 0.3],
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn model_info_reports_input_width() {
        let stub = Arc::new(StubPredictor {
            inputs: 7,
            output: vec![],
        });
        let app = test::init_service(App::new().app_data(state(stub)).service(model_info)).await;

        let req = test::TestRequest::get().uri("/model-info").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["inputs"], 7);
        assert_eq!(body["model_path"], "models/model.onnx");
    }

    #[actix_web::test]
    async fn unknown_route_returns_404_json() {
        let app =
            test::init_service(App::new().default_service(web::route().to(not_found))).await;

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "endpoint not found");
    }
}
