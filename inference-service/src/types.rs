use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PredictRequest {
    pub features: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictResponse {
    pub prediction: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub inputs: usize,
    pub model_path: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_request_deserializes_features() {
        let req: PredictRequest = serde_json::from_str(r#"{"features": [0.1, 0.5, 1.0]}"#).unwrap();
        assert_eq!(req.features, vec![0.1, 0.5, 1.0]);
    }

    #[test]
    fn predict_request_rejects_missing_features() {
        let res = serde_json::from_str::<PredictRequest>(r#"{"inputs": [1.0]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn predict_response_round_trips() {
        let out = PredictResponse {
            prediction: vec![0.25, 0.75],
        };
        let json = serde_json::to_string(&out).unwrap();
        let back: PredictResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
    }

    #[test]
    fn error_response_serializes_message() {
        let json = serde_json::to_string(&ErrorResponse::new("bad input")).unwrap();
        assert_eq!(json, r#"{"error":"bad input"}"#);
    }
}
