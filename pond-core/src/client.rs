//! HTTP client for the pond suitability prediction endpoint.

use crate::error::PredictionError;
use crate::parameters::PondParameters;
use crate::prediction::PredictionResult;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Pull the `error` string out of an error response body, if there is one.
fn message_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn status_message(status: StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}

fn non_empty_or_fallback(message: String) -> PredictionError {
    if message.trim().is_empty() {
        PredictionError::fallback()
    } else {
        PredictionError::new(message)
    }
}

#[derive(Clone, Default)]
pub struct PredictionClient {
    client: Client,
}

impl PredictionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// POST the request as JSON and decode the verdict.
    ///
    /// One attempt only. Non-2xx responses take their message from the
    /// body's `error` field when present, otherwise from the status line.
    /// A 2xx body that is not a verdict but carries `error` is reported the
    /// same way.
    pub async fn submit(
        &self,
        request: &PondParameters,
        endpoint_url: &str,
    ) -> Result<PredictionResult, PredictionError> {
        let url = endpoint_url.trim();
        if url.is_empty() {
            return Err(PredictionError::new("Prediction endpoint URL is empty"));
        }
        info!("Requesting pond prediction from {}", url);

        let response = match self.client.post(url).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Prediction request to {} failed: {}", url, e);
                return Err(non_empty_or_fallback(e.to_string()));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read prediction response body: {}", e);
                if status.is_success() {
                    return Err(non_empty_or_fallback(e.to_string()));
                }
                return Err(PredictionError::new(status_message(status)));
            }
        };

        if !status.is_success() {
            let message = message_from_body(&body).unwrap_or_else(|| status_message(status));
            warn!("Prediction endpoint returned {}: {}", status, message);
            return Err(PredictionError::new(message));
        }

        PredictionResult::from_json(&body).map_err(|e| {
            warn!("Prediction response did not decode: {}", e);
            match message_from_body(&body) {
                Some(message) => PredictionError::new(message),
                None => PredictionError::new(format!("Invalid prediction response: {}", e)),
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::parameters::ParameterForm;
    use crate::prediction::SuitabilityLabel;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    /// Serve `router` on an ephemeral local port and return its `/predict` URL.
    pub(crate) async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/predict", addr)
    }

    pub(crate) fn good_response() -> Value {
        json!({
            "pond_suitability_label": "Good",
            "pond_suitability_score": 78.5,
            "growth_rate": 1.2,
            "survival_rate": 85.0,
            "yield": 4500,
            "fcr": 1.6
        })
    }

    #[tokio::test]
    async fn posts_numeric_json_and_decodes_result() {
        let router = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["pond_area"], json!(1.2));
                assert_eq!(body["ph"], json!(7.8));
                assert_eq!(body.as_object().unwrap().len(), 11);
                Json(good_response())
            }),
        );
        let url = serve(router).await;
        let request = ParameterForm::new().build_request().unwrap();

        let result = PredictionClient::new()
            .submit(&request, &format!("  {}  ", url))
            .await
            .unwrap();
        assert_eq!(result.pond_suitability_label, SuitabilityLabel::Good);
        assert_eq!(result.yield_kg_per_ha, 4500.0);
    }

    #[tokio::test]
    async fn error_field_becomes_message() {
        let router = Router::new().route(
            "/predict",
            post(|| async {
                (
                    AxumStatus::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "model unavailable"})),
                )
            }),
        );
        let url = serve(router).await;
        let request = ParameterForm::new().build_request().unwrap();

        let err = PredictionClient::new().submit(&request, &url).await.unwrap_err();
        assert_eq!(err, PredictionError::new("model unavailable"));
    }

    #[tokio::test]
    async fn status_line_used_without_error_field() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "busy") }),
        );
        let url = serve(router).await;
        let request = ParameterForm::new().build_request().unwrap();

        let err = PredictionClient::new().submit(&request, &url).await.unwrap_err();
        assert_eq!(err.message, "Request failed with status code 503");
    }

    #[tokio::test]
    async fn incomplete_success_body_fails_closed() {
        let router = Router::new().route(
            "/predict",
            post(|| async { Json(json!({"pond_suitability_label": "Good"})) }),
        );
        let url = serve(router).await;
        let request = ParameterForm::new().build_request().unwrap();

        let err = PredictionClient::new().submit(&request, &url).await.unwrap_err();
        assert!(err.message.starts_with("Invalid prediction response"));
    }

    #[tokio::test]
    async fn error_payload_with_success_status_is_reported() {
        let router = Router::new().route(
            "/predict",
            post(|| async { Json(json!({"error": "salinity out of model range"})) }),
        );
        let url = serve(router).await;
        let request = ParameterForm::new().build_request().unwrap();

        let err = PredictionClient::new().submit(&request, &url).await.unwrap_err();
        assert_eq!(err, PredictionError::new("salinity out of model range"));
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let request = ParameterForm::new().build_request().unwrap();

        let err = PredictionClient::new()
            .submit(&request, &format!("http://{}/predict", addr))
            .await
            .unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn blank_url_is_rejected_without_a_call() {
        let request = ParameterForm::new().build_request().unwrap();
        let err = PredictionClient::new().submit(&request, "   ").await.unwrap_err();
        assert_eq!(err.message, "Prediction endpoint URL is empty");
    }

    #[test]
    fn error_body_parsing() {
        assert_eq!(
            message_from_body(br#"{"error":"bad input"}"#).as_deref(),
            Some("bad input")
        );
        assert_eq!(message_from_body(br#"{"error":""}"#), None);
        assert_eq!(message_from_body(br#"{"error":42}"#), None);
        assert_eq!(message_from_body(b"<html>"), None);
    }
}
