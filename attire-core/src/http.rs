//! HTTP surface: `GET /v1/weather?location=<name>`.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{AttireError, AttireRecommendation, AttireService};

/// First `location` value of the query string; later repeats are ignored.
fn first_location(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(key, _)| key == "location")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Builds the application router around `service`.
pub fn router(service: AttireService) -> Router {
    Router::new()
        .route("/v1/weather", get(get_weather))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn get_weather(
    State(service): State<AttireService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<AttireRecommendation>, AttireError> {
    let Query(params) =
        query.map_err(|rejection| AttireError::BadRequest(rejection.body_text()))?;
    let location = first_location(params);
    tracing::info!(location = %location, "received request");

    let recommendation = service.recommend(&location).await?;
    Ok(Json(recommendation))
}

// Error details stay in the logs; clients only see the status code.
impl IntoResponse for AttireError {
    fn into_response(self) -> Response {
        let status = match &self {
            AttireError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AttireError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::debug!(error = %self, %status, "request failed");
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LookupError, WeatherObservation, WeatherProvider};
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, header},
    };
    use serde_json::{Value, json};
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt; // for oneshot

    #[derive(Debug, Default)]
    struct StubWeather {
        calls: AtomicUsize,
        locations: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherProvider for StubWeather {
        async fn get_weather(&self, location: &str) -> Result<WeatherObservation, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.locations.lock().unwrap().push(location.to_string());
            match location {
                "Manchester" => Ok(WeatherObservation::new("Rain", 21.0)),
                "Atlantis" => Err(LookupError::MissingData { provider: "stub" }),
                _ => Ok(WeatherObservation::new("Clear", 10.0)),
            }
        }
    }

    fn app() -> (Router, Arc<StubWeather>) {
        let stub = Arc::new(StubWeather::default());
        (router(AttireService::new(stub.clone())), stub)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn returns_recommendation_as_json() {
        let (app, _) = app();

        let response = get(app, "/v1/weather?location=Manchester").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            body,
            json!({
                "Jacket": { "Waterproof": true, "Windproof": false },
                "Pants": "shorts",
                "Umbrella": true
            })
        );
    }

    #[tokio::test]
    async fn encoded_location_reaches_the_provider() {
        let (app, _) = app();

        let response = get(app, "/v1/weather?location=Newcastle%20upon%20Tyne").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["Pants"], "trousers");
        assert_eq!(body["Umbrella"], false);
    }

    #[tokio::test]
    async fn repeated_location_uses_the_first_value() {
        let (app, stub) = app();

        let response = get(app, "/v1/weather?location=Leeds&location=York").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*stub.locations.lock().unwrap(), vec!["Leeds".to_string()]);
    }

    #[tokio::test]
    async fn repeated_location_with_empty_first_value_is_bad_request() {
        let (app, stub) = app();

        let response = get(app, "/v1/weather?location=&location=York").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(response).await.is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_percent_encoding_is_served() {
        let (app, stub) = app();

        let response = get(app, "/v1/weather?location=%ZZ").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_location_is_bad_request_with_empty_body() {
        for uri in ["/v1/weather", "/v1/weather?location=", "/v1/weather?city=Leeds"] {
            let (app, stub) = app();

            let response = get(app, uri).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri={uri}");
            assert!(body_bytes(response).await.is_empty(), "uri={uri}");
            assert_eq!(stub.calls.load(Ordering::SeqCst), 0, "uri={uri}");
        }
    }

    #[tokio::test]
    async fn lookup_failure_is_internal_error_with_empty_body() {
        let (app, stub) = app();

        let response = get(app, "/v1/weather?location=Atlantis").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_bytes(response).await.is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn only_get_is_routed() {
        let (app, _) = app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v1/weather?location=Leeds")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
