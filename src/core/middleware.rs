use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Basic auth guard for the Swagger UI
pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let authorized = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok())
                .and_then(|value| value.strip_prefix("Basic "))
                .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
                .and_then(|decoded| String::from_utf8(decoded).ok())
                .is_some_and(|creds| creds == *credentials);

            if authorized {
                return Ok(next.run(req).await);
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn, routing::get, Router};
    use axum_test::TestServer;

    fn guarded_server() -> TestServer {
        let app = Router::new()
            .route("/api-docs/openapi.json", get(|| async { "{}" }))
            .layer(from_fn(basic_auth_middleware(Arc::new(
                "docs:secret".to_string(),
            ))));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_basic_auth_rejects_missing_credentials() {
        let server = guarded_server();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.header(header::WWW_AUTHENTICATE),
            "Basic realm=\"Swagger UI\""
        );
    }

    #[tokio::test]
    async fn test_basic_auth_checks_credentials() {
        let server = guarded_server();

        let wrong = format!("Basic {}", BASE64_STANDARD.encode("docs:guess"));
        server
            .get("/api-docs/openapi.json")
            .add_header(header::AUTHORIZATION, HeaderValue::from_str(&wrong).unwrap())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let right = format!("Basic {}", BASE64_STANDARD.encode("docs:secret"));
        server
            .get("/api-docs/openapi.json")
            .add_header(header::AUTHORIZATION, HeaderValue::from_str(&right).unwrap())
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_cors_allows_listed_origin_only() {
        let app = Router::new()
            .route("/api/v2/public/events", get(|| async { "[]" }))
            .layer(cors_layer(vec!["https://tickets.example.org".to_string()]));
        let server = TestServer::new(app).unwrap();

        let allowed = server
            .get("/api/v2/public/events")
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("https://tickets.example.org"),
            )
            .await;
        assert_eq!(
            allowed.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "https://tickets.example.org"
        );

        let other = server
            .get("/api/v2/public/events")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://evil.example"))
            .await;
        assert!(other
            .maybe_header(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
