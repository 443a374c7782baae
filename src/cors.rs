//! Cross-origin policy: a fixed allow-list, the preview-deployment pattern,
//! and extra origins from configuration.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use regex::Regex;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::{config::AppConfig, error::AppError};

const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "https://basava-parishath-bengaluru-website.vercel.app",
];

lazy_static! {
    static ref PREVIEW_ORIGIN_RE: Regex =
        Regex::new(r"^https://basava-parishath-bengaluru-website.*\.vercel\.app$").unwrap();
}

#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    exact: Vec<String>,
}

impl AllowedOrigins {
    pub fn from_config(config: &AppConfig) -> Self {
        let mut exact: Vec<String> = DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect();
        for origin in &config.cors_origins {
            let origin = origin.trim_end_matches('/');
            if !exact.iter().any(|o| o == origin) {
                exact.push(origin.to_string());
            }
        }
        Self { exact }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.exact.iter().any(|o| o == origin) || PREVIEW_ORIGIN_RE.is_match(origin)
    }

    pub fn cors_layer(self: &Arc<Self>) -> CorsLayer {
        let origins = Arc::clone(self);
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                origin.to_str().map(|o| origins.allows(o)).unwrap_or(false)
            }))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static("x-access-token"),
            ])
            .max_age(Duration::from_secs(60 * 60))
    }
}

/// Answers 403 for requests whose `Origin` is not on the list. Requests
/// without an `Origin` header pass through.
pub async fn reject_foreign_origin(
    State(origins): State<Arc<AllowedOrigins>>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let allowed = origin.to_str().map(|o| origins.allows(o)).unwrap_or(false);
        if !allowed {
            warn!(origin = ?origin, "blocked by CORS");
            return AppError::Forbidden("Not allowed by CORS".into()).into_response();
        }
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };

    use super::*;
    use crate::{
        config::Environment,
        testing::{test_config, TestApp, ALLOWED_ORIGIN},
    };

    fn with_origin(method: &str, uri: &str, origin: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn allow_list_and_preview_pattern() {
        let origins = AllowedOrigins::from_config(&test_config(Environment::Development));
        assert!(origins.allows("http://localhost:3000"));
        assert!(origins.allows("https://basava-parishath-bengaluru-website.vercel.app"));
        assert!(origins.allows("https://basava-parishath-bengaluru-website-git-main-team.vercel.app"));
        assert!(origins.allows("https://staging.parishath.test"));
        assert!(!origins.allows("https://evil.example.com"));
        assert!(!origins.allows("http://basava-parishath-bengaluru-website.vercel.app"));
    }

    #[tokio::test]
    async fn foreign_origin_is_forbidden() {
        let t = TestApp::new();
        let (status, _, body) = t
            .send(with_origin("GET", "/events", "https://evil.example.com"))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden");
        assert_eq!(body["message"], "Not allowed by CORS");
    }

    #[tokio::test]
    async fn allowed_origin_gets_credentials_header() {
        let t = TestApp::new();
        let (status, headers, _) = t.send(with_origin("GET", "/events", ALLOWED_ORIGIN)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ALLOWED_ORIGIN
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn preflight_from_preview_deployment() {
        let t = TestApp::new();
        let origin = "https://basava-parishath-bengaluru-website-pr-42.vercel.app";
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/contact")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = t.send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), origin);
    }

    #[tokio::test]
    async fn requests_without_origin_pass() {
        let t = TestApp::new();
        let (status, headers, _) = t
            .send(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
