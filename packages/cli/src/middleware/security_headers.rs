// ABOUTME: Tower layer that stamps security headers onto every response
// ABOUTME: Pages get a script-free policy that keeps form posts on this origin; everything else gets a deny-all policy

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::config::Config;

/// Server-rendered pages: inline styles, no scripts, forms post back to this origin only
const PAGE_POLICY: &str = "default-src 'self'; \
                           script-src 'none'; \
                           style-src 'self' 'unsafe-inline'; \
                           img-src 'self' data:; \
                           object-src 'none'; \
                           base-uri 'self'; \
                           frame-ancestors 'none'; \
                           form-action 'self'";

/// JSON bodies and redirects are never rendered as documents
const NON_PAGE_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";

const HSTS: &str = "max-age=31536000; includeSubDomains";

/// Headers chosen once at startup and shared by every response
#[derive(Debug)]
struct HeaderPolicy {
    common: HeaderMap,
}

impl HeaderPolicy {
    fn new(enable_hsts: bool) -> Self {
        let mut common = HeaderMap::new();
        common.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        common.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        // Every link and form target lives on this site
        common.insert(header::REFERRER_POLICY, HeaderValue::from_static("same-origin"));
        common.insert(
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("geolocation=(), microphone=(), camera=(), payment=()"),
        );

        if enable_hsts {
            common.insert(
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS),
            );
        }

        Self { common }
    }

    fn apply(&self, headers: &mut HeaderMap) {
        let policy = if is_page(headers) {
            PAGE_POLICY
        } else {
            NON_PAGE_POLICY
        };

        for (name, value) in &self.common {
            headers.insert(name, value.clone());
        }
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(policy),
        );
        headers.remove(header::SERVER);
    }
}

fn is_page(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

#[derive(Clone)]
pub struct SecurityHeadersLayer {
    policy: Arc<HeaderPolicy>,
}

impl SecurityHeadersLayer {
    /// HSTS should only be enabled behind a TLS terminator
    pub fn new(enable_hsts: bool) -> Self {
        Self {
            policy: Arc::new(HeaderPolicy::new(enable_hsts)),
        }
    }

    /// Layer for the configured server, or `None` when security headers are switched off
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .security_headers_enabled
            .then(|| Self::new(config.enable_hsts))
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, service: S) -> Self::Service {
        SecurityHeadersService {
            service,
            policy: Arc::clone(&self.policy),
        }
    }
}

#[derive(Clone)]
pub struct SecurityHeadersService<S> {
    service: S,
    policy: Arc<HeaderPolicy>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SecurityHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = SecurityHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        SecurityHeadersFuture {
            future: self.service.call(request),
            policy: Arc::clone(&self.policy),
        }
    }
}

#[pin_project::pin_project]
pub struct SecurityHeadersFuture<F> {
    #[pin]
    future: F,
    policy: Arc<HeaderPolicy>,
}

impl<F, ResBody, E> std::future::Future for SecurityHeadersFuture<F>
where
    F: std::future::Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = std::task::ready!(this.future.poll(cx))?;

        this.policy.apply(response.headers_mut());

        Poll::Ready(Ok(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::{Html, Json, Redirect},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn test_router(layer: SecurityHeadersLayer) -> Router {
        Router::new()
            .route("/page", get(|| async { Html("<p>Toppings</p>") }))
            .route(
                "/json",
                get(|| async { Json(serde_json::json!({ "success": true })) }),
            )
            .route("/moved", get(|| async { Redirect::to("/page") }))
            .layer(layer)
    }

    async fn headers_for(layer: SecurityHeadersLayer, uri: &str) -> HeaderMap {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = test_router(layer).oneshot(request).await.unwrap();
        assert_ne!(response.status(), StatusCode::NOT_FOUND);
        response.headers().clone()
    }

    fn csp(headers: &HeaderMap) -> &str {
        headers
            .get(header::CONTENT_SECURITY_POLICY)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_pages_get_the_page_policy() {
        let headers = headers_for(SecurityHeadersLayer::new(false), "/page").await;

        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("referrer-policy").unwrap(), "same-origin");
        assert!(headers.get("permissions-policy").is_some());
        assert!(headers.get("server").is_none());
        assert!(headers.get("strict-transport-security").is_none());

        let policy = csp(&headers);
        assert!(policy.contains("script-src 'none'"));
        assert!(policy.contains("form-action 'self'"));
    }

    #[tokio::test]
    async fn test_json_and_redirects_get_the_deny_all_policy() {
        for uri in ["/json", "/moved"] {
            let headers = headers_for(SecurityHeadersLayer::new(false), uri).await;

            assert_eq!(csp(&headers), NON_PAGE_POLICY);
            assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        }
    }

    #[tokio::test]
    async fn test_hsts_header_when_enabled() {
        let headers = headers_for(SecurityHeadersLayer::new(true), "/page").await;

        let hsts = headers
            .get("strict-transport-security")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(hsts.contains("max-age=31536000"));
    }

    #[test]
    fn test_is_page() {
        let mut headers = HeaderMap::new();
        assert!(!is_page(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        assert!(is_page(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        assert!(!is_page(&headers));
    }
}
