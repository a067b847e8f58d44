//! Security headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Middleware that adds baseline security headers to all responses.
///
/// - **Cache-Control: no-store** keeps session cookies and error bodies out
///   of shared caches.
/// - **X-Content-Type-Options: nosniff** forces browsers to respect the
///   declared Content-Type.
/// - **X-Frame-Options: DENY** prevents the endpoints from being framed.
/// - **Referrer-Policy: no-referrer** stops token-bearing URLs from leaking
///   via the Referer header.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("cache-control", HeaderValue::from_static("no-store"));
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert("referrer-policy", HeaderValue::from_static("no-referrer"));

    response
}
