//! Makes the request path available to error responses.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

tokio::task_local! {
    static REQUEST_PATH: String;
}

/// Records the request path for the duration of the request.
pub async fn request_path_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    REQUEST_PATH.scope(path, next.run(request)).await
}

/// Path of the request being handled, or an empty string outside a request.
#[must_use]
pub fn current_request_path() -> String {
    REQUEST_PATH.try_with(Clone::clone).unwrap_or_default()
}
