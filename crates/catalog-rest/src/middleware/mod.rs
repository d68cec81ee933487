//! HTTP middleware.

mod logging;
mod request_path;

pub use logging::logging_middleware;
pub use request_path::{current_request_path, request_path_middleware};
