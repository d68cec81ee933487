//! REST API controllers.

pub mod author_controller;
pub mod health_controller;
pub mod music_controller;

pub use health_controller::HealthResponse;
