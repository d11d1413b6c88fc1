//! HTTP handlers for the invention service.

pub mod app;
pub mod health;
pub mod invention;
pub mod metrics;

pub use app::index;
pub use health::{health_check, readiness_check};
pub use invention::get_invention_date;
pub use metrics::metrics_endpoint;
