//! Client for the internal policy answering service.
//!
//! Public surface:
//! - [`services::answer_service::AnswerService`]: `POST /ask` plus document
//!   lookup and feedback
//! - [`backend::AnswerBackend`]: the seam the ask session drives
//! - [`health_service::HealthService`]: `GET /healthz` probe
//! - [`config`]: env-driven [`config::service_config::AnswerServiceConfig`]
//! - [`telemetry`]: tracing layers shared by the binary

pub mod backend;
pub mod error_handler;
pub mod health_service;
pub mod models;
pub mod telemetry;

pub mod config {
    pub mod default_config;
    pub mod service_config;
}

pub mod services {
    pub mod answer_service;
}

pub use backend::AnswerBackend;
pub use error_handler::{AnswerError, Result};
pub use models::{Answer, Citation, Confidence, DocList, DocumentInfo, Feedback};
