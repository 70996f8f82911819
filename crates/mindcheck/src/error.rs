use crate::config::ConfigError;
use crate::screening::assessment::AssessmentError;
use crate::telemetry::TelemetryError;

/// Application-boundary error for startup and server wiring. Domain errors
/// never reach this type: the submission pipeline aggregates its partial
/// failures into the report instead of raising them.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("screening error: {0}")]
    Screening(#[from] AssessmentError),
}
