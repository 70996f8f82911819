//! mindcheck
//!
//! Core library for the community mental-health screening service. Collects
//! self-reported screening answers (a five point stress scale, the 2Q plus
//! depression screener, and the 8Q suicide-risk screener), classifies risk,
//! persists the result through a storage seam, and pushes alerts to LINE
//! channels when risk crosses the configured threshold.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
