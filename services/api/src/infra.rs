use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use mindcheck::screening::notify::webhook::WebhookVerifier;
use mindcheck::screening::{
    PushError, PushGateway, RepositoryError, ScreeningId, ScreeningRecord, ScreeningRepository,
    StoredScreening,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) webhook: Arc<dyn WebhookVerifier>,
}

/// Screening store for single-node deployments and demos. Assigns ids and
/// timestamps the way the external store would.
#[derive(Default)]
pub(crate) struct InMemoryScreeningRepository {
    rows: Mutex<Vec<StoredScreening>>,
    sequence: AtomicU64,
}

impl ScreeningRepository for InMemoryScreeningRepository {
    fn insert(&self, record: ScreeningRecord) -> Result<StoredScreening, RepositoryError> {
        let stored = StoredScreening {
            id: ScreeningId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1),
            created_at: Utc::now(),
            record,
        };
        self.rows
            .lock()
            .expect("repository mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredScreening>, RepositoryError> {
        let rows = self.rows.lock().expect("repository mutex poisoned");
        Ok(rows.iter().rev().take(limit).cloned().collect())
    }
}

/// Push gateway that records instead of delivering, for demos and tests.
#[derive(Default)]
pub(crate) struct RecordingPushGateway {
    pushes: Mutex<Vec<(String, String)>>,
}

impl RecordingPushGateway {
    pub(crate) fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().expect("push log mutex poisoned").clone()
    }
}

impl PushGateway for RecordingPushGateway {
    fn push(&self, _credential: &str, destination: &str, text: &str) -> Result<(), PushError> {
        self.pushes
            .lock()
            .expect("push log mutex poisoned")
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}
