//! Hand-written `RoundtripApi` fake shared by the controller tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use client_core::{RequestFailure, RoundtripApi};
use shared::domain::{Roundtrip, RoundtripId, SyncMode, User};
use tokio::sync::Notify;

pub fn roundtrip(id: i64, name: &str) -> Roundtrip {
    Roundtrip {
        id: RoundtripId(id),
        name: name.to_string(),
        last_sync: None,
        left_hand_side: None,
        right_hand_side: None,
    }
}

pub fn server_error() -> RequestFailure {
    RequestFailure::Status {
        status: 500,
        body: "boom".to_string(),
    }
}

pub struct FakeApi {
    pub user: Option<User>,
    pub roundtrips: Vec<Roundtrip>,
    pub details_failure: Option<RequestFailure>,
    pub sync_failure: Option<RequestFailure>,
    pub sync_gate: Option<Arc<Notify>>,
    pub save_failure: Option<RequestFailure>,
    pub name_check_gate: Option<Arc<Notify>>,
    pub taken_names: Vec<String>,
    pub name_check_fails: bool,
    pub modeler_names: Vec<String>,
    pub modeler_names_failure: Option<RequestFailure>,
    pub sync_calls: AtomicUsize,
    pub name_checks: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<Roundtrip>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            user: Some(User {
                name: "walter".to_string(),
            }),
            roundtrips: vec![roundtrip(1, "Invoice"), roundtrip(2, "Order")],
            details_failure: None,
            sync_failure: None,
            sync_gate: None,
            save_failure: None,
            name_check_gate: None,
            taken_names: vec!["Invoice".to_string()],
            name_check_fails: false,
            modeler_names: Vec::new(),
            modeler_names_failure: None,
            sync_calls: AtomicUsize::new(0),
            name_checks: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn failing_sync() -> Self {
        Self {
            sync_failure: Some(server_error()),
            ..Self::default()
        }
    }

    pub fn gated_sync(gate: Arc<Notify>) -> Self {
        Self {
            sync_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn sync_call_count(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    pub fn checked_names(&self) -> Vec<String> {
        self.name_checks.lock().expect("name checks").clone()
    }
}

#[async_trait]
impl RoundtripApi for FakeApi {
    async fn current_user(&self) -> Result<User, RequestFailure> {
        self.user.clone().ok_or(RequestFailure::Status {
            status: 401,
            body: String::new(),
        })
    }

    async fn list_roundtrips(&self) -> Result<Vec<Roundtrip>, RequestFailure> {
        Ok(self.roundtrips.clone())
    }

    async fn roundtrip_details(&self, id: RoundtripId) -> Result<Roundtrip, RequestFailure> {
        if let Some(err) = &self.details_failure {
            return Err(err.clone());
        }
        self.roundtrips
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(RequestFailure::Status {
                status: 404,
                body: String::new(),
            })
    }

    async fn create_roundtrip(&self, name: &str) -> Result<Roundtrip, RequestFailure> {
        Ok(roundtrip(42, name))
    }

    async fn save_roundtrip(&self, roundtrip: &Roundtrip) -> Result<Roundtrip, RequestFailure> {
        if let Some(err) = &self.save_failure {
            return Err(err.clone());
        }
        self.saved.lock().expect("saved").push(roundtrip.clone());
        Ok(roundtrip.clone())
    }

    async fn sync_roundtrip(
        &self,
        id: RoundtripId,
        _mode: SyncMode,
    ) -> Result<Roundtrip, RequestFailure> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.sync_gate {
            gate.notified().await;
        }
        if let Some(err) = &self.sync_failure {
            return Err(err.clone());
        }
        let mut synced = roundtrip(id.0, "Invoice");
        synced.last_sync = Some("2024-01-01T00:00:00Z".parse().expect("timestamp"));
        Ok(synced)
    }

    async fn is_name_valid(&self, name: &str) -> Result<bool, RequestFailure> {
        self.name_checks
            .lock()
            .expect("name checks")
            .push(name.to_string());
        if let Some(gate) = &self.name_check_gate {
            gate.notified().await;
        }
        if self.name_check_fails {
            return Err(server_error());
        }
        Ok(!self.taken_names.iter().any(|taken| taken == name))
    }

    async fn modeler_names(&self) -> Result<Vec<String>, RequestFailure> {
        if let Some(err) = &self.modeler_names_failure {
            return Err(err.clone());
        }
        Ok(self.modeler_names.clone())
    }
}
