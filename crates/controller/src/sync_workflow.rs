//! Lifecycle of one roundtrip synchronization attempt.

use client_core::RoundtripApi;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{RoundtripId, SyncMode},
    protocol::AppEvent,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{bus::NotificationBus, error::SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncStatus {
    BeforeStart,
    Performing,
    Succeeded,
    Failed,
}

impl SyncStatus {
    /// A session starts from `BeforeStart`; `Failed` may be retried.
    /// `Succeeded` is terminal.
    pub fn can_start(self) -> bool {
        matches!(self, SyncStatus::BeforeStart | SyncStatus::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            SyncStatus::BeforeStart => "beforeStart",
            SyncStatus::Performing => "performSynchronize",
            SyncStatus::Succeeded => "synchronizationSuccess",
            SyncStatus::Failed => "synchronizationFailed",
        }
    }
}

/// One synchronization attempt for a roundtrip. The status is observable
/// through [`SyncSession::subscribe`] while a request is in flight.
///
/// Callers are expected to disable their triggers while the status is
/// `Performing`; a second start is rejected either way.
#[derive(Debug)]
pub struct SyncSession {
    roundtrip_id: RoundtripId,
    sync_mode: SyncMode,
    status: watch::Sender<SyncStatus>,
}

impl SyncSession {
    pub fn new(roundtrip_id: RoundtripId, sync_mode: SyncMode) -> Self {
        let (status, _) = watch::channel(SyncStatus::BeforeStart);
        Self {
            roundtrip_id,
            sync_mode,
            status,
        }
    }

    pub fn roundtrip_id(&self) -> RoundtripId {
        self.roundtrip_id
    }

    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    pub fn status(&self) -> SyncStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// Runs the remote synchronization and returns the terminal status.
    ///
    /// Request failures are not returned as errors: they leave the session
    /// in `Failed`. On success the updated roundtrip is published as
    /// `RoundtripChanged`. The in-flight request is never cancelled.
    pub async fn perform_sync<A>(
        &self,
        api: &A,
        bus: &NotificationBus,
    ) -> Result<SyncStatus, SyncError>
    where
        A: RoundtripApi + ?Sized,
    {
        let mut from = SyncStatus::BeforeStart;
        let started = self.status.send_if_modified(|status| {
            from = *status;
            if status.can_start() {
                *status = SyncStatus::Performing;
                true
            } else {
                false
            }
        });
        if !started {
            warn!(
                roundtrip_id = self.roundtrip_id.0,
                status = from.label(),
                "rejected synchronization start"
            );
            return Err(SyncError::InvalidStateTransition { from });
        }
        info!(
            roundtrip_id = self.roundtrip_id.0,
            mode = self.sync_mode.as_query_value(),
            "synchronization started"
        );

        let outcome = match api.sync_roundtrip(self.roundtrip_id, self.sync_mode).await {
            Ok(roundtrip) => {
                self.status.send_replace(SyncStatus::Succeeded);
                bus.publish(AppEvent::RoundtripChanged(roundtrip));
                info!(roundtrip_id = self.roundtrip_id.0, "synchronization succeeded");
                SyncStatus::Succeeded
            }
            Err(err) => {
                self.status.send_replace(SyncStatus::Failed);
                warn!(roundtrip_id = self.roundtrip_id.0, "synchronization failed: {err}");
                SyncStatus::Failed
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "tests/sync_workflow_tests.rs"]
mod tests;
