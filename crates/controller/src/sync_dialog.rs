use std::sync::Arc;

use client_core::RoundtripApi;
use shared::domain::{RoundtripId, SyncMode};
use tracing::debug;

use crate::{
    bus::NotificationBus,
    dialog::{Dialog, DialogHandle},
    error::SyncError,
    sync_workflow::{SyncSession, SyncStatus},
};

/// Sync dialog of the roundtrip details view. Opening it starts a fresh
/// [`SyncSession`]; closing it discards the session.
#[derive(Debug)]
pub struct SyncDialogController<D: DialogHandle = Dialog> {
    dialog: D,
    session: Option<Arc<SyncSession>>,
}

impl Default for SyncDialogController<Dialog> {
    fn default() -> Self {
        Self::new(Dialog::default())
    }
}

impl<D: DialogHandle> SyncDialogController<D> {
    /// The dialog must stay up while a synchronization is running, so it
    /// is never auto-closable.
    pub fn new(mut dialog: D) -> Self {
        dialog.set_auto_closable(false);
        Self {
            dialog,
            session: None,
        }
    }

    pub fn open(&mut self, roundtrip_id: RoundtripId, mode: SyncMode) -> Arc<SyncSession> {
        let session = Arc::new(SyncSession::new(roundtrip_id, mode));
        self.session = Some(Arc::clone(&session));
        self.dialog.open();
        debug!(roundtrip_id = roundtrip_id.0, mode = mode.as_query_value(), "sync dialog opened");
        session
    }

    pub fn cancel(&mut self) {
        self.dialog.close();
        self.session = None;
    }

    pub async fn perform_sync<A>(
        &self,
        api: &A,
        bus: &NotificationBus,
    ) -> Result<SyncStatus, SyncError>
    where
        A: RoundtripApi + ?Sized,
    {
        let session = self.session.as_ref().ok_or(SyncError::NoActiveSession)?;
        session.perform_sync(api, bus).await
    }

    pub fn session(&self) -> Option<&Arc<SyncSession>> {
        self.session.as_ref()
    }

    pub fn status(&self) -> Option<SyncStatus> {
        self.session.as_ref().map(|session| session.status())
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }
}
