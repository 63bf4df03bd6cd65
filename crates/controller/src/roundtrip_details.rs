//! Roundtrip details view: the loaded roundtrip, which diagram picture is
//! shown, the diagram editor dialog and the sync dialog.

use std::sync::Arc;

use client_core::{RequestFailure, RoundtripApi};
use shared::{
    domain::{BpmnDiagram, Roundtrip, RoundtripId, Side, SyncMode},
    protocol::AppEvent,
};
use tracing::{info, warn};

use crate::{
    dialog::{Dialog, DialogHandle},
    edit_diagram::EditDiagramController,
    error::FormError,
    location::Navigator,
    sync_dialog::SyncDialogController,
    sync_workflow::SyncSession,
};

#[derive(Debug)]
pub struct RoundtripDetailsController {
    roundtrip: Option<Roundtrip>,
    current_picture: Side,
    sync_mode: Option<SyncMode>,
    edit_diagram_dialog: Dialog,
    sync_dialog: SyncDialogController,
}

impl Default for RoundtripDetailsController {
    fn default() -> Self {
        Self {
            roundtrip: None,
            current_picture: Side::LeftHandSide,
            sync_mode: None,
            edit_diagram_dialog: Dialog::default(),
            sync_dialog: SyncDialogController::default(),
        }
    }
}

impl RoundtripDetailsController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the roundtrip; an invalid id (HTTP 400) sends the user home.
    /// Whatever was shown before is dropped, even when the load fails.
    pub async fn load<A>(
        &mut self,
        api: &A,
        id: RoundtripId,
        location: &dyn Navigator,
    ) -> Result<(), RequestFailure>
    where
        A: RoundtripApi + ?Sized,
    {
        self.roundtrip = None;
        match api.roundtrip_details(id).await {
            Ok(roundtrip) => {
                self.roundtrip = Some(roundtrip);
                Ok(())
            }
            Err(err) => {
                if err.is_bad_request() {
                    info!(roundtrip_id = id.0, "invalid roundtrip id, redirecting home");
                    location.navigate("/");
                } else {
                    warn!(roundtrip_id = id.0, "failed to load roundtrip: {err}");
                }
                Err(err)
            }
        }
    }

    pub fn open_sync_dialog(&mut self, mode: SyncMode) -> Result<Arc<SyncSession>, FormError> {
        let id = self.roundtrip.as_ref().ok_or(FormError::NotLoaded)?.id;
        self.sync_mode = Some(mode);
        Ok(self.sync_dialog.open(id, mode))
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::RoundtripChanged(roundtrip) => self.roundtrip = Some(roundtrip.clone()),
            AppEvent::ModelImageClicked(side) => self.set_current_picture(*side),
            _ => {}
        }
    }

    /// Opens the diagram dialog with an editor for `side`, prefilled with
    /// the diagram already assigned there.
    pub fn add_diagram(&mut self, side: Side) -> EditDiagramController {
        self.edit_diagram_dialog.open();
        EditDiagramController::new(side, self.diagram(side))
    }

    pub fn cancel_add_diagram(&mut self) {
        self.edit_diagram_dialog.close();
    }

    /// Assigns `diagram` to `side` and persists the roundtrip. The diagram
    /// dialog closes only once the backend accepted the roundtrip.
    pub async fn save_diagram<A>(
        &mut self,
        api: &A,
        side: Side,
        diagram: BpmnDiagram,
    ) -> Result<(), FormError>
    where
        A: RoundtripApi + ?Sized,
    {
        let roundtrip = self.roundtrip.as_mut().ok_or(FormError::NotLoaded)?;
        roundtrip.set_diagram(side, diagram);
        let saved = api.save_roundtrip(roundtrip).await?;
        self.roundtrip = Some(saved);
        self.edit_diagram_dialog.close();
        Ok(())
    }

    pub fn set_current_picture(&mut self, side: Side) {
        self.current_picture = side;
    }

    pub fn current_picture(&self) -> Side {
        self.current_picture
    }

    pub fn roundtrip(&self) -> Option<&Roundtrip> {
        self.roundtrip.as_ref()
    }

    pub fn diagram(&self, side: Side) -> Option<&BpmnDiagram> {
        self.roundtrip.as_ref().and_then(|r| r.diagram(side))
    }

    pub fn sync_mode(&self) -> Option<SyncMode> {
        self.sync_mode
    }

    pub fn edit_diagram_dialog(&self) -> &Dialog {
        &self.edit_diagram_dialog
    }

    pub fn sync_dialog(&self) -> &SyncDialogController {
        &self.sync_dialog
    }

    pub fn sync_dialog_mut(&mut self) -> &mut SyncDialogController {
        &mut self.sync_dialog
    }
}

#[cfg(test)]
#[path = "tests/roundtrip_details_tests.rs"]
mod tests;
