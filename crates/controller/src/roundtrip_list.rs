//! Sidebar list of roundtrips and the currently selected one.

use client_core::{RequestFailure, RoundtripApi};
use shared::{
    domain::{Roundtrip, RoundtripId},
    protocol::{AppEvent, NavigationItem},
};
use tracing::debug;

use crate::{
    bus::NotificationBus,
    dialog::{Dialog, DialogHandle},
};

#[derive(Debug, Default)]
pub struct RoundtripListController {
    roundtrips: Vec<Roundtrip>,
    selected: Option<RoundtripId>,
    new_roundtrip_dialog: Dialog,
}

impl RoundtripListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A>(&mut self, api: &A) -> Result<(), RequestFailure>
    where
        A: RoundtripApi + ?Sized,
    {
        self.roundtrips = api.list_roundtrips().await?;
        debug!(count = self.roundtrips.len(), "roundtrips loaded");
        Ok(())
    }

    /// Reacts to a change of the `roundtripId` route parameter. A missing or
    /// non-numeric parameter clears the selection.
    pub fn route_changed(&mut self, param: Option<&str>, bus: &NotificationBus) {
        let Some(param) = param.filter(|p| !p.is_empty()) else {
            self.selected = None;
            return;
        };
        let Ok(id) = param.trim().parse::<i64>() else {
            self.selected = None;
            return;
        };
        let id = RoundtripId(id);
        self.selected = Some(id);
        for roundtrip in self.roundtrips.iter().filter(|r| r.id == id) {
            bus.publish(AppEvent::NavigationChanged(Some(NavigationItem::new(
                roundtrip.name.clone(),
            ))));
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if let AppEvent::RoundtripAdded(roundtrip) = event {
            self.roundtrips.push(roundtrip.clone());
        }
    }

    pub fn is_active(&self, roundtrip: &Roundtrip) -> bool {
        self.selected == Some(roundtrip.id)
    }

    pub fn create_new(&mut self) {
        self.new_roundtrip_dialog.open();
    }

    pub fn new_roundtrip_dialog(&mut self) -> &mut Dialog {
        &mut self.new_roundtrip_dialog
    }

    pub fn roundtrips(&self) -> &[Roundtrip] {
        &self.roundtrips
    }

    pub fn selected(&self) -> Option<RoundtripId> {
        self.selected
    }
}
