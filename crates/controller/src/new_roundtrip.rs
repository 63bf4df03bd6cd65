//! "Create roundtrip" dialog with debounced backend name validation.

use std::{sync::Arc, time::Duration};

use client_core::{RequestFailure, RoundtripApi};
use shared::{domain::Roundtrip, protocol::AppEvent};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    bus::NotificationBus,
    debounce::Debouncer,
    dialog::{Dialog, DialogHandle},
    error::FormError,
    location::Navigator,
};

pub const DEFAULT_NAME_CHECK_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCheck {
    pub name: String,
    /// Set once the backend answered for the current name.
    pub checked: bool,
    /// The "unused" validity of the name input.
    pub unused: bool,
}

impl Default for NameCheck {
    fn default() -> Self {
        Self {
            name: String::new(),
            checked: false,
            unused: true,
        }
    }
}

/// An empty name is accepted without asking the backend.
pub async fn check_name<A>(api: &A, name: &str) -> Result<bool, RequestFailure>
where
    A: RoundtripApi + ?Sized,
{
    if name.is_empty() {
        return Ok(true);
    }
    api.is_name_valid(name).await
}

/// CSS class of a form control: flagged only once edited and invalid.
pub fn error_class(valid: bool, dirty: bool) -> &'static str {
    if valid || !dirty {
        ""
    } else {
        "error"
    }
}

pub struct NewRoundtripController {
    state: Arc<watch::Sender<NameCheck>>,
    checker: Debouncer<String>,
    form_valid: bool,
    dialog: Dialog,
}

impl NewRoundtripController {
    pub fn new(api: Arc<dyn RoundtripApi>, delay: Duration) -> Self {
        let (state, _) = watch::channel(NameCheck::default());
        let state = Arc::new(state);
        let checker = {
            let state = Arc::clone(&state);
            Debouncer::new(delay, move |name: String| {
                let api = Arc::clone(&api);
                let state = Arc::clone(&state);
                async move { apply_name_check(api.as_ref(), &state, name).await }
            })
        };
        Self {
            state,
            checker,
            form_valid: false,
            dialog: Dialog::default(),
        }
    }

    /// Records an edit of the name input and schedules its validation.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|check| {
            check.name = name.clone();
            check.checked = false;
            check.unused = true;
        });
        self.checker.call(name);
    }

    /// Validity of the remaining form fields, as reported by the view.
    pub fn set_form_valid(&mut self, valid: bool) {
        self.form_valid = valid;
    }

    pub fn name_check(&self) -> NameCheck {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NameCheck> {
        self.state.subscribe()
    }

    pub fn is_valid(&self) -> bool {
        let check = self.state.borrow();
        self.form_valid && check.checked && check.unused
    }

    pub fn open(&mut self) {
        self.dialog.open();
    }

    pub fn cancel(&mut self) {
        self.checker.cancel();
        self.dialog.close();
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Creates the roundtrip, closes the dialog, moves to the new roundtrip
    /// and announces it on the bus.
    pub async fn save<A>(
        &mut self,
        api: &A,
        location: &dyn Navigator,
        bus: &NotificationBus,
    ) -> Result<Roundtrip, FormError>
    where
        A: RoundtripApi + ?Sized,
    {
        if !self.is_valid() {
            return Err(FormError::NotValid);
        }
        let name = self.state.borrow().name.clone();
        let roundtrip = api.create_roundtrip(&name).await?;

        self.dialog.close();
        location.navigate(&format!("/roundtrip/{}", roundtrip.id));
        bus.publish(AppEvent::RoundtripAdded(roundtrip.clone()));
        info!(roundtrip_id = roundtrip.id.0, "new roundtrip saved");
        Ok(roundtrip)
    }
}

async fn apply_name_check(api: &dyn RoundtripApi, state: &watch::Sender<NameCheck>, name: String) {
    match check_name(api, &name).await {
        Ok(unused) => {
            let applied = state.send_if_modified(|check| {
                if check.name != name {
                    return false;
                }
                check.checked = true;
                check.unused = unused;
                true
            });
            debug!(name = name.as_str(), unused, applied, "name check settled");
        }
        Err(err) => warn!(name = name.as_str(), "name check failed: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/new_roundtrip_tests.rs"]
mod tests;
