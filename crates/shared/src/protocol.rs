//! Typed payloads carried by the application's notification bus.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Roundtrip, Side, User},
    error::ApiError,
};

/// A navigation waypoint announced by a view when it becomes active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
}

impl NavigationItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AppEvent {
    /// `None` signals that the user left the breadcrumb area.
    NavigationChanged(Option<NavigationItem>),
    RoundtripChanged(Roundtrip),
    RoundtripAdded(Roundtrip),
    UserChanged(Option<User>),
    ModelImageClicked(Side),
    ComponentError(ApiError),
}

impl AppEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::NavigationChanged(_) => "navigation_changed",
            AppEvent::RoundtripChanged(_) => "roundtrip_changed",
            AppEvent::RoundtripAdded(_) => "roundtrip_added",
            AppEvent::UserChanged(_) => "user_changed",
            AppEvent::ModelImageClicked(_) => "model_image_clicked",
            AppEvent::ComponentError(_) => "component_error",
        }
    }
}
