//! Application shell: current user and the breadcrumb trail.

use client_core::RoundtripApi;
use shared::{domain::User, protocol::AppEvent};
use tracing::{debug, warn};

use crate::{
    breadcrumb::{BreadcrumbEntry, BreadcrumbTrail},
    bus::NotificationBus,
    location::LocationProvider,
};

#[derive(Debug, Default)]
pub struct ShellController {
    current_user: Option<User>,
    breadcrumbs: BreadcrumbTrail,
}

impl ShellController {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load_current_user<A>(&mut self, api: &A)
    where
        A: RoundtripApi + ?Sized,
    {
        match api.current_user().await {
            Ok(user) => self.current_user = Some(user),
            Err(err) => warn!("failed to load current user: {err}"),
        }
    }

    pub fn handle(&mut self, event: &AppEvent, location: &dyn LocationProvider) {
        match event {
            AppEvent::UserChanged(user) => self.current_user = user.clone(),
            AppEvent::NavigationChanged(item) => {
                let path = location.current_path();
                self.breadcrumbs.apply(item.as_ref(), &path);
                debug!(path = path.as_str(), crumbs = self.breadcrumbs.len(), "breadcrumbs updated");
            }
            _ => {}
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn breadcrumbs(&self) -> &[BreadcrumbEntry] {
        self.breadcrumbs.entries()
    }
}

/// Entering the home view leaves every breadcrumb area.
pub fn announce_home(bus: &NotificationBus) {
    bus.publish(AppEvent::NavigationChanged(None));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        location::{Location, Navigator},
        test_support::FakeApi,
    };
    use shared::protocol::NavigationItem;

    #[tokio::test]
    async fn loads_current_user_and_follows_user_changes() {
        let mut shell = ShellController::new();
        shell.load_current_user(&FakeApi::default()).await;
        assert_eq!(shell.current_user().map(|u| u.name.as_str()), Some("walter"));

        shell.handle(&AppEvent::UserChanged(None), &Location::default());
        assert!(shell.current_user().is_none());
    }

    #[tokio::test]
    async fn failed_user_load_keeps_anonymous() {
        let api = FakeApi {
            user: None,
            ..FakeApi::default()
        };
        let mut shell = ShellController::new();
        shell.load_current_user(&api).await;
        assert!(shell.current_user().is_none());
    }

    #[test]
    fn navigation_events_drive_breadcrumbs_from_current_location() {
        let bus = NotificationBus::default();
        let mut events = bus.subscribe();
        let location = Location::new("/roundtrip/1");
        let mut shell = ShellController::new();

        bus.publish(AppEvent::NavigationChanged(Some(NavigationItem::new(
            "Invoice",
        ))));
        shell.handle(&events.try_recv().expect("event"), &location);
        assert_eq!(
            shell.breadcrumbs(),
            &[BreadcrumbEntry::new("Invoice", "/roundtrip/1")]
        );

        location.navigate("/");
        announce_home(&bus);
        shell.handle(&events.try_recv().expect("event"), &location);
        assert!(shell.breadcrumbs().is_empty());
    }
}
