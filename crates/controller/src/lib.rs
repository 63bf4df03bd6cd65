//! View controllers for roundtrip management: explicit state structs driven
//! by notification bus events and backend calls.

pub mod breadcrumb;
pub mod bus;
pub mod debounce;
pub mod dialog;
pub mod edit_diagram;
pub mod error;
pub mod location;
pub mod new_roundtrip;
pub mod roundtrip_details;
pub mod roundtrip_list;
pub mod shell;
pub mod sync_dialog;
pub mod sync_workflow;

pub use breadcrumb::{reconcile, BreadcrumbEntry, BreadcrumbTrail};
pub use bus::NotificationBus;
pub use debounce::Debouncer;
pub use dialog::{Dialog, DialogHandle};
pub use error::{FormError, SyncError};
pub use location::{Location, LocationProvider, Navigator};
pub use sync_workflow::{SyncSession, SyncStatus};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
