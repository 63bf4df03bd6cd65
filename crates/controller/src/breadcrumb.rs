//! Navigation breadcrumb trail maintained from `NavigationChanged` events.

use serde::{Deserialize, Serialize};
use shared::protocol::NavigationItem;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    pub name: String,
    pub href: String,
}

impl BreadcrumbEntry {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }

    /// An entry stays on the trail while its href is a prefix of the
    /// current path. An empty href never matches.
    fn matches(&self, current_path: &str) -> bool {
        !self.href.is_empty() && current_path.starts_with(self.href.as_str())
    }
}

/// Computes the trail to display after `notification` arrived while the
/// location was `current_path`.
///
/// `None` clears the trail. Otherwise every entry whose href does not match
/// the current path adds one to a removal count, that many entries are
/// popped from the end of the trail, and the notification is appended
/// unless its name was already present before popping.
pub fn reconcile(
    trail: &[BreadcrumbEntry],
    notification: Option<&NavigationItem>,
    current_path: &str,
) -> Vec<BreadcrumbEntry> {
    let Some(item) = notification else {
        return Vec::new();
    };

    let contains_name = trail.iter().any(|entry| entry.name == item.name);
    let remove = trail
        .iter()
        .filter(|entry| !entry.matches(current_path))
        .count();

    let mut next = trail[..trail.len().saturating_sub(remove)].to_vec();
    if !contains_name {
        next.push(BreadcrumbEntry::new(item.name.clone(), current_path));
    }
    trace!(
        name = item.name.as_str(),
        current_path,
        removed = remove.min(trail.len()),
        len = next.len(),
        "reconciled breadcrumbs"
    );
    next
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    entries: Vec<BreadcrumbEntry>,
}

impl BreadcrumbTrail {
    pub fn apply(&mut self, notification: Option<&NavigationItem>, current_path: &str) {
        self.entries = reconcile(&self.entries, notification, current_path);
    }

    pub fn entries(&self) -> &[BreadcrumbEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/breadcrumb_tests.rs"]
mod tests;
