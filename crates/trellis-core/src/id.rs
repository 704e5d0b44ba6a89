//! Identifiers for widgets and host sessions.
//!
//! Widgets live in an arena and refer to each other only through these
//! handles. A handle never owns anything: once the widget it names is
//! removed, every lookup through the stale handle fails instead of reaching
//! some other widget.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for a widget in a widget tree.
    ///
    /// `WidgetId`s are stable handles that remain valid while the tree changes
    /// around them. They become invalid when the widget is removed.
    pub struct WidgetId;
}

impl WidgetId {
    /// Convert the id to a raw u64 value, for logging and interop.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a `WidgetId` from a raw u64 value.
    ///
    /// This does not check that the widget exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Identifies one host session (one GUI screen and its widget tree).
///
/// Every widget that went through validation remembers the handle of the
/// host that validated it; host-bound operations check this before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostHandle(u64);

static NEXT_HOST: AtomicU64 = AtomicU64::new(1);

impl HostHandle {
    /// Allocate a fresh, process-unique handle.
    pub fn next() -> Self {
        Self(NEXT_HOST.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host#{}", self.0)
    }
}
