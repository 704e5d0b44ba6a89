//! Focus management for widget trees.
//!
//! [`FocusManager`] tracks which single widget of a session holds keyboard
//! focus and moves focus through the request/release/cycle protocol. It is
//! owned by the [`Host`](crate::Host); widgets never touch it directly but
//! queue requests through their [`EventContext`](super::EventContext).
//!
//! # Focus Change Events
//!
//! When focus moves from `a` to `b`:
//! 1. focus is cleared and `a` receives [`WidgetEvent::FocusLost`]
//! 2. `b` becomes the focus holder and receives [`WidgetEvent::FocusGained`]
//!
//! Notifications are delivered directly (no bubbling), so gains and losses
//! are always paired.
//!
//! # Cycling
//!
//! There is no precomputed tab order. [`cycle_focus`](FocusManager::cycle_focus)
//! walks the tree from the current holder, see
//! [`WidgetTree::next_focus`](super::WidgetTree::next_focus).

use trellis_core::logging::targets;
use trellis_core::{TrellisError, TrellisResult, WidgetId};

use super::events::WidgetEvent;
use super::tree::WidgetTree;

/// Manages keyboard focus for one widget tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FocusManager {
    /// The currently focused widget, if any.
    focused: Option<WidgetId>,
}

impl FocusManager {
    /// Create a focus manager with nothing focused.
    pub fn new() -> Self {
        Self { focused: None }
    }

    /// Get the currently focused widget.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Check if a specific widget has focus. Identity comparison by id.
    #[inline]
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }

    /// Give focus to `id`.
    ///
    /// - already focused: no-op
    /// - unknown widget: `InvalidState`
    /// - widget not yet validated by a host: logged no-op
    /// - widget that cannot take focus: logged no-op
    ///
    /// Otherwise the previous holder receives `FocusLost`, then `id`
    /// receives `FocusGained`. Returns whether focus moved.
    pub fn request_focus(&mut self, tree: &mut WidgetTree, id: WidgetId) -> TrellisResult<bool> {
        if self.is_focused(id) {
            return Ok(false);
        }
        let Some(widget) = tree.widget(id) else {
            return Err(TrellisError::invalid_state(format!(
                "cannot focus unknown or busy widget {id:?}"
            )));
        };
        if tree.host_of(id).is_none() {
            tracing::warn!(target: targets::FOCUS, ?id, "focus requested before the widget was validated by a host");
            return Ok(false);
        }
        if !widget.can_focus() {
            tracing::warn!(target: targets::FOCUS, ?id, "focus requested on a widget that cannot take focus");
            return Ok(false);
        }

        if let Some(old) = self.focused.take() {
            self.notify(tree, old, WidgetEvent::FocusLost)?;
        }
        self.focused = Some(id);
        tracing::debug!(target: targets::FOCUS, ?id, "focus gained");
        self.notify(tree, id, WidgetEvent::FocusGained)?;
        Ok(true)
    }

    /// Drop focus from `id`. No-op unless `id` holds focus.
    pub fn release_focus(&mut self, tree: &mut WidgetTree, id: WidgetId) -> TrellisResult<bool> {
        if !self.is_focused(id) {
            return Ok(false);
        }
        self.focused = None;
        tracing::debug!(target: targets::FOCUS, ?id, "focus released");
        self.notify(tree, id, WidgetEvent::FocusLost)?;
        Ok(true)
    }

    /// Clear focus, whoever holds it.
    pub fn clear(&mut self, tree: &mut WidgetTree) -> TrellisResult<()> {
        if let Some(id) = self.focused {
            self.release_focus(tree, id)?;
        }
        Ok(())
    }

    /// Move focus to the next (or previous) candidate under `root`.
    ///
    /// Returns the newly focused widget, or `None` when no other widget can
    /// take focus.
    pub fn cycle_focus(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        forward: bool,
    ) -> TrellisResult<Option<WidgetId>> {
        let Some(next) = tree.next_focus(root, self.focused, forward) else {
            tracing::trace!(target: targets::FOCUS, forward, "no focus candidate");
            return Ok(None);
        };
        Ok(self.request_focus(tree, next)?.then_some(next))
    }

    /// Forget a holder that no longer exists, without notifying anyone.
    pub(crate) fn forget_stale(&mut self, tree: &WidgetTree) {
        if self.focused.is_some_and(|id| !tree.contains(id)) {
            self.focused = None;
        }
    }

    fn notify(&self, tree: &mut WidgetTree, id: WidgetId, event: WidgetEvent) -> TrellisResult<()> {
        if !tree.contains(id) {
            return Ok(());
        }
        tree.send_event(self, id, &event)?;
        Ok(())
    }
}
