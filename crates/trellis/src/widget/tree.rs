//! The widget tree arena.
//!
//! All widgets of a session live in one [`WidgetTree`]. Each arena node holds
//! the boxed widget, its parent id, its ordered child ids and the host handle
//! assigned at validation. Ids are weak: once a widget is removed, every
//! lookup through its old [`WidgetId`] returns `None`, and a new widget never
//! reuses a live id.
//!
//! While one of a widget's methods runs (event handler, layout hook), the
//! widget is checked out of its slot and the rest of the tree stays
//! reachable through a context object. Calling back into the checked-out
//! widget fails with `InvalidState` rather than aliasing it.

use std::any::Any;

use slotmap::SlotMap;
use trellis_core::logging::targets;
use trellis_core::{HostHandle, Point, Rect, TrellisError, TrellisResult, WidgetId};

use super::events::{EventResult, WidgetEvent};
use super::focus::FocusManager;
use super::traits::{Panel, Placement, Widget};

/// A request from a widget to the host session, applied after the current
/// handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostRequest {
    /// Move focus to a widget.
    RequestFocus(WidgetId),
    /// Drop focus if the widget holds it.
    ReleaseFocus(WidgetId),
    /// Cycle focus forward (`true`) or backward.
    CycleFocus(bool),
    /// Run a panel's layout again.
    Relayout(WidgetId),
}

/// One arena entry.
struct Node {
    /// `None` while the widget is checked out.
    widget: Option<Box<dyn Widget>>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    host: Option<HostHandle>,
    type_name: &'static str,
    /// Whether `on_attached` has run.
    attached: bool,
}

/// The arena owning every widget of one session.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    pending: Vec<HostRequest>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert a detached widget: no parent, no host.
    pub fn insert<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.insert_boxed(Box::new(widget))
    }

    /// Insert an already boxed detached widget.
    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        self.insert_node(widget, None)
    }

    fn insert_node(&mut self, widget: Box<dyn Widget>, parent: Option<WidgetId>) -> WidgetId {
        let type_name = widget.type_name();
        let id = self.nodes.insert(Node {
            widget: Some(widget),
            parent,
            children: Vec::new(),
            host: None,
            type_name,
            attached: false,
        });
        tracing::trace!(target: targets::TREE, ?id, ?parent, type_name, "inserted widget");
        id
    }

    /// Attach a new widget to a panel.
    ///
    /// The panel's [`place_child`](Panel::place_child) policy positions the
    /// widget (and sizes it if it is resizable), the panel grows to fit it,
    /// and, if the widget is itself a panel, its
    /// [`on_attached`](Panel::on_attached) hook runs.
    ///
    /// Fails with `InvalidState` if `parent` is unknown and with
    /// `InvalidArgument` if it is not a panel or rejects the placement.
    pub fn add<W: Widget>(
        &mut self,
        parent: WidgetId,
        widget: W,
        placement: Placement,
    ) -> TrellisResult<WidgetId> {
        self.add_boxed(parent, Box::new(widget), placement)
    }

    /// [`add`](Self::add) for an already boxed widget.
    pub fn add_boxed(
        &mut self,
        parent: WidgetId,
        mut widget: Box<dyn Widget>,
        placement: Placement,
    ) -> TrellisResult<WidgetId> {
        let child_count = self.node(parent)?.children.len();
        let index = self.with_panel(parent, |panel| {
            panel.place_child(widget.as_mut(), placement)?;
            let insets = panel.insets();
            panel.expand_to_fit(widget.bounds(), insets);
            Ok(panel.insertion_index(child_count).min(child_count))
        })??;

        let id = self.insert_node(widget, Some(parent));
        self.node_mut(parent)?.children.insert(index, id);
        if let Err(err) = self.attach(id) {
            self.unlink(parent, id);
            return Err(err);
        }
        self.with_panel(parent, |panel| panel.child_added(id))?;
        tracing::debug!(target: targets::TREE, ?id, ?parent, index, "added child");
        Ok(id)
    }

    /// Attach a widget to `parent` without consulting its placement policy.
    ///
    /// Used by composite panels for the internal children they create in
    /// [`on_attached`](Panel::on_attached). The child is appended.
    fn add_internal(&mut self, parent: WidgetId, widget: Box<dyn Widget>) -> TrellisResult<WidgetId> {
        self.node(parent)?;
        let id = self.insert_node(widget, Some(parent));
        self.node_mut(parent)?.children.push(id);
        self.attach(id)?;
        Ok(id)
    }

    /// Run the `on_attached` hook of a panel, once.
    ///
    /// Children added through [`add`](Self::add) are attached immediately;
    /// a detached widget from [`insert`](Self::insert) is attached when it is
    /// first validated.
    pub(crate) fn attach(&mut self, id: WidgetId) -> TrellisResult<()> {
        let node = self.node_mut(id)?;
        if node.attached {
            return Ok(());
        }
        node.attached = true;
        if self.is_panel(id) {
            let result = self.with_panel_cx(id, |panel, cx| panel.on_attached(cx))?;
            if result.is_err() {
                self.node_mut(id)?.attached = false;
            }
            return result;
        }
        Ok(())
    }

    /// Drop a child whose attachment failed, together with any internal
    /// children its hook created.
    fn unlink(&mut self, parent: WidgetId, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&child| child != id);
        }
        for dead in self.descendants_inclusive(id) {
            self.nodes.remove(dead);
        }
    }

    /// Remove a widget and its whole subtree.
    ///
    /// The parent panel is told through [`Panel::child_removed`]. Returns
    /// the removed ids, the widget itself first.
    ///
    /// Fails with `InvalidState`, removing nothing, while the parent is
    /// checked out, since it could not be told.
    pub fn remove(&mut self, id: WidgetId) -> TrellisResult<Vec<WidgetId>> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.checked_widget(parent)?;
        }
        let removed = self.descendants_inclusive(id);
        for &dead in &removed {
            self.nodes.remove(dead);
        }
        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|&child| child != id);
            }
            self.with_panel(parent, |panel| panel.child_removed(id))?;
        }
        tracing::debug!(target: targets::TREE, ?id, count = removed.len(), "removed subtree");
        Ok(removed)
    }

    /// Check whether `id` names a live widget.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of widgets in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The parent of a widget.
    #[inline]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// The children of a widget in insertion order. Empty for unknown ids.
    #[inline]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// The host handle assigned during validation.
    #[inline]
    pub fn host_of(&self, id: WidgetId) -> Option<HostHandle> {
        self.nodes.get(id).and_then(|node| node.host)
    }

    /// The concrete type name recorded at insertion.
    #[inline]
    pub fn type_name(&self, id: WidgetId) -> Option<&'static str> {
        self.nodes.get(id).map(|node| node.type_name)
    }

    /// Check whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// `id` followed by all of its descendants in pre-order.
    pub fn descendants_inclusive(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.contains(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    // =========================================================================
    // Widget access
    // =========================================================================

    /// The widget stored under `id`, unless it is unknown or checked out.
    #[inline]
    pub fn widget(&self, id: WidgetId) -> Option<&(dyn Widget + 'static)> {
        self.nodes.get(id).and_then(|node| node.widget.as_deref())
    }

    /// Mutable access to the widget stored under `id`.
    #[inline]
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.nodes.get_mut(id).and_then(|node| node.widget.as_deref_mut())
    }

    /// The widget under `id` as its concrete type.
    pub fn get_as<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        let widget: &(dyn Any + 'static) = self.widget(id)?;
        widget.downcast_ref::<T>()
    }

    /// The widget under `id` as its mutable concrete type.
    pub fn get_as_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let widget: &mut (dyn Any + 'static) = self.widget_mut(id)?;
        widget.downcast_mut::<T>()
    }

    /// Check whether the widget under `id` is a panel.
    #[inline]
    pub fn is_panel(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|widget| widget.as_panel().is_some())
    }

    /// Position relative to the root's parent space: the sum of local
    /// positions along the parent chain. Recomputed on every call.
    pub fn absolute_position(&self, id: WidgetId) -> TrellisResult<Point> {
        let mut position = Point::ZERO;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let widget = self.checked_widget(node_id)?;
            position = position.offset(widget.x(), widget.y());
            current = self.parent(node_id);
        }
        Ok(position)
    }

    /// The bounding box of a widget in the root's parent space.
    pub fn absolute_bounds(&self, id: WidgetId) -> TrellisResult<Rect> {
        let origin = self.absolute_position(id)?;
        let size = self.checked_widget(id)?.widget_base().size();
        Ok(Rect::from_origin_size(origin, size))
    }

    fn node(&self, id: WidgetId) -> TrellisResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| TrellisError::invalid_state(format!("unknown widget {id:?}")))
    }

    fn node_mut(&mut self, id: WidgetId) -> TrellisResult<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TrellisError::invalid_state(format!("unknown widget {id:?}")))
    }

    fn checked_widget(&self, id: WidgetId) -> TrellisResult<&dyn Widget> {
        self.node(id)?
            .widget
            .as_deref()
            .ok_or_else(|| in_use(id))
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    fn checkout(&mut self, id: WidgetId) -> TrellisResult<Box<dyn Widget>> {
        self.node_mut(id)?.widget.take().ok_or_else(|| in_use(id))
    }

    /// Put a checked-out widget back. If its node was removed in the
    /// meantime the widget is dropped.
    fn checkin(&mut self, id: WidgetId, widget: Box<dyn Widget>) {
        match self.nodes.get_mut(id) {
            Some(node) => node.widget = Some(widget),
            None => {
                tracing::trace!(target: targets::TREE, ?id, "dropping widget removed while in use");
            }
        }
    }

    /// Run `f` on a widget while it is checked out, with the rest of the
    /// tree available.
    pub fn with_widget<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> TrellisResult<R> {
        let mut widget = self.checkout(id)?;
        let result = f(widget.as_mut(), self);
        self.checkin(id, widget);
        Ok(result)
    }

    fn with_panel<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Panel) -> R,
    ) -> TrellisResult<R> {
        self.with_panel_cx(id, |panel, _| f(panel))
    }

    fn with_panel_cx<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Panel, &mut LayoutContext<'_>) -> R,
    ) -> TrellisResult<R> {
        self.with_widget(id, |widget, tree| {
            let Some(panel) = widget.as_panel_mut() else {
                return Err(TrellisError::invalid_argument(format!(
                    "widget {id:?} is not a panel"
                )));
            };
            let mut cx = LayoutContext { tree, id };
            Ok(f(panel, &mut cx))
        })?
    }

    // =========================================================================
    // Validation & layout
    // =========================================================================

    /// Validate a subtree for a host session.
    ///
    /// Stores `host` on the widget; for a panel, runs
    /// [`Panel::validate`], then [`Panel::layout`], then validates every
    /// child in order.
    #[tracing::instrument(level = "debug", target = "trellis::tree", skip(self))]
    pub fn validate(&mut self, id: WidgetId, host: HostHandle) -> TrellisResult<()> {
        self.node_mut(id)?.host = Some(host);
        self.attach(id)?;
        if self.is_panel(id) {
            self.with_panel_cx(id, |panel, cx| panel.validate(cx))??;
            self.layout(id)?;
        }
        for child in self.children(id).to_vec() {
            self.validate(child, host)?;
        }
        Ok(())
    }

    /// Run a panel's layout. Leaf widgets have nothing to arrange.
    #[tracing::instrument(level = "trace", target = "trellis::layout", skip(self))]
    pub fn layout(&mut self, id: WidgetId) -> TrellisResult<()> {
        if self.checked_widget(id)?.as_panel().is_none() {
            return Ok(());
        }
        self.with_panel_cx(id, |panel, cx| panel.layout(cx))?
    }

    // =========================================================================
    // Hit-testing
    // =========================================================================

    /// Resolve a point in `id`'s local space to the most specific widget
    /// under it.
    ///
    /// A leaf returns itself. A panel returns the last visible child whose
    /// [`is_within_bounds`](Widget::is_within_bounds) contains the point,
    /// asking that child again in its own coordinates; if no child matches,
    /// the panel itself. Pure and side-effect free.
    pub fn hit(&self, id: WidgetId, x: i32, y: i32) -> WidgetId {
        if !self.is_panel(id) {
            return id;
        }
        for &child_id in self.children(id).iter().rev() {
            let Some(child) = self.widget(child_id) else {
                continue;
            };
            if !child.is_visible() {
                continue;
            }
            let (local_x, local_y) = (x - child.x(), y - child.y());
            if child.is_within_bounds(local_x, local_y) {
                return self.hit(child_id, local_x, local_y);
            }
        }
        id
    }

    // =========================================================================
    // Focus cycling
    // =========================================================================

    /// Find the next focus candidate under `root`, starting from `focused`.
    ///
    /// With nothing focused the search starts at the edge of `root`. With a
    /// focused panel its own children are tried first; then the search
    /// bubbles up through the parents, resuming after (forward) or before
    /// (backward) the previous pivot. Reaching `root` wraps around once.
    pub fn next_focus(
        &self,
        root: WidgetId,
        focused: Option<WidgetId>,
        forward: bool,
    ) -> Option<WidgetId> {
        let current = focused.filter(|&id| self.contains(id) && self.is_ancestor_or_self(root, id));
        let Some(current) = current else {
            return self.focus_candidate(root, None, forward);
        };

        if self.is_panel(current) {
            if let Some(found) = self.cycle_within(current, None, focused, forward) {
                return Some(found);
            }
        }

        let mut pivot = current;
        while pivot != root {
            let Some(parent) = self.parent(pivot) else {
                break;
            };
            if let Some(found) = self.cycle_within(parent, Some(pivot), focused, forward) {
                return Some(found);
            }
            pivot = parent;
        }

        self.focus_candidate(root, focused, forward)
    }

    /// Whether `id` (or something inside it, for a panel) can take focus.
    fn focus_candidate(
        &self,
        id: WidgetId,
        focused: Option<WidgetId>,
        forward: bool,
    ) -> Option<WidgetId> {
        let widget = self.widget(id)?;
        if !widget.is_visible() {
            return None;
        }
        if widget.as_panel().is_some() {
            return self.cycle_within(id, None, focused, forward);
        }
        (widget.can_focus() && focused != Some(id)).then_some(id)
    }

    /// Search a panel's children after (or before) `pivot`, or from the
    /// edge when there is no pivot.
    fn cycle_within(
        &self,
        panel: WidgetId,
        pivot: Option<WidgetId>,
        focused: Option<WidgetId>,
        forward: bool,
    ) -> Option<WidgetId> {
        let children = self.children(panel);
        let start = pivot.and_then(|pivot| children.iter().position(|&child| child == pivot));
        if forward {
            let from = start.map_or(0, |index| index + 1);
            children[from..]
                .iter()
                .find_map(|&child| self.focus_candidate(child, focused, forward))
        } else {
            let to = start.unwrap_or(children.len());
            children[..to]
                .iter()
                .rev()
                .find_map(|&child| self.focus_candidate(child, focused, forward))
        }
    }

    // =========================================================================
    // Events & ticking
    // =========================================================================

    /// Deliver an event to one widget, without bubbling.
    pub fn send_event(
        &mut self,
        focus: &FocusManager,
        id: WidgetId,
        event: &WidgetEvent,
    ) -> TrellisResult<EventResult> {
        tracing::trace!(target: targets::INPUT, ?id, %event, "delivering event");
        self.with_widget(id, |widget, tree| {
            let mut cx = EventContext { tree, focus, id };
            widget.event(event, &mut cx)
        })
    }

    /// Deliver a pointer event to `start`, retrying on each ancestor until
    /// one handles it.
    ///
    /// `position` is in the root's parent space and is re-based into every
    /// receiver's local space.
    pub fn bubble_event(
        &mut self,
        focus: &FocusManager,
        start: WidgetId,
        position: Point,
        event: &WidgetEvent,
    ) -> TrellisResult<EventResult> {
        let mut current = Some(start);
        while let Some(id) = current {
            let origin = self.absolute_position(id)?;
            let local = event.at(position.x - origin.x, position.y - origin.y);
            if self.send_event(focus, id, &local)?.is_handled() {
                return Ok(EventResult::Handled);
            }
            if !event.should_bubble() {
                break;
            }
            current = self.parent(id);
        }
        Ok(EventResult::Ignored)
    }

    /// Run the per-frame hook on `id` and its whole subtree.
    pub fn tick(&mut self, id: WidgetId) -> TrellisResult<()> {
        self.with_widget(id, |widget, _| widget.tick())?;
        for child in self.children(id).to_vec() {
            self.tick(child)?;
        }
        Ok(())
    }

    // =========================================================================
    // Host requests
    // =========================================================================

    /// Queue a request for the host session.
    pub fn push_request(&mut self, request: HostRequest) {
        self.pending.push(request);
    }

    /// Take every queued request.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Check whether requests are waiting.
    #[inline]
    pub fn has_pending_requests(&self) -> bool {
        !self.pending.is_empty()
    }
}

fn in_use(id: WidgetId) -> TrellisError {
    TrellisError::invalid_state(format!("widget {id:?} is already in use"))
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("widgets", &self.nodes.len())
            .field("pending", &self.pending)
            .finish()
    }
}

/// Tree access handed to a panel's layout hooks.
///
/// The panel itself is checked out; its children and the rest of the tree
/// are reachable through this context.
pub struct LayoutContext<'a> {
    tree: &'a mut WidgetTree,
    id: WidgetId,
}

impl LayoutContext<'_> {
    /// The id of the panel being laid out.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The panel's children, in order.
    pub fn children(&self) -> Vec<WidgetId> {
        self.tree.children(self.id).to_vec()
    }

    /// A widget of the tree.
    #[inline]
    pub fn child(&self, id: WidgetId) -> Option<&(dyn Widget + 'static)> {
        self.tree.widget(id)
    }

    /// A mutable widget of the tree.
    #[inline]
    pub fn child_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.tree.widget_mut(id)
    }

    /// A widget as its concrete type.
    #[inline]
    pub fn get_as<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.tree.get_as(id)
    }

    /// A widget as its mutable concrete type.
    #[inline]
    pub fn get_as_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.tree.get_as_mut(id)
    }

    /// A child's bounding box in the panel's space.
    #[inline]
    pub fn child_bounds(&self, id: WidgetId) -> Option<Rect> {
        self.tree.widget(id).map(|widget| widget.bounds())
    }

    /// Run a child's layout if it is a panel.
    pub fn layout_child(&mut self, id: WidgetId) -> TrellisResult<()> {
        self.tree.layout(id)
    }

    /// Create an internal child of this panel, appended after the existing
    /// children and positioned by the caller.
    pub fn add_internal<W: Widget>(&mut self, widget: W) -> TrellisResult<WidgetId> {
        self.tree.add_internal(self.id, Box::new(widget))
    }

    /// The whole tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// The whole tree, mutably.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }
}

/// Tree and session access handed to [`Widget::event`].
///
/// Focus changes are not applied directly: they are queued as
/// [`HostRequest`]s and carried out by the host once the handler returns.
pub struct EventContext<'a> {
    tree: &'a mut WidgetTree,
    focus: &'a FocusManager,
    id: WidgetId,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(tree: &'a mut WidgetTree, focus: &'a FocusManager, id: WidgetId) -> Self {
        Self { tree, focus, id }
    }

    /// The widget receiving the event.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The receiving widget's parent.
    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.tree.parent(self.id)
    }

    /// Check whether the receiving widget holds focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focus.is_focused(self.id)
    }

    /// The focused widget of the session.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    /// Ask the host to focus the receiving widget.
    pub fn request_focus(&mut self) {
        self.tree.push_request(HostRequest::RequestFocus(self.id));
    }

    /// Ask the host to drop focus from the receiving widget.
    pub fn release_focus(&mut self) {
        self.tree.push_request(HostRequest::ReleaseFocus(self.id));
    }

    /// Ask the host to cycle focus.
    pub fn cycle_focus(&mut self, forward: bool) {
        self.tree.push_request(HostRequest::CycleFocus(forward));
    }

    /// Ask the host to lay out a panel again.
    pub fn request_layout(&mut self, panel: WidgetId) {
        self.tree.push_request(HostRequest::Relayout(panel));
    }

    /// Deliver an event to another widget, without bubbling.
    pub fn send_event(&mut self, target: WidgetId, event: &WidgetEvent) -> TrellisResult<EventResult> {
        self.tree.send_event(self.focus, target, event)
    }

    /// The whole tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// The whole tree, mutably.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }
}
