//! The host session.
//!
//! A [`Host`] owns one widget tree together with the state that belongs to
//! the session rather than to any widget: the root panel, the focus pointer
//! and the per-session flags (dark mode, fullscreen, title). The embedding
//! application creates a host per screen, builds the tree, calls
//! [`validate`](Host::validate) once, then [`paint`](Host::paint) and
//! [`tick`](Host::tick) every frame while feeding input through an
//! [`InputDispatcher`](crate::widget::InputDispatcher).

use trellis_core::logging::targets;
use trellis_core::{HorizontalAlignment, HostHandle, PerfSpan, TrellisError, TrellisResult, WidgetId};
use trellis_render::Renderer;

use crate::config::HostConfig;
use crate::widget::layout::{GridPanel, PlainPanel};
use crate::widget::{
    BackgroundPainter, EventContext, EventResult, FocusManager, HostRequest, PaintContext,
    Placement, TreeDebug, TreeFormatOptions, Widget, WidgetEvent, WidgetTree,
};

/// Request rounds applied per flush before the rest is dropped.
const MAX_FLUSH_ROUNDS: usize = 64;

/// One GUI session: a widget tree, its root, focus and session flags.
pub struct Host {
    handle: HostHandle,
    tree: WidgetTree,
    focus: FocusManager,
    root: Option<WidgetId>,
    config: HostConfig,
}

impl Host {
    /// Create a host with an empty tree.
    pub fn new(config: HostConfig) -> Self {
        let handle = HostHandle::next();
        tracing::debug!(target: targets::HOST, %handle, "host created");
        Self {
            handle,
            tree: WidgetTree::new(),
            focus: FocusManager::new(),
            root: None,
            config,
        }
    }

    /// This session's handle.
    #[inline]
    pub fn handle(&self) -> HostHandle {
        self.handle
    }

    /// The session configuration.
    #[inline]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The widget tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably.
    ///
    /// Requests queued by direct tree calls are applied on the next
    /// host operation that flushes.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub(crate) fn split_mut(&mut self) -> (&mut WidgetTree, &FocusManager) {
        (&mut self.tree, &self.focus)
    }

    // =========================================================================
    // Tree construction
    // =========================================================================

    /// The root panel.
    #[inline]
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Make an existing panel the root.
    ///
    /// Fails with `InvalidState` for an unknown widget and with
    /// `InvalidArgument` if it is not a panel.
    pub fn set_root(&mut self, id: WidgetId) -> TrellisResult<()> {
        let Some(widget) = self.tree.widget(id) else {
            return Err(TrellisError::invalid_state(format!("unknown widget {id:?}")));
        };
        if widget.as_panel().is_none() {
            return Err(TrellisError::invalid_argument(format!(
                "root widget {id:?} is not a panel"
            )));
        }
        self.root = Some(id);
        Ok(())
    }

    /// Insert a panel and make it the root.
    pub fn create_root<W: Widget>(&mut self, panel: W) -> TrellisResult<WidgetId> {
        let id = self.tree.insert(panel);
        self.tree.attach(id)?;
        self.set_root(id)?;
        Ok(id)
    }

    /// A plain panel padded with the configured root insets and the standard
    /// background.
    pub fn root_panel(&self) -> PlainPanel {
        PlainPanel::new()
            .with_insets(self.config.root_insets)
            .with_background(BackgroundPainter::PANEL)
    }

    /// A grid panel using the configured cell size and root insets.
    pub fn root_grid(&self) -> TrellisResult<GridPanel> {
        Ok(GridPanel::with_cell_size(self.config.grid_cell_size)?
            .with_insets(self.config.root_insets)
            .with_background(BackgroundPainter::PANEL))
    }

    /// Attach a widget to a panel of this host's tree.
    ///
    /// When the parent has already been validated, the new widget is
    /// validated for this session and the parent and each of its ancestors
    /// are laid out again, innermost first.
    pub fn add<W: Widget>(
        &mut self,
        parent: WidgetId,
        widget: W,
        placement: Placement,
    ) -> TrellisResult<WidgetId> {
        let id = self.tree.add(parent, widget, placement)?;
        if let Some(host) = self.tree.host_of(parent) {
            self.tree.validate(id, host)?;
            let mut panel = Some(parent);
            while let Some(current) = panel {
                self.tree.layout(current)?;
                panel = self.tree.parent(current);
            }
        }
        self.flush()?;
        Ok(id)
    }

    /// Remove a widget and its subtree, releasing focus held inside it.
    pub fn remove(&mut self, id: WidgetId) -> TrellisResult<()> {
        if let Some(focused) = self.focus.focused() {
            if self.tree.is_ancestor_or_self(id, focused) {
                self.focus.release_focus(&mut self.tree, focused)?;
            }
        }
        self.tree.remove(id)?;
        self.focus.forget_stale(&self.tree);
        if self.root == Some(id) {
            self.root = None;
        }
        self.flush()
    }

    // =========================================================================
    // Frame lifecycle
    // =========================================================================

    /// Assign this host to every widget of the tree and lay it out.
    ///
    /// Fails with `InvalidState` when there is no root; layout errors
    /// propagate unchanged.
    pub fn validate(&mut self) -> TrellisResult<()> {
        let root = self.require_root()?;
        tracing::debug!(target: targets::HOST, handle = %self.handle, "validating tree");
        self.tree.validate(root, self.handle)?;
        if tracing::enabled!(target: targets::TREE, tracing::Level::TRACE) {
            let dump = TreeDebug::new().format_subtree(&self.tree, root)?;
            tracing::trace!(target: targets::TREE, "validated tree:\n{dump}");
        }
        self.flush()
    }

    /// A text dump of the tree under the root, one widget per line.
    ///
    /// Fails with `InvalidState` when there is no root.
    pub fn dump_tree(&self, options: TreeFormatOptions) -> TrellisResult<String> {
        let root = self.require_root()?;
        TreeDebug::with_options(options).format_subtree(&self.tree, root)
    }

    /// Paint the tree with the root at its own position.
    ///
    /// `mouse_x`/`mouse_y` are in the root's parent space.
    pub fn paint(&self, renderer: &mut dyn Renderer, mouse_x: i32, mouse_y: i32) {
        let Some(root) = self.root else {
            tracing::warn!(target: targets::HOST, "paint called on a host without a root panel");
            return;
        };
        let Some(widget) = self.tree.widget(root) else {
            return;
        };
        let _span = PerfSpan::new("frame");
        let (x, y) = (widget.x(), widget.y());
        let mut ctx = PaintContext::new(renderer)
            .with_dark_mode(self.config.dark_mode)
            .with_focused(self.focus.focused());
        self.tree.paint(root, &mut ctx, x, y, mouse_x - x, mouse_y - y);
    }

    /// Run every widget's per-frame hook.
    pub fn tick(&mut self) -> TrellisResult<()> {
        if let Some(root) = self.root {
            self.tree.tick(root)?;
        }
        self.flush()
    }

    /// Run `f` with an event context for `id`, then apply the requests it
    /// queued.
    pub fn with_context<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut EventContext<'_>) -> R,
    ) -> TrellisResult<R> {
        if !self.tree.contains(id) {
            return Err(TrellisError::invalid_state(format!("unknown widget {id:?}")));
        }
        let result = {
            let mut cx = EventContext::new(&mut self.tree, &self.focus, id);
            f(&mut cx)
        };
        self.flush()?;
        Ok(result)
    }

    /// Deliver an event to one widget without bubbling.
    ///
    /// Requests it queues are applied by the next flush.
    pub fn send_event(&mut self, id: WidgetId, event: &WidgetEvent) -> TrellisResult<EventResult> {
        self.tree.send_event(&self.focus, id, event)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The focused widget.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    /// Check whether `id` holds focus.
    #[inline]
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focus.is_focused(id)
    }

    /// Give focus to a widget. See [`FocusManager::request_focus`].
    pub fn request_focus(&mut self, id: WidgetId) -> TrellisResult<bool> {
        let moved = self.focus.request_focus(&mut self.tree, id)?;
        self.flush()?;
        Ok(moved)
    }

    /// Drop focus from a widget if it holds it.
    pub fn release_focus(&mut self, id: WidgetId) -> TrellisResult<bool> {
        let released = self.focus.release_focus(&mut self.tree, id)?;
        self.flush()?;
        Ok(released)
    }

    /// Move focus to the next (or previous) candidate of the tree.
    pub fn cycle_focus(&mut self, forward: bool) -> TrellisResult<Option<WidgetId>> {
        let root = self.require_root()?;
        let next = self.focus.cycle_focus(&mut self.tree, root, forward)?;
        self.flush()?;
        Ok(next)
    }

    // =========================================================================
    // Session flags
    // =========================================================================

    /// Check whether the dark variant is painted.
    #[inline]
    pub fn is_dark_mode(&self) -> bool {
        self.config.dark_mode
    }

    /// Switch between the light and dark variants.
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.config.dark_mode = dark_mode;
    }

    /// Check whether the screen covers the whole window.
    #[inline]
    pub fn is_fullscreen(&self) -> bool {
        self.config.fullscreen
    }

    /// Set the fullscreen flag.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.config.fullscreen = fullscreen;
    }

    /// The screen title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Set the screen title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
    }

    /// Horizontal placement of the title.
    #[inline]
    pub fn title_alignment(&self) -> HorizontalAlignment {
        self.config.title_alignment
    }

    /// Set the title placement.
    pub fn set_title_alignment(&mut self, alignment: HorizontalAlignment) {
        self.config.title_alignment = alignment;
    }

    /// Check whether the title is drawn.
    #[inline]
    pub fn is_title_visible(&self) -> bool {
        self.config.title_visible
    }

    /// Show or hide the title.
    pub fn set_title_visible(&mut self, visible: bool) {
        self.config.title_visible = visible;
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Apply the requests widgets queued during the last operation.
    ///
    /// Applying a request can queue new ones (a focus change notifies
    /// handlers); those are applied in further rounds, up to a fixed bound.
    pub fn flush(&mut self) -> TrellisResult<()> {
        for _ in 0..MAX_FLUSH_ROUNDS {
            let requests = self.tree.take_requests();
            if requests.is_empty() {
                return Ok(());
            }
            for request in requests {
                self.apply(request)?;
            }
        }
        let dropped = self.tree.take_requests();
        tracing::warn!(
            target: targets::HOST,
            dropped = dropped.len(),
            "host requests kept re-queueing; dropping the rest"
        );
        Ok(())
    }

    fn apply(&mut self, request: HostRequest) -> TrellisResult<()> {
        tracing::trace!(target: targets::HOST, ?request, "applying request");
        match request {
            HostRequest::RequestFocus(id) => {
                self.focus.request_focus(&mut self.tree, id)?;
            }
            HostRequest::ReleaseFocus(id) => {
                self.focus.release_focus(&mut self.tree, id)?;
            }
            HostRequest::CycleFocus(forward) => {
                if let Some(root) = self.root {
                    self.focus.cycle_focus(&mut self.tree, root, forward)?;
                }
            }
            HostRequest::Relayout(id) => {
                if self.tree.contains(id) {
                    self.tree.layout(id)?;
                }
            }
        }
        Ok(())
    }

    fn require_root(&self) -> TrellisResult<WidgetId> {
        self.root
            .ok_or_else(|| TrellisError::invalid_state("host has no root panel"))
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("handle", &self.handle)
            .field("root", &self.root)
            .field("focused", &self.focus.focused())
            .field("widgets", &self.tree.len())
            .finish()
    }
}
