//! Tests for the widget system.
//!
//! These exercise the tree, the panels, focus and the dispatcher together,
//! driven through a [`Host`] the way an embedding application would.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::{HostHandle, Point, Rect, TrellisError, TrellisResult, WidgetId};
use trellis_render::{Color, DrawCommand, RecordingRenderer};

use super::layout::{CardPanel, GridPanel, PlainPanel, ScrollPanel, TabPanel};
use super::traits::panel_widget_plumbing;
use super::widgets::{Button, Label, TextField};
use super::{
    BackgroundPainter, EventContext, EventResult, InputDispatcher, Key, KeyboardModifiers,
    MouseButton, Panel, Placement, Widget, WidgetBase, WidgetEvent, WidgetTree,
};
use crate::{Host, HostConfig};

type Log = Rc<RefCell<Vec<(&'static str, WidgetEvent)>>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Events `name` received, in order.
fn received(log: &Log, name: &str) -> Vec<WidgetEvent> {
    log.borrow()
        .iter()
        .filter(|(who, _)| *who == name)
        .map(|(_, event)| event.clone())
        .collect()
}

/// A leaf that records every event it receives.
struct Probe {
    base: WidgetBase,
    name: &'static str,
    log: Log,
    handles: bool,
}

impl Probe {
    fn new(name: &'static str, log: &Log, width: i32, height: i32) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(width, height).unwrap();
        Self {
            base,
            name,
            log: Rc::clone(log),
            handles: false,
        }
    }

    fn handling(mut self) -> Self {
        self.handles = true;
        self
    }

    fn focusable(mut self) -> Self {
        self.base.set_focusable(true);
        self
    }
}

impl Widget for Probe {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn event(&mut self, event: &WidgetEvent, _cx: &mut EventContext<'_>) -> EventResult {
        self.log.borrow_mut().push((self.name, event.clone()));
        EventResult::from(self.handles)
    }
}

/// A positioning panel that records every event it receives.
struct ProbePanel {
    base: WidgetBase,
    name: &'static str,
    log: Log,
    handles: bool,
}

impl ProbePanel {
    fn new(name: &'static str, log: &Log, handles: bool) -> Self {
        Self {
            base: WidgetBase::new(),
            name,
            log: Rc::clone(log),
            handles,
        }
    }
}

impl Widget for ProbePanel {
    panel_widget_plumbing!();

    fn event(&mut self, event: &WidgetEvent, _cx: &mut EventContext<'_>) -> EventResult {
        self.log.borrow_mut().push((self.name, event.clone()));
        EventResult::from(self.handles)
    }
}

impl Panel for ProbePanel {
    fn place_child(&mut self, child: &mut dyn Widget, placement: Placement) -> TrellisResult<()> {
        match placement {
            Placement::At { x, y } => {
                child.set_location(x, y);
                Ok(())
            }
            _ => Err(TrellisError::invalid_argument("probe panel only takes positions")),
        }
    }
}

fn at(x: i32, y: i32) -> Placement {
    Placement::At { x, y }
}

fn host_with_plain_root() -> (Host, WidgetId) {
    let mut host = Host::default();
    let root = host.create_root(PlainPanel::new()).unwrap();
    (host, root)
}

// =========================================================================
// Geometry & layout
// =========================================================================

#[test]
fn test_absolute_position_in_three_levels() {
    let log: Log = Rc::default();
    let mut tree = WidgetTree::new();
    let root = tree.insert(PlainPanel::new().at(5, 5));
    let mid = tree.add(root, PlainPanel::new(), at(10, 20)).unwrap();
    let leaf = tree.add(mid, Probe::new("leaf", &log, 4, 4), at(3, 4)).unwrap();

    assert_eq!(tree.absolute_position(leaf).unwrap(), Point::new(18, 29));
    assert_eq!(
        tree.absolute_bounds(leaf).unwrap(),
        Rect::new(18, 29, 4, 4).unwrap()
    );

    // Recomputed on demand after a parent moves.
    tree.widget_mut(mid).unwrap().set_location(0, 0);
    assert_eq!(tree.absolute_position(leaf).unwrap(), Point::new(8, 9));
}

#[test]
fn test_expand_to_fit_is_monotonic() {
    let log: Log = Rc::default();
    let mut tree = WidgetTree::new();
    let panel = tree.insert(PlainPanel::new());
    let child = tree.add(panel, Probe::new("c", &log, 18, 18), at(40, 10)).unwrap();

    let size = tree.widget(panel).unwrap().widget_base().size();
    assert!(size.width() >= 58 && size.height() >= 28);

    tree.add(panel, Probe::new("small", &log, 2, 2), at(0, 0)).unwrap();
    tree.remove(child).unwrap();
    tree.layout(panel).unwrap();
    let size = tree.widget(panel).unwrap().widget_base().size();
    assert_eq!((size.width(), size.height()), (58, 28));
}

#[test]
fn test_grid_scenario() {
    let mut tree = WidgetTree::new();
    let grid = tree.insert(GridPanel::new());
    let a = tree.add(grid, Label::new("A"), Placement::cell(0, 0)).unwrap();
    let b = tree
        .add(
            grid,
            Label::new("B"),
            Placement::Cell {
                column: 2,
                row: 1,
                width: 2,
                height: 1,
            },
        )
        .unwrap();
    tree.validate(grid, HostHandle::next()).unwrap();

    assert_eq!(tree.widget(a).unwrap().bounds().origin(), Point::ZERO);
    assert_eq!(tree.widget(b).unwrap().bounds(), Rect::new(36, 18, 36, 18).unwrap());
    let size = tree.widget(grid).unwrap().widget_base().size();
    assert!(size.width() >= 72 && size.height() >= 36);
}

#[test]
fn test_card_switch_scenario() {
    init_tracing();
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let panel = host.add(root, CardPanel::new(), at(0, 0)).unwrap();
    for name in ["card0", "card1", "card2"] {
        host.add(panel, Probe::new(name, &log, 10, 10), Placement::Auto).unwrap();
    }
    host.validate().unwrap();

    host.with_context(panel, |cx| CardPanel::select(cx, panel, 1))
        .unwrap()
        .unwrap();
    host.with_context(panel, |cx| CardPanel::select(cx, panel, 2))
        .unwrap()
        .unwrap();

    assert!(received(&log, "card0").is_empty());
    assert_eq!(received(&log, "card1"), vec![WidgetEvent::Shown, WidgetEvent::Hidden]);
    assert_eq!(received(&log, "card2"), vec![WidgetEvent::Shown]);

    let cards = host.tree().get_as::<CardPanel>(panel).unwrap();
    assert_eq!(cards.selected_index(), 2);
    let visible: Vec<bool> = cards
        .cards()
        .iter()
        .map(|&card| host.tree().widget(card).unwrap().is_visible())
        .collect();
    assert_eq!(visible, vec![false, false, true]);

    let out_of_range = host
        .with_context(panel, |cx| CardPanel::select(cx, panel, 3))
        .unwrap();
    assert!(out_of_range.unwrap_err().is_invalid_state());
}

#[test]
fn test_hiding_a_card_releases_focus_inside_it() {
    let (mut host, root) = host_with_plain_root();
    let panel = host.add(root, CardPanel::new(), at(0, 0)).unwrap();
    let first = host.add(panel, PlainPanel::new(), Placement::Auto).unwrap();
    let field = host.add(first, TextField::new(), at(2, 2)).unwrap();
    let second = host.add(panel, TextField::new(), Placement::Auto).unwrap();
    host.validate().unwrap();

    assert!(host.request_focus(field).unwrap());
    host.with_context(panel, |cx| CardPanel::select(cx, panel, 1))
        .unwrap()
        .unwrap();

    assert!(!host.tree().widget(first).unwrap().is_visible());
    assert_eq!(host.focused(), None);
    let mut dispatcher = InputDispatcher::new();
    let typed = dispatcher.on_char_typed(&mut host, 'x').unwrap();
    assert!(!typed.is_handled());
    assert_eq!(host.tree().get_as::<TextField>(field).unwrap().text(), "");

    // Focus in the card being shown is kept.
    assert!(host.request_focus(second).unwrap());
    host.with_context(panel, |cx| CardPanel::select(cx, panel, 1))
        .unwrap()
        .unwrap();
    assert!(host.is_focused(second));
}

#[test]
fn test_late_add_grows_every_ancestor() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let inner = host.add(root, PlainPanel::new(), at(0, 0)).unwrap();
    host.validate().unwrap();

    let late = host
        .add(inner, Probe::new("late", &log, 10, 10).handling(), at(100, 100))
        .unwrap();
    for id in [inner, root] {
        let size = host.tree().widget(id).unwrap().widget_base().size();
        assert!(size.width() >= 110 && size.height() >= 110);
    }
    assert_eq!(host.tree().host_of(late), host.tree().host_of(root));

    let mut dispatcher = InputDispatcher::new();
    dispatcher.on_mouse_down(&mut host, 105, 105, MouseButton::Left).unwrap();
    dispatcher.on_mouse_up(&mut host, 105, 105, MouseButton::Left).unwrap();
    assert_eq!(
        received(&log, "late").last(),
        Some(&WidgetEvent::Click { x: 5, y: 5, button: MouseButton::Left })
    );
}

// =========================================================================
// Hit-testing
// =========================================================================

/// Two overlapping 20x20 probes; `a` at (0,0) and `b` at (10,10).
fn overlapping(a_first: bool) -> (WidgetTree, WidgetId, WidgetId, WidgetId) {
    let log: Log = Rc::default();
    let mut tree = WidgetTree::new();
    let root = tree.insert(PlainPanel::new());
    let (a, b) = if a_first {
        let a = tree.add(root, Probe::new("a", &log, 20, 20), at(0, 0)).unwrap();
        let b = tree.add(root, Probe::new("b", &log, 20, 20), at(10, 10)).unwrap();
        (a, b)
    } else {
        let b = tree.add(root, Probe::new("b", &log, 20, 20), at(10, 10)).unwrap();
        let a = tree.add(root, Probe::new("a", &log, 20, 20), at(0, 0)).unwrap();
        (a, b)
    };
    (tree, root, a, b)
}

#[test]
fn test_hit_overlap_prefers_last_child() {
    let (tree, root, a, b) = overlapping(true);
    assert_eq!(tree.hit(root, 15, 15), b);
    assert_eq!(tree.hit(root, 5, 5), a);
    assert_eq!(tree.hit(root, 29, 2), root);
    assert_eq!(tree.hit(root, -3, 100), root);

    let (tree, root, a, _b) = overlapping(false);
    assert_eq!(tree.hit(root, 15, 15), a);
}

#[test]
fn test_hit_skips_hidden_and_descends() {
    let log: Log = Rc::default();
    let (mut tree, root, a, b) = overlapping(true);
    tree.widget_mut(b).unwrap().set_visible(false);
    assert_eq!(tree.hit(root, 15, 15), a);

    let inner = tree.add(root, PlainPanel::new(), at(40, 0)).unwrap();
    let deep = tree.add(inner, Probe::new("deep", &log, 5, 5), at(2, 2)).unwrap();
    assert_eq!(tree.hit(root, 43, 3), deep);
    assert_eq!(tree.hit(root, 40, 0), inner);
}

// =========================================================================
// Focus
// =========================================================================

#[derive(Debug, Clone, Copy)]
enum FocusStep {
    Request(WidgetId),
    Release(WidgetId),
    Cycle(bool),
}

#[test]
fn test_focus_invariant_and_pairing() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let names = ["a", "b", "c"];
    let ids: Vec<WidgetId> = names
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            let probe = Probe::new(name, &log, 10, 10).focusable();
            host.add(root, probe, at(i as i32 * 12, 0)).unwrap()
        })
        .collect();
    let inert = host.add(root, Probe::new("inert", &log, 10, 10), at(0, 20)).unwrap();
    host.validate().unwrap();

    let steps = [
        FocusStep::Request(ids[0]),
        FocusStep::Request(ids[1]),
        FocusStep::Request(inert),
        FocusStep::Cycle(true),
        FocusStep::Release(ids[0]),
        FocusStep::Cycle(false),
        FocusStep::Release(ids[1]),
    ];
    for step in steps {
        match step {
            FocusStep::Request(id) => {
                host.request_focus(id).unwrap();
            }
            FocusStep::Release(id) => {
                host.release_focus(id).unwrap();
            }
            FocusStep::Cycle(forward) => {
                host.cycle_focus(forward).unwrap();
            }
        }
        let holders: Vec<WidgetId> = ids.iter().copied().filter(|&id| host.is_focused(id)).collect();
        assert!(holders.len() <= 1);
        assert_eq!(holders.first().copied(), host.focused());
    }

    for (&name, &id) in names.iter().zip(&ids) {
        let events = received(&log, name);
        let gained = events.iter().filter(|e| **e == WidgetEvent::FocusGained).count();
        let lost = events.iter().filter(|e| **e == WidgetEvent::FocusLost).count();
        assert_eq!(gained - lost, usize::from(host.is_focused(id)), "{name}");
    }
    assert!(received(&log, "inert").is_empty());
}

#[test]
fn test_cycle_totality() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let a = host.add(root, Probe::new("a", &log, 5, 5).focusable(), at(0, 0)).unwrap();
    let inner = host.add(root, PlainPanel::new(), at(0, 10)).unwrap();
    let b = host.add(inner, Probe::new("b", &log, 5, 5).focusable(), at(0, 0)).unwrap();
    let hidden = host.add(inner, PlainPanel::new(), at(10, 0)).unwrap();
    host.add(hidden, Probe::new("x", &log, 5, 5).focusable(), at(0, 0)).unwrap();
    let c = host.add(inner, Probe::new("c", &log, 5, 5).focusable(), at(20, 0)).unwrap();
    host.add(root, Probe::new("d", &log, 5, 5), at(0, 30)).unwrap();
    let e = host.add(root, Probe::new("e", &log, 5, 5).focusable(), at(0, 40)).unwrap();
    host.tree_mut().widget_mut(hidden).unwrap().set_visible(false);
    host.validate().unwrap();

    let forward: Vec<WidgetId> = (0..4).filter_map(|_| host.cycle_focus(true).unwrap()).collect();
    assert_eq!(forward, vec![a, b, c, e]);
    assert_eq!(host.cycle_focus(true).unwrap(), Some(a));

    let backward: Vec<WidgetId> = (0..4).filter_map(|_| host.cycle_focus(false).unwrap()).collect();
    assert_eq!(backward, vec![e, c, b, a]);
}

#[test]
fn test_cycle_with_single_candidate_stays() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let only = host.add(root, Probe::new("only", &log, 5, 5).focusable(), at(0, 0)).unwrap();
    host.validate().unwrap();

    assert_eq!(host.cycle_focus(true).unwrap(), Some(only));
    assert_eq!(host.cycle_focus(true).unwrap(), None);
    assert!(host.is_focused(only));
    assert_eq!(received(&log, "only"), vec![WidgetEvent::FocusGained]);
}

// =========================================================================
// Input dispatch
// =========================================================================

/// root (0,0) > mid (10,10) > leaf 10x10 at (5,5).
fn bubbling_host(mid_handles: bool) -> (Host, Log) {
    let log: Log = Rc::default();
    let mut host = Host::default();
    let root = host.create_root(ProbePanel::new("root", &log, false)).unwrap();
    let mid = host.add(root, ProbePanel::new("mid", &log, mid_handles), at(10, 10)).unwrap();
    host.add(mid, Probe::new("leaf", &log, 10, 10), at(5, 5)).unwrap();
    host.validate().unwrap();
    (host, log)
}

#[test]
fn test_click_bubbles_and_stops_at_handled() {
    init_tracing();
    let (mut host, log) = bubbling_host(true);
    let mut dispatcher = InputDispatcher::new();

    let down = dispatcher.on_mouse_down(&mut host, 20, 20, MouseButton::Left).unwrap();
    let up = dispatcher.on_mouse_up(&mut host, 20, 20, MouseButton::Left).unwrap();
    assert!(down.is_handled() && up.is_handled());
    assert_eq!(dispatcher.last_responder(), None);

    let left = MouseButton::Left;
    assert_eq!(
        received(&log, "leaf"),
        vec![
            WidgetEvent::MouseDown { x: 5, y: 5, button: left },
            WidgetEvent::MouseUp { x: 5, y: 5, button: left },
            WidgetEvent::Click { x: 5, y: 5, button: left },
        ]
    );
    assert_eq!(
        received(&log, "mid"),
        vec![
            WidgetEvent::MouseDown { x: 10, y: 10, button: left },
            WidgetEvent::MouseUp { x: 10, y: 10, button: left },
            WidgetEvent::Click { x: 10, y: 10, button: left },
        ]
    );
    assert!(received(&log, "root").is_empty());
}

#[test]
fn test_unhandled_click_reaches_root() {
    let (mut host, log) = bubbling_host(false);
    let mut dispatcher = InputDispatcher::new();
    dispatcher.on_mouse_down(&mut host, 20, 20, MouseButton::Left).unwrap();
    let up = dispatcher.on_mouse_up(&mut host, 20, 20, MouseButton::Left).unwrap();
    assert!(!up.is_handled());
    assert_eq!(
        received(&log, "root").last(),
        Some(&WidgetEvent::Click { x: 20, y: 20, button: MouseButton::Left })
    );
}

#[test]
fn test_release_outside_root_has_no_click() {
    let (mut host, log) = bubbling_host(true);
    let mut dispatcher = InputDispatcher::new();
    dispatcher.on_mouse_down(&mut host, 20, 20, MouseButton::Left).unwrap();
    dispatcher
        .on_mouse_drag(&mut host, 60, 60, MouseButton::Left, 40.0, 40.0)
        .unwrap();
    dispatcher.on_mouse_up(&mut host, 100, 100, MouseButton::Left).unwrap();

    let leaf: Vec<&str> = received(&log, "leaf").iter().map(WidgetEvent::name).collect();
    assert_eq!(leaf, vec!["mouse-down", "mouse-drag", "mouse-up"]);
    assert_eq!(
        received(&log, "leaf")[2],
        WidgetEvent::MouseUp { x: 85, y: 85, button: MouseButton::Left }
    );
}

#[test]
fn test_hover_moves_between_widgets() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let a = host.add(root, Probe::new("a", &log, 10, 10).handling(), at(0, 0)).unwrap();
    let b = host.add(root, Probe::new("b", &log, 10, 10).handling(), at(20, 0)).unwrap();
    host.validate().unwrap();
    let mut dispatcher = InputDispatcher::new();

    dispatcher.on_mouse_move(&mut host, 2, 2).unwrap();
    dispatcher.on_mouse_move(&mut host, 3, 2).unwrap();
    assert_eq!(dispatcher.hovered(), Some(a));
    assert!(host.tree().widget(a).unwrap().widget_base().is_hovered());

    dispatcher.on_mouse_move(&mut host, 22, 2).unwrap();
    assert_eq!(dispatcher.hovered(), Some(b));
    assert!(!host.tree().widget(a).unwrap().widget_base().is_hovered());
    assert!(host.tree().widget(b).unwrap().widget_base().is_hovered());

    let names = |who: &str| -> Vec<&'static str> { received(&log, who).iter().map(WidgetEvent::name).collect() };
    assert_eq!(names("a"), vec!["mouse-move", "hover-enter", "mouse-move", "hover-exit"]);
    assert_eq!(names("b"), vec!["mouse-move", "hover-enter"]);
}

#[test]
fn test_tab_cycles_and_shift_reverses() {
    let (mut host, root) = host_with_plain_root();
    let first = host.add(root, Button::new("One"), at(0, 0)).unwrap();
    let second = host.add(root, Button::new("Two"), at(50, 0)).unwrap();
    host.validate().unwrap();
    let mut dispatcher = InputDispatcher::new();
    let shift = KeyboardModifiers {
        shift: true,
        ..KeyboardModifiers::NONE
    };

    dispatcher.on_key_pressed(&mut host, Key::Tab, KeyboardModifiers::NONE).unwrap();
    assert!(host.is_focused(first));
    dispatcher.on_key_pressed(&mut host, Key::Tab, KeyboardModifiers::NONE).unwrap();
    assert!(host.is_focused(second));
    dispatcher.on_key_pressed(&mut host, Key::Tab, shift).unwrap();
    assert!(host.is_focused(first));
}

#[test]
fn test_tab_cycling_can_be_disabled() {
    let mut host = Host::new(HostConfig {
        tab_cycles_focus: false,
        ..HostConfig::default()
    });
    let root = host.create_root(PlainPanel::new()).unwrap();
    host.add(root, Button::new("One"), at(0, 0)).unwrap();
    host.validate().unwrap();

    let mut dispatcher = InputDispatcher::new();
    let result = dispatcher
        .on_key_pressed(&mut host, Key::Tab, KeyboardModifiers::NONE)
        .unwrap();
    assert_eq!(result, EventResult::Ignored);
    assert_eq!(host.focused(), None);
}

#[test]
fn test_keys_without_focus_are_ignored() {
    let (mut host, root) = host_with_plain_root();
    host.add(root, Button::new("One"), at(0, 0)).unwrap();
    host.validate().unwrap();
    let mut dispatcher = InputDispatcher::new();
    let result = dispatcher.on_char_typed(&mut host, 'q').unwrap();
    assert_eq!(result, EventResult::Ignored);
}

#[test]
fn test_press_outside_releases_focus() {
    let (mut host, root) = host_with_plain_root();
    let first = host.add(root, Button::new("One"), at(0, 0)).unwrap();
    host.add(root, Button::new("Two"), at(50, 0)).unwrap();
    host.validate().unwrap();
    host.request_focus(first).unwrap();
    let mut dispatcher = InputDispatcher::new();

    dispatcher.on_mouse_down(&mut host, 5, 5, MouseButton::Left).unwrap();
    dispatcher.on_mouse_up(&mut host, 5, 5, MouseButton::Left).unwrap();
    assert!(host.is_focused(first));

    dispatcher.on_mouse_down(&mut host, 55, 5, MouseButton::Left).unwrap();
    assert_eq!(host.focused(), None);
}

#[test]
fn test_text_field_focus_and_typing() {
    let (mut host, root) = host_with_plain_root();
    let field = host.add(root, TextField::new(), at(0, 0)).unwrap();
    host.validate().unwrap();
    let mut dispatcher = InputDispatcher::new();

    dispatcher.on_mouse_down(&mut host, 10, 10, MouseButton::Left).unwrap();
    dispatcher.on_mouse_up(&mut host, 10, 10, MouseButton::Left).unwrap();
    assert!(host.is_focused(field));

    for ch in "ok".chars() {
        dispatcher.on_char_typed(&mut host, ch).unwrap();
    }
    dispatcher
        .on_key_pressed(&mut host, Key::Backspace, KeyboardModifiers::NONE)
        .unwrap();
    assert_eq!(host.tree().get_as::<TextField>(field).unwrap().text(), "o");
}

#[test]
fn test_scroll_wheel_bubbles_to_scroll_panel() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let scroll = host.add(root, ScrollPanel::new(100, 50).unwrap(), at(0, 0)).unwrap();
    let content = host
        .add(scroll, Probe::new("content", &log, 80, 200), Placement::Auto)
        .unwrap();
    host.validate().unwrap();
    let mut dispatcher = InputDispatcher::new();

    let result = dispatcher.on_mouse_scroll(&mut host, 10, 10, -3.0).unwrap();
    assert!(result.is_handled());
    assert_eq!(host.tree().widget(content).unwrap().y(), -12);
    assert_eq!(
        received(&log, "content"),
        vec![WidgetEvent::MouseScroll { x: 10, y: 10, amount: -3.0 }]
    );
}

#[test]
fn test_tab_click_through_dispatcher() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let tabs = host
        .add(
            root,
            TabPanel::new(),
            Placement::Bounds {
                x: 0,
                y: 0,
                width: 120,
                height: 100,
            },
        )
        .unwrap();
    let first = TabPanel::add_tab(host.tree_mut(), tabs, "One", Probe::new("p1", &log, 10, 10)).unwrap();
    let second = TabPanel::add_tab(host.tree_mut(), tabs, "Two", Probe::new("p2", &log, 10, 10)).unwrap();
    host.validate().unwrap();
    let mut dispatcher = InputDispatcher::new();

    // "One" is 3 glyphs plus padding: 34 pixels wide, so x = 40 is on "Two".
    dispatcher.on_mouse_down(&mut host, 40, 10, MouseButton::Left).unwrap();
    dispatcher.on_mouse_up(&mut host, 40, 10, MouseButton::Left).unwrap();

    assert!(!host.tree().widget(first).unwrap().is_visible());
    assert!(host.tree().widget(second).unwrap().is_visible());
    assert_eq!(received(&log, "p2"), vec![WidgetEvent::Shown]);
    assert!(received(&log, "p1").is_empty());
}

#[test]
fn test_dispatch_without_root_fails() {
    let mut host = Host::default();
    let mut dispatcher = InputDispatcher::new();
    let err = dispatcher.on_mouse_move(&mut host, 0, 0).unwrap_err();
    assert!(err.is_invalid_state());
}

// =========================================================================
// Painting
// =========================================================================

#[test]
fn test_paint_order_and_offsets() {
    let (mut host, root) = host_with_plain_root();
    let background = PlainPanel::new().with_background(BackgroundPainter::Solid(Color::WHITE));
    let panel = host.add(root, background, at(0, 0)).unwrap();
    host.add(panel, Label::new("a"), at(2, 3)).unwrap();
    let inner = host.add(panel, PlainPanel::new(), at(10, 3)).unwrap();
    host.add(inner, Label::new("b"), at(1, 1)).unwrap();
    let hidden = host.add(panel, Label::new("c"), at(20, 3)).unwrap();
    host.tree_mut().widget_mut(hidden).unwrap().set_visible(false);
    host.validate().unwrap();

    let mut renderer = RecordingRenderer::new();
    host.paint(&mut renderer, 0, 0);

    let commands = renderer.commands();
    assert!(matches!(
        &commands[0],
        DrawCommand::FillRect { rect, color }
            if *rect == Rect::new(0, 0, 26, 13).unwrap() && *color == Color::WHITE
    ));
    assert!(matches!(commands[1], DrawCommand::Text { x: 2, y: 3, .. }));
    assert!(matches!(commands[2], DrawCommand::Text { x: 11, y: 4, .. }));
    assert_eq!(renderer.texts(), vec!["a", "b"]);
}

#[test]
fn test_scroll_panel_clips_content() {
    let log: Log = Rc::default();
    let (mut host, root) = host_with_plain_root();
    let scroll = host.add(root, ScrollPanel::new(40, 40).unwrap(), at(0, 0)).unwrap();
    host.add(scroll, Probe::new("content", &log, 10, 10), Placement::Auto).unwrap();
    host.validate().unwrap();

    let mut renderer = RecordingRenderer::new();
    host.paint(&mut renderer, 0, 0);
    assert_eq!(renderer.clip_depth(), 0);
    assert_eq!(renderer.commands().first(), Some(&DrawCommand::PushClip(Rect::new(0, 0, 40, 40).unwrap())));
    assert_eq!(renderer.commands().last(), Some(&DrawCommand::PopClip));
}
