//! Single-line text input.
//!
//! A [`TextField`] takes focus when pressed and edits its text from keyboard
//! input while it holds focus: typed characters are inserted at the cursor,
//! Backspace and Delete remove around it, and Left/Right/Home/End move it.
//! Tab and Enter are left unhandled so the host can cycle focus.

use trellis_core::{Alignment, TrellisResult};
use trellis_render::{Color, DEFAULT_LINE_HEIGHT};

use crate::widget::{
    EventContext, EventResult, Key, MouseButton, PaintContext, Widget, WidgetBase, WidgetEvent,
};

/// Fixed height of every text field.
pub const TEXT_FIELD_HEIGHT: i32 = 20;

/// Default width in pixels.
const DEFAULT_WIDTH: i32 = 100;

/// Left padding before the text.
const PADDING: i32 = 4;

type ChangeHandler = Box<dyn FnMut(&str)>;

/// An editable line of text.
pub struct TextField {
    base: WidgetBase,
    text: String,
    /// Cursor position in characters.
    cursor: usize,
    max_length: Option<usize>,
    on_changed: Option<ChangeHandler>,
}

impl TextField {
    /// An empty field of the default width.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.set_resizable(true);
        base.expand_to(DEFAULT_WIDTH, TEXT_FIELD_HEIGHT);
        Self {
            base,
            text: String::new(),
            cursor: 0,
            max_length: None,
            on_changed: None,
        }
    }

    /// Set the initial text; the cursor goes to the end (builder pattern).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Limit the number of characters (builder pattern).
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the change callback (builder pattern).
    pub fn with_on_changed(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_changed = Some(Box::new(handler));
        self
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and move the cursor to its end. The change callback
    /// is not run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    /// The cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the character at `index`.
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.max_length.is_some_and(|max| self.char_count() >= max) {
            return false;
        }
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, ch);
        self.cursor += 1;
        true
    }

    fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.char_count() {
            return false;
        }
        let offset = self.byte_offset(index);
        self.text.remove(offset);
        true
    }

    fn changed(&mut self) {
        if let Some(handler) = self.on_changed.as_mut() {
            handler(&self.text);
        }
    }

    fn key(&mut self, key: Key) -> EventResult {
        let edited = match key {
            Key::Backspace => {
                if self.cursor == 0 {
                    false
                } else {
                    self.cursor -= 1;
                    self.remove_at(self.cursor)
                }
            }
            Key::Delete => self.remove_at(self.cursor),
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                false
            }
            Key::Home => {
                self.cursor = 0;
                false
            }
            Key::End => {
                self.cursor = self.char_count();
                false
            }
            _ => return EventResult::Ignored,
        };
        if edited {
            self.changed();
        }
        EventResult::Handled
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("text", &self.text)
            .field("cursor", &self.cursor)
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

impl Widget for TextField {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_size(&mut self, width: i32, _height: i32) -> TrellisResult<()> {
        self.base.set_size(width, TEXT_FIELD_HEIGHT)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, x: i32, y: i32, _mouse_x: i32, _mouse_y: i32) {
        let (width, height) = (self.width(), self.height());
        ctx.fill_rect(x, y, width, height, Color::BLACK);
        ctx.fill_rect(x + 1, y + 1, width - 2, height - 2, Color::from_argb(0xFF20_2020));

        let text_y = y + Alignment::Center.offset(height, DEFAULT_LINE_HEIGHT);
        ctx.draw_text(&self.text, x + PADDING, text_y, Color::from_argb(0xFFE0_E0E0));

        if ctx.should_show_focus() {
            let before = &self.text[..self.byte_offset(self.cursor)];
            let caret_x = x + PADDING + ctx.text_width(before);
            ctx.fill_rect(caret_x, text_y - 1, 1, DEFAULT_LINE_HEIGHT + 2, Color::WHITE);
            ctx.draw_focus_indicator(x, y, width, height);
        }
    }

    fn event(&mut self, event: &WidgetEvent, cx: &mut EventContext<'_>) -> EventResult {
        match *event {
            WidgetEvent::MouseDown {
                button: MouseButton::Left,
                ..
            } => {
                cx.request_focus();
                EventResult::Handled
            }
            WidgetEvent::MouseUp { .. } | WidgetEvent::Click { .. } => EventResult::Handled,
            WidgetEvent::CharTyped { ch } if cx.is_focused() => {
                if self.insert(ch) {
                    self.changed();
                }
                EventResult::Handled
            }
            WidgetEvent::KeyPressed { key, .. } if cx.is_focused() => self.key(key),
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{FocusManager, HostRequest, KeyboardModifiers, WidgetTree};
    use std::cell::RefCell;
    use std::rc::Rc;
    use trellis_core::HostHandle;

    fn focused_field(field: TextField) -> (WidgetTree, FocusManager, trellis_core::WidgetId) {
        let mut tree = WidgetTree::new();
        let id = tree.insert(field);
        tree.validate(id, HostHandle::next()).unwrap();
        let mut focus = FocusManager::new();
        focus.request_focus(&mut tree, id).unwrap();
        (tree, focus, id)
    }

    fn press(tree: &mut WidgetTree, focus: &FocusManager, id: trellis_core::WidgetId, key: Key) {
        let event = WidgetEvent::KeyPressed { key, modifiers: KeyboardModifiers::NONE };
        tree.send_event(focus, id, &event).unwrap();
    }

    #[test]
    fn test_typing_and_editing() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&changes);
        let field = TextField::new().with_on_changed(move |text| log.borrow_mut().push(text.to_owned()));
        let (mut tree, focus, id) = focused_field(field);

        for ch in "héllo".chars() {
            tree.send_event(&focus, id, &WidgetEvent::CharTyped { ch }).unwrap();
        }
        press(&mut tree, &focus, id, Key::Left);
        press(&mut tree, &focus, id, Key::Backspace);
        press(&mut tree, &focus, id, Key::Home);
        press(&mut tree, &focus, id, Key::Delete);

        let field = tree.get_as::<TextField>(id).unwrap();
        assert_eq!(field.text(), "élo");
        assert_eq!(field.cursor(), 0);
        assert_eq!(changes.borrow().len(), 7);
        assert_eq!(changes.borrow().last().map(String::as_str), Some("élo"));
    }

    #[test]
    fn test_ignores_input_without_focus() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(TextField::new());
        let focus = FocusManager::new();
        let typed = tree.send_event(&focus, id, &WidgetEvent::CharTyped { ch: 'a' }).unwrap();
        assert!(!typed.is_handled());
        assert_eq!(tree.get_as::<TextField>(id).unwrap().text(), "");
    }

    #[test]
    fn test_press_requests_focus() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(TextField::new());
        let focus = FocusManager::new();
        let down = WidgetEvent::MouseDown { x: 3, y: 3, button: MouseButton::Left };
        tree.send_event(&focus, id, &down).unwrap();
        assert_eq!(tree.take_requests(), vec![HostRequest::RequestFocus(id)]);
    }

    #[test]
    fn test_tab_and_control_chars_pass_through() {
        let (mut tree, focus, id) = focused_field(TextField::new().with_max_length(2));
        let tab = WidgetEvent::KeyPressed { key: Key::Tab, modifiers: KeyboardModifiers::NONE };
        assert!(!tree.send_event(&focus, id, &tab).unwrap().is_handled());
        for ch in ['\u{8}', 'a', 'b', 'c'] {
            tree.send_event(&focus, id, &WidgetEvent::CharTyped { ch }).unwrap();
        }
        assert_eq!(tree.get_as::<TextField>(id).unwrap().text(), "ab");
    }
}
