//! Text dumps of widget trees.
//!
//! [`TreeDebug`] renders a subtree one widget per line, for logging and for
//! assertions in tests:
//!
//! ```text
//! PlainPanel (0,0 120x60)
//! ├── Label (7,7 40x9)
//! └── GridPanel (7,20 36x18)
//!     └── Button (0,0 36x20) [focusable]
//! ```

use trellis_core::{TrellisError, TrellisResult, WidgetId};

use super::tree::WidgetTree;

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Indentation only.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show widget ids.
    pub show_ids: bool,
    /// Whether to show local bounds.
    pub show_bounds: bool,
    /// Whether to show the hidden/focusable/resizable flags.
    pub show_flags: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_bounds: true,
            show_flags: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Type names only.
    pub fn minimal() -> Self {
        Self {
            show_bounds: false,
            show_flags: false,
            ..Default::default()
        }
    }
}

/// Formats widget subtrees.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// A formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format `root` and its descendants.
    ///
    /// Fails with `InvalidState` if `root` is unknown.
    pub fn format_subtree(&self, tree: &WidgetTree, root: WidgetId) -> TrellisResult<String> {
        if !tree.contains(root) {
            return Err(TrellisError::invalid_state(format!("unknown widget {root:?}")));
        }
        let mut output = String::new();
        self.format_node(tree, root, 0, "", None, &mut output);
        Ok(output)
    }

    fn format_node(
        &self,
        tree: &WidgetTree,
        id: WidgetId,
        depth: usize,
        indent: &str,
        is_last: Option<bool>,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        output.push_str(indent);
        if let Some(last) = is_last {
            output.push_str(self.connector(last));
        }
        output.push_str(short_type_name(tree.type_name(id).unwrap_or("?")));
        if self.options.show_ids {
            output.push_str(&format!(" {id:?}"));
        }
        match tree.widget(id) {
            Some(widget) => {
                if self.options.show_bounds {
                    output.push_str(&format!(
                        " ({},{} {}x{})",
                        widget.x(),
                        widget.y(),
                        widget.width(),
                        widget.height()
                    ));
                }
                if self.options.show_flags {
                    let flags: Vec<&str> = [
                        (!widget.is_visible(), "hidden"),
                        (widget.can_focus(), "focusable"),
                    ]
                    .into_iter()
                    .filter_map(|(set, name)| set.then_some(name))
                    .collect();
                    if !flags.is_empty() {
                        output.push_str(&format!(" [{}]", flags.join(", ")));
                    }
                }
            }
            None => output.push_str(" <in use>"),
        }
        output.push('\n');

        let child_indent = match is_last {
            None => String::new(),
            Some(last) => format!("{indent}{}", self.continuation(last)),
        };
        let children = tree.children(id);
        for (index, &child) in children.iter().enumerate() {
            let last = index + 1 == children.len();
            self.format_node(tree, child, depth + 1, &child_indent, Some(last), output);
        }
    }

    fn connector(&self, last: bool) -> &'static str {
        match (self.options.style, last) {
            (TreeStyle::Ascii, false) => "+-- ",
            (TreeStyle::Ascii, true) => "`-- ",
            (TreeStyle::Unicode, false) => "\u{251c}\u{2500}\u{2500} ",
            (TreeStyle::Unicode, true) => "\u{2514}\u{2500}\u{2500} ",
            (TreeStyle::Compact, _) => "  ",
        }
    }

    fn continuation(&self, last: bool) -> &'static str {
        match (self.options.style, last) {
            (TreeStyle::Ascii, false) => "|   ",
            (TreeStyle::Unicode, false) => "\u{2502}   ",
            (TreeStyle::Compact, _) => "",
            (_, true) => "    ",
        }
    }
}

/// Strip the module path and generic arguments from a type name.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::layout::PlainPanel;
    use crate::widget::widgets::{Button, Label};
    use crate::widget::Placement;
    use trellis_core::HostHandle;

    fn sample() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(PlainPanel::new());
        let inner = tree.add(root, PlainPanel::new(), Placement::At { x: 5, y: 5 }).unwrap();
        tree.add(inner, Button::new("Go"), Placement::At { x: 0, y: 0 }).unwrap();
        let label = tree.add(root, Label::new("ab"), Placement::At { x: 1, y: 2 }).unwrap();
        tree.widget_mut(label).unwrap().set_visible(false);
        tree.validate(root, HostHandle::next()).unwrap();
        (tree, root)
    }

    #[test]
    fn test_unicode_layout() {
        let (tree, root) = sample();
        let text = TreeDebug::new().format_subtree(&tree, root).unwrap();
        let expected = "\
PlainPanel (0,0 29x25)
├── PlainPanel (5,5 24x20)
│   └── Button (0,0 24x20) [focusable]
└── Label (1,2 12x9) [hidden]
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_ascii_minimal_with_depth_limit() {
        let (tree, root) = sample();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let text = TreeDebug::with_options(options).format_subtree(&tree, root).unwrap();
        assert_eq!(text, "PlainPanel\n+-- PlainPanel\n`-- Label\n");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("trellis::widget::layout::GridPanel"), "GridPanel");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper");
    }
}
