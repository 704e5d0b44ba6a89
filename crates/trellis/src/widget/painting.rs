//! Frame rendering for widget trees.
//!
//! Painting is a single top-down walk: a panel draws its background, then
//! the widget paints itself, then each visible child is painted at the
//! parent's position plus the child's local offset, in insertion order, so
//! later children appear on top. The mouse position handed to each widget is
//! re-based into that widget's local space.

use trellis_core::{PerfSpan, Rect, WidgetId};
use trellis_render::Color;

use super::traits::PaintContext;
use super::tree::WidgetTree;

/// Draws the area behind a panel's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundPainter {
    /// A flat fill.
    Solid(Color),
    /// The standard panel look, with a light and a dark variant picked by
    /// the session's dark-mode flag.
    Panel {
        /// Fill used in light mode.
        light: Color,
        /// Fill used in dark mode.
        dark: Color,
    },
}

impl BackgroundPainter {
    /// The default panel background.
    pub const PANEL: Self = Self::Panel {
        light: Color::PANEL,
        dark: Color::PANEL_DARK,
    };

    /// The color this painter uses for the given mode.
    pub fn color(&self, dark_mode: bool) -> Color {
        match *self {
            Self::Solid(color) => color,
            Self::Panel { light, dark } => {
                if dark_mode {
                    dark
                } else {
                    light
                }
            }
        }
    }

    /// Paint a `width` by `height` box at `(x, y)`.
    pub fn paint(&self, ctx: &mut PaintContext<'_>, x: i32, y: i32, width: i32, height: i32) {
        let color = self.color(ctx.is_dark_mode());
        ctx.fill_rect(x, y, width, height, color);
    }
}

impl WidgetTree {
    /// Paint `id` and its visible descendants with the widget's top-left at
    /// `(x, y)` in target space.
    ///
    /// Hidden widgets are skipped together with their subtrees. A widget
    /// currently checked out of the tree (painting from inside one of its
    /// own handlers) is skipped as well.
    pub fn paint(
        &self,
        id: WidgetId,
        ctx: &mut PaintContext<'_>,
        x: i32,
        y: i32,
        mouse_x: i32,
        mouse_y: i32,
    ) {
        let _span = PerfSpan::new("paint");
        self.paint_recursive(id, ctx, x, y, mouse_x, mouse_y);
    }

    fn paint_recursive(
        &self,
        id: WidgetId,
        ctx: &mut PaintContext<'_>,
        x: i32,
        y: i32,
        mouse_x: i32,
        mouse_y: i32,
    ) {
        let Some(widget) = self.widget(id) else {
            return;
        };
        if !widget.is_visible() {
            return;
        }

        let panel = widget.as_panel();
        if let Some(background) = panel.and_then(|panel| panel.background()) {
            background.paint(ctx, x, y, widget.width(), widget.height());
        }

        ctx.set_current(id);
        widget.paint(ctx, x, y, mouse_x, mouse_y);

        let Some(panel) = panel else {
            return;
        };

        let clip = panel.clips_children();
        if clip {
            let rect = Rect::new(x, y, widget.width(), widget.height()).unwrap_or(Rect::ZERO);
            ctx.renderer().push_clip(rect);
        }

        for &child_id in self.children(id) {
            let Some(child) = self.widget(child_id) else {
                continue;
            };
            let (cx, cy) = (child.x(), child.y());
            self.paint_recursive(child_id, ctx, x + cx, y + cy, mouse_x - cx, mouse_y - cy);
        }

        if clip {
            ctx.renderer().pop_clip();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_render::RecordingRenderer;

    #[test]
    fn test_panel_background_follows_mode() {
        assert_eq!(BackgroundPainter::PANEL.color(false), Color::PANEL);
        assert_eq!(BackgroundPainter::PANEL.color(true), Color::PANEL_DARK);
        let solid = BackgroundPainter::Solid(Color::WHITE);
        assert_eq!(solid.color(true), Color::WHITE);
    }

    #[test]
    fn test_background_paints_box() {
        let mut renderer = RecordingRenderer::new();
        {
            let mut ctx = PaintContext::new(&mut renderer).with_dark_mode(true);
            BackgroundPainter::PANEL.paint(&mut ctx, 5, 6, 20, 10);
            // Empty boxes are skipped.
            BackgroundPainter::PANEL.paint(&mut ctx, 0, 0, 0, 10);
        }
        assert_eq!(
            renderer.filled_rects(),
            vec![Rect::new(5, 6, 20, 10).unwrap()]
        );
    }
}
