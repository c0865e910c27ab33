//! Drawing surface abstraction
//!
//! The simulation draws through [`Canvas`], which only knows filled
//! rectangles, filled circles and text. [`DrawList`] records those calls for
//! tests and the headless run; `Canvas2d` forwards them to a browser
//! `CanvasRenderingContext2d`.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod color;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use color::{Color, colors};

use glam::Vec2;

/// Horizontal anchor of a text label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// A single line of text to draw
#[derive(Debug, Clone, Copy)]
pub struct Label<'a> {
    pub text: &'a str,
    /// Anchor point (baseline)
    pub pos: Vec2,
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub alpha: f32,
}

/// Primitive 2D drawing operations
pub trait Canvas {
    /// Fill an axis-aligned rectangle with its top-left corner at `pos`
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);

    /// Fill a circle, blended with `alpha`
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    fn fill_text(&mut self, label: &Label<'_>);
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
        alpha: f32,
    },
}

/// Canvas that records every call in order
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All recorded text, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { pos, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_text(&mut self, label: &Label<'_>) {
        self.commands.push(DrawCommand::Text {
            text: label.text.to_owned(),
            pos: label.pos,
            size: label.size,
            color: label.color,
            align: label.align,
            alpha: label.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.fill_rect(Vec2::ZERO, Vec2::new(10.0, 5.0), colors::BACKGROUND);
        list.fill_circle(Vec2::new(3.0, 4.0), 2.0, colors::PLAYER, 0.5);
        list.fill_text(&Label {
            text: "Score: 0",
            pos: Vec2::new(0.0, 18.0),
            size: 18.0,
            color: colors::PLAYER,
            align: TextAlign::Left,
            alpha: 1.0,
        });

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands[0], DrawCommand::Rect { .. }));
        assert!(matches!(list.commands[1], DrawCommand::Circle { alpha, .. } if alpha == 0.5));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Score: 0"]);

        list.clear();
        assert!(list.is_empty());
    }
}
