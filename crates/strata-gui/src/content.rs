//! What a cell displays.
//!
//! `Content` is a closed set: a widget that needs a new kind of content adds a
//! variant here rather than implementing a trait. Every variant answers the
//! same four questions: how to draw itself, how wide and tall it wants to be,
//! and what name to derive its identifier from.

use crate::id::IdName;
use crate::measure::{FontId, FontMetrics};
use crate::primitives::Rect;
use crate::style::StyleRecord;
use crate::surface::{DrawSurface, TextRun, TextureId};
use glam::{Affine2, Vec2};

/// A single line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextContent<'a> {
    pub text: &'a str,
    pub font: FontId,
    pub size: f32,
    /// Drawn through a surface transform when not 1.0
    pub scale: f32,
}

impl<'a> TextContent<'a> {
    pub fn new(text: &'a str, font: FontId, size: f32) -> Self {
        Self {
            text,
            font,
            size,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// A textured quad of fixed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconContent {
    pub texture: TextureId,
    pub size: Vec2,
    pub uv: Rect,
}

impl IconContent {
    pub fn new(texture: TextureId, size: Vec2) -> Self {
        Self {
            texture,
            size,
            uv: Rect::new(Vec2::ZERO, Vec2::ONE),
        }
    }
}

/// Cell content
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Content<'a> {
    #[default]
    Empty,
    Text(TextContent<'a>),
    Icon(IconContent),
}

impl<'a> Content<'a> {
    pub fn text(text: &'a str, font: FontId, size: f32) -> Self {
        Content::Text(TextContent::new(text, font, size))
    }

    pub fn icon(texture: TextureId, size: Vec2) -> Self {
        Content::Icon(IconContent::new(texture, size))
    }

    pub fn preferred_width(&self, fonts: &dyn FontMetrics) -> f32 {
        match self {
            Content::Empty => 0.0,
            Content::Text(t) => fonts.measure_text(t.font, t.size, t.text) * t.scale,
            Content::Icon(icon) => icon.size.x,
        }
    }

    pub fn preferred_height(&self, fonts: &dyn FontMetrics) -> f32 {
        match self {
            Content::Empty => 0.0,
            Content::Text(t) => fonts.line_metrics(t.font, t.size).line_height * t.scale,
            Content::Icon(icon) => icon.size.y,
        }
    }

    pub fn preferred_size(&self, fonts: &dyn FontMetrics) -> Vec2 {
        Vec2::new(self.preferred_width(fonts), self.preferred_height(fonts))
    }

    /// Name to derive a widget id from when the caller gives none
    pub fn identity_key(&self) -> IdName<'a> {
        match *self {
            Content::Empty => IdName::Int(0),
            Content::Text(t) => IdName::Text(t.text),
            Content::Icon(icon) => IdName::Int(icon.texture.0 as i64),
        }
    }

    /// Draw into `rect` (already padded) using the style's content color
    pub fn draw(&self, surface: &mut dyn DrawSurface, style: &StyleRecord, rect: Rect) {
        if style.content.is_invisible() {
            return;
        }

        match self {
            Content::Empty => {}
            Content::Text(t) => {
                let run = TextRun {
                    text: t.text,
                    font: t.font,
                    size: t.size,
                    color: style.content,
                };
                if t.scale == 1.0 {
                    surface.text_run(rect.min, run);
                } else {
                    surface.push_transform(Affine2::from_scale_angle_translation(
                        Vec2::splat(t.scale),
                        0.0,
                        rect.min,
                    ));
                    surface.text_run(Vec2::ZERO, run);
                    surface.pop_transform();
                }
            }
            Content::Icon(icon) => {
                surface.textured_quad(rect, icon.texture, icon.uv, style.content);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMetrics;
    use crate::surface::{DrawCommand, DrawList};

    #[test]
    fn test_text_preferred_size() {
        let fonts = MonospaceMetrics::default();
        let content = Content::text("hello", FontId(0), 10.0);
        assert_eq!(content.preferred_size(&fonts), Vec2::new(25.0, 12.5));

        let scaled = Content::Text(TextContent::new("hello", FontId(0), 10.0).with_scale(2.0));
        assert_eq!(scaled.preferred_size(&fonts), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_scaled_text_uses_transform() {
        let mut list = DrawList::new(Rect::from_min_size(Vec2::ZERO, Vec2::splat(100.0)));
        let content = Content::Text(TextContent::new("hi", FontId(0), 10.0).with_scale(2.0));
        let rect = Rect::from_min_size(Vec2::new(5.0, 5.0), Vec2::splat(20.0));

        content.draw(&mut list, &StyleRecord::default(), rect);

        match &list.commands()[0] {
            DrawCommand::Text { origin, transform, .. } => {
                assert_eq!(*origin, Vec2::ZERO);
                assert_eq!(transform.transform_point2(Vec2::ZERO), Vec2::new(5.0, 5.0));
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert_eq!(list.transform(), Affine2::IDENTITY);
    }

    #[test]
    fn test_icon_draws_quad() {
        let mut list = DrawList::new(Rect::from_min_size(Vec2::ZERO, Vec2::splat(100.0)));
        let content = Content::icon(TextureId(3), Vec2::splat(16.0));
        content.draw(&mut list, &StyleRecord::default(), Rect::from_min_size(Vec2::ZERO, Vec2::splat(16.0)));
        assert!(matches!(list.commands()[0], DrawCommand::Quad { texture: TextureId(3), .. }));
    }

    #[test]
    fn test_identity_keys() {
        assert_eq!(Content::text("ok", FontId(0), 10.0).identity_key(), IdName::Text("ok"));
        assert_eq!(Content::Empty.identity_key(), IdName::Int(0));
    }
}
