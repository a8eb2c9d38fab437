//! The draw surface a viewport renders into.
//!
//! Rendering backends implement [`DrawSurface`]; the kernel only issues
//! filled rects, textured quads and text runs in viewport-local logical
//! coordinates. [`DrawList`] is a recording implementation for headless hosts
//! and tests.

use crate::color::Color;
use crate::measure::FontId;
use crate::primitives::Rect;
use glam::{Affine2, Vec2};

/// Opaque handle to a host texture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Parameters for one run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

/// Draw-call sink for one viewport
pub trait DrawSurface {
    /// Screen-space rectangle this surface covers
    fn bounds(&self) -> Rect;

    /// Physical pixels per logical unit
    fn scale_factor(&self) -> f32 {
        1.0
    }

    /// Clip for subsequent draws, in viewport-local coordinates
    fn set_clip_rect(&mut self, clip: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn textured_quad(&mut self, rect: Rect, texture: TextureId, uv: Rect, tint: Color);

    /// Draw text with its top-left corner at `origin`
    fn text_run(&mut self, origin: Vec2, run: TextRun<'_>);

    fn push_transform(&mut self, transform: Affine2);

    fn pop_transform(&mut self);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
        clip: Rect,
    },
    Quad {
        rect: Rect,
        texture: TextureId,
        uv: Rect,
        tint: Color,
        clip: Rect,
    },
    Text {
        origin: Vec2,
        text: String,
        font: FontId,
        size: f32,
        color: Color,
        clip: Rect,
        transform: Affine2,
    },
}

impl DrawCommand {
    pub fn clip(&self) -> Rect {
        match self {
            DrawCommand::Rect { clip, .. }
            | DrawCommand::Quad { clip, .. }
            | DrawCommand::Text { clip, .. } => *clip,
        }
    }
}

/// Recording surface
#[derive(Debug, Clone)]
pub struct DrawList {
    bounds: Rect,
    scale_factor: f32,
    clip: Rect,
    transforms: Vec<Affine2>,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            scale_factor: 1.0,
            clip: Rect::from_min_size(Vec2::ZERO, bounds.size()),
            transforms: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Filled rects only, in draw order
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect { rect, color, .. } => Some((*rect, *color)),
            _ => None,
        })
    }

    /// Text runs only, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Current accumulated transform
    pub fn transform(&self) -> Affine2 {
        self.transforms.last().copied().unwrap_or(Affine2::IDENTITY)
    }

    /// Forget recorded commands, keeping bounds and scale
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transforms.clear();
        self.clip = Rect::from_min_size(Vec2::ZERO, self.bounds.size());
    }
}

impl DrawSurface for DrawList {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn set_clip_rect(&mut self, clip: Rect) {
        self.clip = clip;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color,
            clip: self.clip,
        });
    }

    fn textured_quad(&mut self, rect: Rect, texture: TextureId, uv: Rect, tint: Color) {
        self.commands.push(DrawCommand::Quad {
            rect,
            texture,
            uv,
            tint,
            clip: self.clip,
        });
    }

    fn text_run(&mut self, origin: Vec2, run: TextRun<'_>) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: run.text.to_owned(),
            font: run.font,
            size: run.size,
            color: run.color,
            clip: self.clip,
            transform: self.transform(),
        });
    }

    fn push_transform(&mut self, transform: Affine2) {
        let combined = self.transform() * transform;
        self.transforms.push(combined);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }
}
