//! Per-viewport drawing handle
//!
//! A [`Ui`] is returned by [`Context::begin_viewport`] and is the only way to
//! lay out and interact with widgets. It borrows the context mutably for its
//! whole lifetime, so a second viewport cannot be begun until this one has
//! ended.

use crate::content::Content;
use crate::context::Context;
use crate::error::{LayoutError, Result};
use crate::id::{Id, IdName};
use crate::interaction::{ButtonResponse, PointerQuery, BASE_LAYER};
use crate::layout::{scroll_by, Frame, FrameOptions, FrameStack, Size};
use crate::measure::FontMetrics;
use crate::primitives::{Rect, Spacing};
use crate::storage::Storage;
use crate::style::{StyleRecord, Theme, WidgetStyle};
use crate::surface::DrawSurface;
use crate::viewport::Viewport;
use glam::Vec2;
use std::sync::Arc;

pub struct Ui<'a> {
    ctx: &'a mut Context,
    /// Taken out of the context while drawing and put back by `finish`
    viewport: Viewport,
    surface: &'a mut dyn DrawSurface,
    theme: Arc<Theme>,
    frames: FrameStack,
    id_stack: Vec<Id>,
    /// Number of unmatched `indent` calls
    indent_level: u32,
    layers: Vec<i32>,
    /// First misuse of this layout
    aborted: Option<LayoutError>,
    finished: bool,
}

impl<'a> Ui<'a> {
    pub(crate) fn new(
        ctx: &'a mut Context,
        viewport: Viewport,
        surface: &'a mut dyn DrawSurface,
        theme: Arc<Theme>,
    ) -> Self {
        let root = Rect::from_min_size(Vec2::ZERO, viewport.logical_size());
        let mut frames = FrameStack::new();
        frames.push(viewport.id, root, theme.root_padding, FrameOptions::fixed(), ctx.storage());
        surface.set_clip_rect(root);

        Self {
            ctx,
            viewport,
            surface,
            theme,
            frames,
            id_stack: Vec::new(),
            indent_level: 0,
            layers: Vec::new(),
            aborted: None,
            finished: false,
        }
    }

    // ========== Identity ==========

    /// Identifier for `name` under the current id scope
    pub fn id<'n>(&self, name: impl Into<IdName<'n>>) -> Id {
        Id::new(name, self.id_parent())
    }

    fn id_parent(&self) -> Id {
        self.id_stack.last().copied().unwrap_or(self.viewport.id)
    }

    /// Open an id scope; ids created until the matching `pop_id` hash under it
    pub fn push_id<'n>(&mut self, name: impl Into<IdName<'n>>) -> Id {
        let id = self.id(name);
        self.id_stack.push(id);
        id
    }

    pub fn pop_id(&mut self) -> Result<()> {
        match self.id_stack.pop() {
            Some(_) => Ok(()),
            None => Err(self.abort(LayoutError::IdScopeUnderflow)),
        }
    }

    /// Run `f` inside an id scope
    pub fn scope<'n, R>(&mut self, name: impl Into<IdName<'n>>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_id(name);
        let result = f(self);
        // An underflow here means `f` popped our scope; the abort state keeps it.
        let _ = self.pop_id();
        result
    }

    // ========== Layout ==========

    pub fn spacing(&self) -> f32 {
        self.theme.spacing
    }

    /// Shift the start of following rows right by the theme's indent width
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Undo one `indent`
    pub fn unindent(&mut self) -> Result<()> {
        match self.indent_level.checked_sub(1) {
            Some(level) => {
                self.indent_level = level;
                Ok(())
            }
            None => Err(self.abort(LayoutError::IndentUnderflow)),
        }
    }

    fn indent_offset(&self) -> f32 {
        self.indent_level as f32 * self.theme.indent_width
    }

    /// Declare how many cells each following row of the current frame holds
    pub fn set_columns(&mut self, columns: usize) {
        self.frames.set_columns(columns);
    }

    /// Finish the current row early
    pub fn new_row(&mut self) {
        self.frames.new_row();
    }

    /// Place the next cell sized for `content` plus `padding`
    pub fn cell(&mut self, width: Size, height: Size, content: &Content<'_>, padding: Spacing) -> Rect {
        let preferred = content.preferred_size(self.ctx.fonts()) + padding.total();
        self.cell_sized(width, height, preferred)
    }

    /// Place the next cell with an explicit preferred size.
    ///
    /// Returns an empty rect once the layout has been aborted.
    pub fn cell_sized(&mut self, width: Size, height: Size, preferred: Vec2) -> Rect {
        if self.aborted.is_some() {
            return Rect::ZERO;
        }
        let spacing = self.theme.spacing;
        let indent = self.indent_offset();
        self.frames
            .next_cell(width, height, preferred, indent, spacing)
            .unwrap_or(Rect::ZERO)
    }

    /// Open a nested frame covering `bounds`. Returns the frame's id.
    ///
    /// A scrollable frame takes the wheel input of this step if it was the
    /// topmost scrollable frame under the pointer on the previous one.
    pub fn push_frame<'n>(
        &mut self,
        name: impl Into<IdName<'n>>,
        bounds: Rect,
        padding: Spacing,
        options: FrameOptions,
    ) -> Id {
        let id = self.id(name);
        if self.aborted.is_some() {
            return id;
        }

        let wheel = self.ctx.input().wheel;
        if options.scrollable && self.viewport.hot_scroll() == id && wheel != Vec2::ZERO {
            let delta = -wheel * self.theme.scroll_speed;
            scroll_by(self.ctx.storage_mut(), id, delta);
        }

        self.frames.push(id, bounds, padding, options, self.ctx.storage());
        let clip = self.frames.clip().unwrap_or(bounds);

        if options.scrollable {
            let hovered = self.viewport.pointer.is_some_and(|p| clip.contains(p));
            if hovered && !self.viewport.obstructed {
                self.viewport.offer_scroll(id, self.layer());
            }
        }

        self.surface.set_clip_rect(clip);
        id
    }

    /// Close the innermost frame opened with [`Ui::push_frame`]
    pub fn pop_frame(&mut self) -> Result<Frame> {
        if let Some(err) = self.aborted {
            return Err(err);
        }
        // The root frame belongs to the viewport and is closed by `end`.
        if self.frames.depth() <= 1 {
            return Err(self.abort(LayoutError::FrameUnderflow));
        }

        let frame = self.frames.pop(self.ctx.storage_mut())?;
        if let Some(clip) = self.frames.clip() {
            self.surface.set_clip_rect(clip);
        }
        Ok(frame)
    }

    /// Lay out a scrollable region in the next cell and fill it with `f`
    pub fn scroll_area<'n, R>(
        &mut self,
        name: impl Into<IdName<'n>>,
        width: Size,
        height: Size,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Result<R> {
        let bounds = self.cell_sized(width, height, Vec2::ZERO);
        let padding = self.theme.frame.idle.padding;
        self.push_frame(name, bounds, padding, FrameOptions::scroll());
        let result = f(self);
        self.pop_frame()?;
        Ok(result)
    }

    /// Number of open frames, the root included
    pub fn frame_depth(&self) -> usize {
        self.frames.depth()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.current()
    }

    // ========== Layers ==========

    /// Raise following widgets above everything registered on lower layers
    pub fn push_layer(&mut self, layer: i32) {
        self.layers.push(layer);
    }

    pub fn pop_layer(&mut self) -> Result<()> {
        match self.layers.pop() {
            Some(_) => Ok(()),
            None => Err(self.abort(LayoutError::LayerUnderflow)),
        }
    }

    pub fn layer(&self) -> i32 {
        self.layers.last().copied().unwrap_or(BASE_LAYER)
    }

    // ========== Interaction ==========

    fn query(&self) -> PointerQuery {
        PointerQuery {
            pointer: self.viewport.pointer,
            edges: self.ctx.input().edges,
            clip: self.frames.clip().unwrap_or(Rect::ZERO),
            layer: self.layer(),
            obstructed: self.viewport.obstructed,
        }
    }

    /// Full press/release state of a clickable rect
    pub fn interact(&mut self, id: Id, rect: Rect) -> ButtonResponse {
        let query = self.query();
        self.viewport.tracker.button_behaviour(id, &rect, &query)
    }

    /// Whether `id` was clicked: pressed on it and released over it
    pub fn button_behaviour(&mut self, id: Id, rect: Rect) -> bool {
        self.interact(id, rect).clicked
    }

    /// Register `rect` as a hover target without press handling
    pub fn hover(&mut self, id: Id, rect: Rect) -> bool {
        let query = self.query();
        self.viewport.tracker.register_candidate(id, &rect, &query)
    }

    pub fn hot(&self) -> Id {
        self.viewport.hot()
    }

    pub fn active(&self) -> Id {
        self.viewport.active()
    }

    pub fn is_hot(&self, id: Id) -> bool {
        id.is_some() && self.viewport.hot() == id
    }

    pub fn is_active(&self, id: Id) -> bool {
        id.is_some() && self.viewport.active() == id
    }

    /// Pointer in viewport-local coordinates
    pub fn pointer(&self) -> Option<Vec2> {
        self.viewport.pointer
    }

    /// Stop this viewport from being hovered for the rest of the step
    pub fn set_obstructed(&mut self, obstructed: bool) {
        self.viewport.obstructed = obstructed;
    }

    // ========== Drawing ==========

    fn style_record(&self, style: &WidgetStyle, id: Id) -> StyleRecord {
        *style.current(self.viewport.active(), self.viewport.hot(), id)
    }

    /// Fill `rect` with the background for `id`'s phase and return the
    /// content rect inside the record's padding
    pub fn draw_box(&mut self, rect: Rect, style: &WidgetStyle, id: Id) -> Rect {
        let record = self.style_record(style, id);
        if !record.background.is_invisible() && !rect.is_empty() {
            self.surface.fill_rect(rect, record.background);
        }
        rect.shrink(record.padding)
    }

    pub fn draw_content(&mut self, content: &Content<'_>, style: &WidgetStyle, id: Id, rect: Rect) {
        let record = self.style_record(style, id);
        content.draw(&mut *self.surface, &record, rect);
    }

    /// Text content in the theme's font
    pub fn text<'t>(&self, text: &'t str) -> Content<'t> {
        Content::text(text, self.theme.font, self.theme.text_size)
    }

    // ========== Accessors ==========

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn fonts(&self) -> &dyn FontMetrics {
        self.ctx.fonts()
    }

    pub fn viewport_id(&self) -> Id {
        self.viewport.id
    }

    pub fn storage(&self) -> &Storage {
        self.ctx.storage()
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        self.ctx.storage_mut()
    }

    pub fn get_bool<'n>(&self, owner: Id, key: impl Into<IdName<'n>>, default: bool) -> bool {
        self.ctx.storage().get_bool(owner, key, default)
    }

    pub fn set_bool<'n>(&mut self, owner: Id, key: impl Into<IdName<'n>>, value: bool) {
        self.ctx.storage_mut().set_bool(owner, key, value);
    }

    pub fn get_number<'n>(&self, owner: Id, key: impl Into<IdName<'n>>, default: f32) -> f32 {
        self.ctx.storage().get_number(owner, key, default)
    }

    pub fn set_number<'n>(&mut self, owner: Id, key: impl Into<IdName<'n>>, value: f32) {
        self.ctx.storage_mut().set_number(owner, key, value);
    }

    pub fn get_id<'n>(&self, owner: Id, key: impl Into<IdName<'n>>, default: Id) -> Id {
        self.ctx.storage().get_id(owner, key, default)
    }

    pub fn set_id<'n>(&mut self, owner: Id, key: impl Into<IdName<'n>>, value: Id) {
        self.ctx.storage_mut().set_id(owner, key, value);
    }

    /// Error that aborted this layout, if any
    pub fn aborted(&self) -> Option<LayoutError> {
        self.aborted
    }

    // ========== Completion ==========

    /// Finish the viewport: close the root frame and promote this step's
    /// hover candidate. Reports the first misuse of the layout.
    pub fn end(mut self) -> Result<()> {
        self.finish()
    }

    fn abort(&mut self, err: LayoutError) -> LayoutError {
        if self.aborted.is_none() {
            log::error!("layout of viewport {:?} aborted: {}", self.viewport.id, err);
            self.aborted = Some(err);
            self.frames.clear();
        }
        err
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        let result = match self.aborted {
            Some(err) => Err(err),
            None if self.frames.depth() != 1 => Err(LayoutError::UnbalancedFrames {
                open: self.frames.depth().saturating_sub(1),
            }),
            None => match self.frames.pop(self.ctx.storage_mut()) {
                Ok(_) if !self.id_stack.is_empty() => Err(LayoutError::UnbalancedIdScopes {
                    open: self.id_stack.len(),
                }),
                Ok(_) => Ok(()),
                Err(err) => Err(err),
            },
        };

        if let Err(err) = &result {
            if self.aborted.is_none() {
                log::error!("layout of viewport {:?} aborted: {}", self.viewport.id, err);
            }
            self.frames.clear();
        }

        // Hover is committed even for an aborted layout.
        self.viewport.commit(self.ctx.input());
        let viewport = std::mem::take(&mut self.viewport);
        self.ctx.viewports.insert(viewport.id, viewport);
        result
    }
}

impl Drop for Ui<'_> {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!("viewport {:?} dropped without end()", self.viewport.id);
            let _ = self.finish();
        }
    }
}
