//! Cell-cursor layout over nested frames
//!
//! Layout is a single forward pass: every widget asks the innermost open
//! [`Frame`] for its next cell and gets a rectangle back immediately. There is
//! no measure pass, so content-driven sizes must be supplied up front as the
//! preferred size.
//!
//! A frame lays its cells out in rows. A row holds `columns` cells (1 unless
//! [`FrameStack::set_columns`] says otherwise); once it is full the cursor
//! moves down by the tallest cell of the row plus spacing.

use crate::error::{LayoutError, Result};
use crate::id::Id;
use crate::primitives::{Rect, Spacing};
use crate::storage::Storage;
use glam::Vec2;
use strata_gui_macros::WithBuilders;

/// Storage sub-keys for a frame's persisted scroll offset
pub const SCROLL_X_KEY: &str = "scroll_x";
pub const SCROLL_Y_KEY: &str = "scroll_y";
/// Storage sub-keys for the scroll range measured at a frame's last pop
pub const SCROLL_MAX_X_KEY: &str = "scroll_max_x";
pub const SCROLL_MAX_Y_KEY: &str = "scroll_max_y";

/// How a cell's extent along one axis is chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Use the caller's preferred (content) size
    #[default]
    Preferred,
    /// Take the remaining space in the row (or frame, vertically)
    Fill,
    /// Exactly `min`
    Explicit,
}

/// Size policy for one axis of a cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub mode: SizeMode,
    pub min: f32,
    pub max: f32,
    /// For `Fill`: leave this many pixels free after the cell
    pub up_to: f32,
}

impl Size {
    /// Size to the preferred (content) size
    pub const fn preferred() -> Self {
        Self {
            mode: SizeMode::Preferred,
            min: 0.0,
            max: f32::INFINITY,
            up_to: 0.0,
        }
    }

    /// Fill the remaining space, shared evenly with the row's remaining columns
    pub const fn fill() -> Self {
        Self {
            mode: SizeMode::Fill,
            min: 0.0,
            max: f32::INFINITY,
            up_to: 0.0,
        }
    }

    /// Fill the remaining space but keep `reserve` pixels free after the cell
    pub const fn fill_reserving(reserve: f32) -> Self {
        Self {
            mode: SizeMode::Fill,
            min: 0.0,
            max: f32::INFINITY,
            up_to: reserve,
        }
    }

    /// Exactly `pixels`
    pub const fn explicit(pixels: f32) -> Self {
        Self {
            mode: SizeMode::Explicit,
            min: pixels,
            max: pixels,
            up_to: 0.0,
        }
    }

    pub const fn with_min(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub const fn with_max(mut self, max: f32) -> Self {
        self.max = max;
        self
    }

    /// Resolve this policy along one axis.
    ///
    /// `used` is the space already consumed along the axis (column or row
    /// offset), `available` the frame's inner extent, `remaining_slots` how
    /// many cells still share the leftover space and `spacing` the gap between
    /// those cells.
    fn resolve(
        &self,
        preferred: f32,
        used: f32,
        available: f32,
        remaining_slots: usize,
        spacing: f32,
        allow_overflow: bool,
    ) -> f32 {
        let raw = match self.mode {
            SizeMode::Preferred => preferred,
            SizeMode::Explicit => self.min,
            SizeMode::Fill if self.up_to > 0.0 => available - used - self.up_to,
            SizeMode::Fill => {
                let slots = remaining_slots.max(1) as f32;
                (available - used - spacing * (slots - 1.0)) / slots
            }
        };

        // min wins over max when a caller inverts them
        let mut size = raw.min(self.max).max(self.min);
        if !allow_overflow {
            size = size.min(available - used);
        }
        size.max(0.0)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::preferred()
    }
}

/// Behaviour flags for a frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, WithBuilders)]
pub struct FrameOptions {
    /// Persist and clamp a scroll offset; accept wheel input
    pub scrollable: bool,
    /// Let cells extend past the frame's inner bounds
    pub overflow: bool,
}

impl FrameOptions {
    /// Cells are clamped to the frame
    pub const fn fixed() -> Self {
        Self {
            scrollable: false,
            overflow: false,
        }
    }

    /// Content may grow past the bounds and is scrolled into view
    pub const fn scroll() -> Self {
        Self {
            scrollable: true,
            overflow: true,
        }
    }
}

/// Cursor state of one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellCursor {
    pub row: usize,
    pub column_index: usize,
    pub column_offset: f32,
    pub row_offset: f32,
    pub row_height: f32,
    /// No cell has been placed yet
    fresh: bool,
    /// The next cell must start a new row even if the current one has room
    row_break: bool,
}

impl CellCursor {
    fn new() -> Self {
        Self {
            fresh: true,
            ..Default::default()
        }
    }
}

/// One nested rectangular layout/scroll region
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub id: Id,
    pub bounds: Rect,
    /// `bounds` intersected with every ancestor's clip
    pub clip: Rect,
    pub padding: Spacing,
    pub options: FrameOptions,
    pub scroll: Vec2,
    pub cursor: CellCursor,
    pub columns: usize,
    /// Widest column offset reached by any row
    content_width: f32,
}

impl Frame {
    fn new(id: Id, bounds: Rect, clip: Rect, padding: Spacing, options: FrameOptions, scroll: Vec2) -> Self {
        Self {
            id,
            bounds,
            clip,
            padding,
            options,
            scroll,
            cursor: CellCursor::new(),
            columns: 1,
            content_width: 0.0,
        }
    }

    /// Bounds minus padding, floored at zero
    pub fn inner_size(&self) -> Vec2 {
        (self.bounds.size() - self.padding.total()).max(Vec2::ZERO)
    }

    /// Extent of everything placed so far, padding included
    pub fn content_size(&self) -> Vec2 {
        Vec2::new(
            self.content_width + self.padding.horizontal(),
            self.cursor.row_offset + self.cursor.row_height + self.padding.vertical(),
        )
    }

    /// Largest scroll offset that still shows content on each axis
    pub fn max_scroll(&self) -> Vec2 {
        (self.content_size() - self.bounds.size()).max(Vec2::ZERO)
    }

    fn next_cell(&mut self, width: Size, height: Size, preferred: Vec2, indent: f32, spacing: f32) -> Rect {
        let inner = self.inner_size();
        let allow_overflow = self.options.overflow;
        let cursor = &mut self.cursor;

        if cursor.fresh {
            cursor.fresh = false;
            cursor.column_offset = indent;
        } else if cursor.column_index >= self.columns || cursor.row_break {
            cursor.row_offset += cursor.row_height + spacing;
            cursor.row += 1;
            cursor.column_offset = indent;
            cursor.column_index = 0;
            cursor.row_height = 0.0;
        }
        cursor.row_break = false;

        if cursor.column_index > 0 {
            cursor.column_offset += spacing;
        }

        let remaining_columns = self.columns.saturating_sub(cursor.column_index);
        let w = width.resolve(
            preferred.x,
            cursor.column_offset,
            inner.x,
            remaining_columns,
            spacing,
            allow_overflow,
        );
        // Rows are not declared up front, so a vertical fill takes everything below.
        let h = height.resolve(preferred.y, cursor.row_offset, inner.y, 1, spacing, allow_overflow);

        let min = self.bounds.min + self.padding.top_left()
            + Vec2::new(cursor.column_offset, cursor.row_offset)
            - self.scroll;

        cursor.column_offset += w;
        cursor.row_height = cursor.row_height.max(h);
        cursor.column_index += 1;
        self.content_width = self.content_width.max(cursor.column_offset);

        Rect::from_min_size(min, Vec2::new(w, h))
    }
}

/// Stack of open frames for one viewport
#[derive(Debug, Default)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame. Its clip is `bounds` intersected with the parent's clip,
    /// and a scrollable frame resumes the offset stored under `id`.
    pub fn push(&mut self, id: Id, bounds: Rect, padding: Spacing, options: FrameOptions, storage: &Storage) {
        let clip = match self.frames.last() {
            Some(parent) => parent.clip.intersect(&bounds),
            None => bounds,
        };

        let scroll = if options.scrollable {
            stored_scroll(storage, id)
        } else {
            Vec2::ZERO
        };

        log::trace!(
            "push frame {:?} depth={} bounds={:?} scroll={:?}",
            id,
            self.frames.len(),
            bounds,
            scroll
        );
        self.frames.push(Frame::new(id, bounds, clip, padding, options, scroll));
    }

    /// Close the innermost frame, clamping and persisting its scroll offset
    pub fn pop(&mut self, storage: &mut Storage) -> Result<Frame> {
        let mut frame = self.frames.pop().ok_or(LayoutError::FrameUnderflow)?;

        if frame.options.scrollable {
            let max = frame.max_scroll();
            frame.scroll = frame.scroll.max(Vec2::ZERO).min(max);
            storage.set_number(frame.id, SCROLL_X_KEY, frame.scroll.x);
            storage.set_number(frame.id, SCROLL_Y_KEY, frame.scroll.y);
            storage.set_number(frame.id, SCROLL_MAX_X_KEY, max.x);
            storage.set_number(frame.id, SCROLL_MAX_Y_KEY, max.y);
        }

        log::trace!(
            "pop frame {:?} content={:?} scroll={:?}",
            frame.id,
            frame.content_size(),
            frame.scroll
        );
        Ok(frame)
    }

    /// Place the next cell in the innermost frame. `None` when no frame is open.
    pub fn next_cell(&mut self, width: Size, height: Size, preferred: Vec2, indent: f32, spacing: f32) -> Option<Rect> {
        self.frames
            .last_mut()
            .map(|frame| frame.next_cell(width, height, preferred, indent, spacing))
    }

    /// Declare how many cells the following rows hold
    pub fn set_columns(&mut self, columns: usize) {
        if let Some(frame) = self.frames.last_mut() {
            frame.columns = columns.max(1);
            if frame.cursor.column_index > 0 {
                frame.cursor.row_break = true;
            }
        }
    }

    /// Finish the current row early
    pub fn new_row(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            if frame.cursor.column_index > 0 {
                frame.cursor.row_break = true;
            }
        }
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Clip of the innermost frame
    pub fn clip(&self) -> Option<Rect> {
        self.frames.last().map(|frame| frame.clip)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Scrollable frames under `point`, innermost last
    pub fn scrollable_at(&self, point: Vec2) -> impl Iterator<Item = &Frame> {
        self.frames
            .iter()
            .filter(move |frame| frame.options.scrollable && frame.clip.contains(point))
    }

    /// Drop every open frame without persisting anything
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Add `delta` to the scroll offset stored for frame `id`.
///
/// The result is clamped to the range the frame measured at its last pop, so
/// the next layout never starts past either end. A frame that was never popped
/// is only clamped at zero until its first pop.
pub fn scroll_by(storage: &mut Storage, id: Id, delta: Vec2) {
    let offset = Vec2::new(
        storage.get_number(id, SCROLL_X_KEY, 0.0),
        storage.get_number(id, SCROLL_Y_KEY, 0.0),
    );
    let scroll = clamp_scroll(storage, id, offset + delta);
    storage.set_number(id, SCROLL_X_KEY, scroll.x);
    storage.set_number(id, SCROLL_Y_KEY, scroll.y);
}

/// Stored offset of frame `id`, kept inside its last measured range
fn stored_scroll(storage: &Storage, id: Id) -> Vec2 {
    let offset = Vec2::new(
        storage.get_number(id, SCROLL_X_KEY, 0.0),
        storage.get_number(id, SCROLL_Y_KEY, 0.0),
    );
    clamp_scroll(storage, id, offset)
}

fn clamp_scroll(storage: &Storage, id: Id, offset: Vec2) -> Vec2 {
    let max = Vec2::new(
        storage.get_number(id, SCROLL_MAX_X_KEY, f32::INFINITY),
        storage.get_number(id, SCROLL_MAX_Y_KEY, f32::INFINITY),
    );
    offset.max(Vec2::ZERO).min(max)
}
