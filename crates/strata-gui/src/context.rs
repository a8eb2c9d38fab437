//! The engine instance that owns everything persistent
//!
//! A [`Context`] holds the widget [`Storage`], the per-viewport interaction
//! state and the host's font metrics. One rendered frame looks like:
//!
//! ```
//! use std::sync::Arc;
//! use strata_gui::{Context, DrawList, PointerState, Rect, Size, Spacing, Theme};
//! use glam::Vec2;
//!
//! let mut ctx = Context::default();
//! let theme = Arc::new(Theme::default());
//! let mut surface = DrawList::new(Rect::from_min_size(Vec2::ZERO, Vec2::new(320.0, 240.0)));
//!
//! ctx.step(&PointerState::at(Vec2::new(20.0, 20.0)));
//! let mut ui = ctx.begin_viewport("main", &mut surface, theme);
//! let id = ui.id("ok");
//! let label = ui.text("OK");
//! let rect = ui.cell(Size::preferred(), Size::preferred(), &label, Spacing::all(4.0));
//! let clicked = ui.button_behaviour(id, rect);
//! ui.end().expect("balanced frame");
//! # assert!(!clicked);
//! ```

use crate::id::{Id, IdName};
use crate::input::{InputFrame, PointerState};
use crate::measure::{FontMetrics, MonospaceMetrics};
use crate::storage::Storage;
use crate::style::Theme;
use crate::surface::DrawSurface;
use crate::ui::Ui;
use crate::viewport::Viewport;
use ahash::AHashMap;
use std::sync::Arc;

pub struct Context {
    /// Number of completed `step` calls
    frame_index: u64,

    /// Pointer snapshot for the current step
    input: InputFrame,

    /// Widget state shared by every viewport
    storage: Storage,

    /// Viewports keyed by their root id
    pub(crate) viewports: AHashMap<Id, Viewport>,

    fonts: Box<dyn FontMetrics>,
}

impl Context {
    /// Create a context measuring text with the host's font metrics
    pub fn new(fonts: impl FontMetrics + 'static) -> Self {
        Self {
            frame_index: 0,
            input: InputFrame::default(),
            storage: Storage::new(),
            viewports: AHashMap::new(),
            fonts: Box::new(fonts),
        }
    }

    // ========== Frame Lifecycle ==========

    /// Advance to the next rendered frame.
    ///
    /// Computes the pointer delta and press/release edges from `pointer` and
    /// clears every viewport's hover promotion scratch.
    pub fn step(&mut self, pointer: &PointerState) {
        self.frame_index += 1;
        self.input = self.input.advance(pointer);
        for viewport in self.viewports.values_mut() {
            viewport.begin_step();
        }
        log::trace!(
            "step {} pointer={:?} edges={:?}",
            self.frame_index,
            self.input.position,
            self.input.edges
        );
    }

    /// Start drawing one viewport.
    ///
    /// The viewport named `name` is created on first use and reused after
    /// that. Its root frame spans the surface's bounds in local logical units.
    /// Call [`Ui::end`] when every widget of the viewport has been drawn.
    pub fn begin_viewport<'a, 'n>(
        &'a mut self,
        name: impl Into<IdName<'n>>,
        surface: &'a mut dyn DrawSurface,
        theme: impl Into<Arc<Theme>>,
    ) -> Ui<'a> {
        let id = Id::root(name);
        let mut viewport = self.viewports.remove(&id).unwrap_or_else(|| {
            log::debug!("creating viewport {:?}", id);
            Viewport::new(id)
        });

        if viewport.last_step == self.frame_index && self.frame_index > 0 {
            log::warn!("viewport {:?} begun twice in step {}", id, self.frame_index);
        }
        viewport.last_step = self.frame_index;
        viewport.attach(surface.bounds(), surface.scale_factor(), &self.input);

        Ui::new(self, viewport, surface, theme.into())
    }

    /// Forget a viewport's interaction state. Its storage entries are kept.
    pub fn remove_viewport<'n>(&mut self, name: impl Into<IdName<'n>>) -> bool {
        let removed = self.viewports.remove(&Id::root(name));
        if let Some(viewport) = &removed {
            log::debug!("removed viewport {:?}", viewport.id);
        }
        removed.is_some()
    }

    /// Mark a viewport as covered by something the host draws on top of it.
    ///
    /// The mark applies from the next `begin_viewport` until cleared. The
    /// viewport is created if it does not exist yet.
    pub fn set_viewport_obstructed<'n>(&mut self, name: impl Into<IdName<'n>>, obstructed: bool) {
        let id = Id::root(name);
        let viewport = self.viewports.entry(id).or_insert_with(|| {
            log::debug!("creating viewport {:?}", id);
            Viewport::new(id)
        });
        viewport.host_obstructed = obstructed;
    }

    pub fn viewport<'n>(&self, name: impl Into<IdName<'n>>) -> Option<&Viewport> {
        self.viewports.get(&Id::root(name))
    }

    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    // ========== Accessors ==========

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn input(&self) -> &InputFrame {
        &self.input
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    pub fn fonts(&self) -> &dyn FontMetrics {
        self.fonts.as_ref()
    }

    /// Replace the font metrics (e.g. after the host reloads fonts)
    pub fn set_fonts(&mut self, fonts: impl FontMetrics + 'static) {
        self.fonts = Box::new(fonts);
    }
}

impl Default for Context {
    /// A context with [`MonospaceMetrics`], for headless use
    fn default() -> Self {
        Self::new(MonospaceMetrics::default())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("frame_index", &self.frame_index)
            .field("storage", &self.storage)
            .field("viewports", &self.viewports.len())
            .finish()
    }
}
