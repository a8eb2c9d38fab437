use crate::id::Id;
use crate::input::InputFrame;
use crate::interaction::{InteractionTracker, NO_LAYER};
use crate::primitives::Rect;
use glam::Vec2;

/// Persistent state of one independent pointer-interaction domain.
///
/// Created on the first `begin_viewport` with a given name and reused on every
/// later frame.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    pub id: Id,
    /// Screen-space bounds reported by the surface
    pub bounds: Rect,
    pub scale: f32,
    /// Pointer in viewport-local logical coordinates
    pub pointer: Option<Vec2>,
    pub pointer_delta: Vec2,
    /// Blocks hover for the current step (e.g. a host window covers this one)
    pub obstructed: bool,
    /// Mark set through `Context::set_viewport_obstructed`; seeds `obstructed` each step
    pub(crate) host_obstructed: bool,
    pub(crate) tracker: InteractionTracker,
    /// Scrollable frame that receives wheel input this step
    pub(crate) hot_scroll: Id,
    pub(crate) next_hot_scroll: Id,
    pub(crate) next_hot_scroll_layer: i32,
    /// Step in which the viewport was last begun
    pub(crate) last_step: u64,
}

impl Viewport {
    pub(crate) fn new(id: Id) -> Self {
        Self {
            id,
            scale: 1.0,
            next_hot_scroll_layer: NO_LAYER,
            ..Default::default()
        }
    }

    pub fn hot(&self) -> Id {
        self.tracker.hot()
    }

    pub fn active(&self) -> Id {
        self.tracker.active()
    }

    pub fn hot_scroll(&self) -> Id {
        self.hot_scroll
    }

    /// Size of the viewport in local logical units
    pub fn logical_size(&self) -> Vec2 {
        self.bounds.size() / self.scale.max(f32::EPSILON)
    }

    pub(crate) fn begin_step(&mut self) {
        self.tracker.begin_step();
        self.next_hot_scroll = Id::NONE;
        self.next_hot_scroll_layer = NO_LAYER;
    }

    /// Take a fresh surface description and map the global pointer into local space
    pub(crate) fn attach(&mut self, bounds: Rect, scale: f32, input: &InputFrame) {
        self.bounds = bounds;
        self.scale = if scale > 0.0 { scale } else { 1.0 };
        self.pointer = input
            .position
            .map(|p| (p - bounds.min) / self.scale);
        self.pointer_delta = input.delta / self.scale;
        self.obstructed = self.host_obstructed;
    }

    pub(crate) fn offer_scroll(&mut self, id: Id, layer: i32) {
        if layer >= self.next_hot_scroll_layer {
            self.next_hot_scroll = id;
            self.next_hot_scroll_layer = layer;
        }
    }

    pub(crate) fn commit(&mut self, input: &InputFrame) {
        self.tracker.commit(input.edges);
        self.hot_scroll = self.next_hot_scroll;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerState;

    #[test]
    fn test_attach_maps_pointer_to_local_space() {
        let mut viewport = Viewport::new(Id::root("main"));
        let input = InputFrame::default().advance(&PointerState::at(Vec2::new(140.0, 60.0)));
        let bounds = Rect::from_min_size(Vec2::new(100.0, 20.0), Vec2::new(400.0, 300.0));

        viewport.attach(bounds, 2.0, &input);

        assert_eq!(viewport.pointer, Some(Vec2::new(20.0, 20.0)));
        assert_eq!(viewport.logical_size(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_host_mark_survives_attach() {
        let mut viewport = Viewport::new(Id::root("main"));
        viewport.host_obstructed = true;
        viewport.attach(Rect::ZERO, 1.0, &InputFrame::default());
        assert!(viewport.obstructed);

        viewport.host_obstructed = false;
        viewport.obstructed = true;
        viewport.attach(Rect::ZERO, 1.0, &InputFrame::default());
        assert!(!viewport.obstructed);
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        let mut viewport = Viewport::new(Id::root("main"));
        viewport.attach(Rect::ZERO, 0.0, &InputFrame::default());
        assert_eq!(viewport.scale, 1.0);
        assert_eq!(viewport.pointer, None);
    }
}
