//! Hot/active pointer-target resolution for one viewport
//!
//! - **hot**: the widget under the pointer, i.e. the topmost candidate
//!   registered during the previous step.
//! - **active**: the widget that captured the pointer on press. It stays active
//!   while the button is held, wherever the pointer goes, and is released on
//!   the step the button goes up.
//!
//! Hover is promoted with one step of latency: candidates register while
//! widgets are drawn, and only after every widget of the step has been seen
//! does [`InteractionTracker::commit`] decide which of them was on top. This
//! avoids a later-drawn widget having to retract an earlier widget's hover
//! within the same step.

use crate::id::Id;
use crate::input::ButtonEdges;
use crate::primitives::Rect;
use glam::Vec2;

/// Layer of normal widgets. Popups and other floating regions use higher layers.
pub const BASE_LAYER: i32 = 0;

/// Layer scratch value before any candidate registered this step. Every layer
/// compares `>=` to it, negative ones included.
pub(crate) const NO_LAYER: i32 = i32::MIN;

/// Pointer context for one interaction query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerQuery {
    /// Pointer in viewport-local coordinates
    pub pointer: Option<Vec2>,
    pub edges: ButtonEdges,
    /// Clip of the frame owning the queried rect
    pub clip: Rect,
    pub layer: i32,
    pub obstructed: bool,
}

impl PointerQuery {
    /// Whether the pointer is over `rect` and visible through the clip
    pub fn is_over(&self, rect: &Rect) -> bool {
        match self.pointer {
            Some(p) => !self.obstructed && rect.contains(p) && self.clip.contains(p),
            None => false,
        }
    }
}

/// Outcome of [`InteractionTracker::button_behaviour`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonResponse {
    /// Pointer is over the rect this step (geometrically, inside the clip)
    pub hovered: bool,
    /// The widget captured the pointer this step
    pub pressed: bool,
    /// The widget holds the capture after this step
    pub held: bool,
    /// Released over the widget after being pressed on it
    pub clicked: bool,
}

/// Hot/active state of one viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionTracker {
    hot: Id,
    active: Id,
    next_hot: Id,
    next_hot_layer: i32,
}

impl Default for InteractionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionTracker {
    pub const fn new() -> Self {
        Self {
            hot: Id::NONE,
            active: Id::NONE,
            next_hot: Id::NONE,
            next_hot_layer: NO_LAYER,
        }
    }

    pub fn hot(&self) -> Id {
        self.hot
    }

    pub fn active(&self) -> Id {
        self.active
    }

    /// Candidate that will become hot at the next commit
    pub fn next_hot(&self) -> Id {
        self.next_hot
    }

    /// Reset the per-step promotion scratch
    pub fn begin_step(&mut self) {
        self.next_hot = Id::NONE;
        self.next_hot_layer = NO_LAYER;
    }

    /// Offer `rect` as the widget under the pointer.
    ///
    /// Higher layers beat lower ones; within a layer the last registered
    /// candidate wins. Returns whether the pointer is over the rect.
    pub fn register_candidate(&mut self, id: Id, rect: &Rect, query: &PointerQuery) -> bool {
        let over = query.is_over(rect);
        if over && id.is_some() && query.layer >= self.next_hot_layer {
            self.next_hot = id;
            self.next_hot_layer = query.layer;
        }
        over
    }

    /// Press/release handling for a clickable widget
    pub fn button_behaviour(&mut self, id: Id, rect: &Rect, query: &PointerQuery) -> ButtonResponse {
        let hovered = self.register_candidate(id, rect, query);
        let mut response = ButtonResponse {
            hovered,
            ..Default::default()
        };

        if id.is_none() {
            return response;
        }

        if self.active.is_none() && query.edges.pressed && self.hot == id {
            self.active = id;
            response.pressed = true;
        }

        if self.active == id && query.edges.released {
            self.active = Id::NONE;
            response.clicked = hovered && self.hot == id;
        }

        response.held = self.active == id;
        response
    }

    /// Promote this step's topmost candidate to hot.
    ///
    /// A capture whose owner was not queried on the release step is dropped
    /// here so `active` never outlives the held button.
    pub fn commit(&mut self, edges: ButtonEdges) {
        self.hot = self.next_hot;
        if !edges.down && self.active.is_some() {
            log::trace!("releasing orphaned capture {:?}", self.active);
            self.active = Id::NONE;
        }
    }

    /// Drop hot and active, e.g. when a viewport loses its surface
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn query(pointer: Vec2, was_down: bool, is_down: bool) -> PointerQuery {
        PointerQuery {
            pointer: Some(pointer),
            edges: ButtonEdges::between(was_down, is_down),
            clip: rect(0.0, 0.0, 1000.0, 1000.0),
            layer: BASE_LAYER,
            obstructed: false,
        }
    }

    /// One step with a single button; returns the response.
    fn step(tracker: &mut InteractionTracker, id: Id, r: &Rect, q: PointerQuery) -> ButtonResponse {
        tracker.begin_step();
        let response = tracker.button_behaviour(id, r, &q);
        tracker.commit(q.edges);
        response
    }

    #[test]
    fn test_hover_has_one_step_latency() {
        let mut tracker = InteractionTracker::new();
        let x = Id::root("x");
        let r = rect(0.0, 0.0, 10.0, 10.0);

        tracker.begin_step();
        tracker.button_behaviour(x, &r, &query(Vec2::splat(5.0), false, false));
        assert_eq!(tracker.hot(), Id::NONE);
        tracker.commit(ButtonEdges::default());
        assert_eq!(tracker.hot(), x);
    }

    #[test]
    fn test_click_triggers_on_release_step_only() {
        let mut tracker = InteractionTracker::new();
        let x = Id::root("x");
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let inside = Vec2::splat(5.0);

        assert!(!step(&mut tracker, x, &r, query(inside, false, false)).clicked);
        let press = step(&mut tracker, x, &r, query(inside, false, true));
        assert!(press.pressed && !press.clicked);
        assert_eq!(tracker.active(), x);

        assert!(step(&mut tracker, x, &r, query(inside, true, false)).clicked);
        assert_eq!(tracker.active(), Id::NONE);
        assert!(!step(&mut tracker, x, &r, query(inside, false, false)).clicked);
    }

    #[test]
    fn test_drag_out_cancels() {
        let mut tracker = InteractionTracker::new();
        let x = Id::root("x");
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let outside = Vec2::splat(50.0);

        step(&mut tracker, x, &r, query(Vec2::splat(5.0), false, false));
        step(&mut tracker, x, &r, query(Vec2::splat(5.0), false, true));

        let dragged = step(&mut tracker, x, &r, query(outside, true, true));
        assert!(dragged.held);
        assert_eq!(tracker.active(), x);
        assert_eq!(tracker.hot(), Id::NONE);

        let released = step(&mut tracker, x, &r, query(outside, true, false));
        assert!(!released.clicked);
        assert_eq!(tracker.active(), Id::NONE);
    }

    #[test]
    fn test_press_without_hover_does_not_capture() {
        let mut tracker = InteractionTracker::new();
        let x = Id::root("x");
        let r = rect(0.0, 0.0, 10.0, 10.0);

        // Pointer arrives and presses in the same step: not hot yet.
        let response = step(&mut tracker, x, &r, query(Vec2::splat(5.0), false, true));
        assert!(!response.pressed);
        assert_eq!(tracker.active(), Id::NONE);
    }

    #[test]
    fn test_last_drawn_wins_within_layer() {
        let mut tracker = InteractionTracker::new();
        let a = Id::root("a");
        let b = Id::root("b");
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let q = query(Vec2::splat(5.0), false, false);

        tracker.begin_step();
        tracker.register_candidate(a, &r, &q);
        tracker.register_candidate(b, &r, &q);
        tracker.commit(q.edges);
        assert_eq!(tracker.hot(), b);
    }

    #[test]
    fn test_higher_layer_wins_regardless_of_order() {
        let mut tracker = InteractionTracker::new();
        let popup = Id::root("popup");
        let below = Id::root("below");
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let base = query(Vec2::splat(5.0), false, false);
        let raised = PointerQuery { layer: 2, ..base };

        tracker.begin_step();
        tracker.register_candidate(popup, &r, &raised);
        tracker.register_candidate(below, &r, &base);
        tracker.commit(base.edges);
        assert_eq!(tracker.hot(), popup);
    }

    #[test]
    fn test_negative_layer_can_become_hot() {
        let mut tracker = InteractionTracker::new();
        let backdrop = Id::root("backdrop");
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let sunk = PointerQuery {
            layer: -2,
            ..query(Vec2::splat(5.0), false, false)
        };

        for _ in 0..3 {
            tracker.begin_step();
            assert!(tracker.register_candidate(backdrop, &r, &sunk));
            tracker.commit(sunk.edges);
        }
        assert_eq!(tracker.hot(), backdrop);

        // Still loses to the base layer
        tracker.begin_step();
        tracker.register_candidate(Id::root("above"), &r, &query(Vec2::splat(5.0), false, false));
        tracker.register_candidate(backdrop, &r, &sunk);
        tracker.commit(sunk.edges);
        assert_eq!(tracker.hot(), Id::root("above"));
    }

    #[test]
    fn test_clip_and_obstruction_block_hover() {
        let mut tracker = InteractionTracker::new();
        let x = Id::root("x");
        let r = rect(0.0, 0.0, 10.0, 10.0);

        let clipped = PointerQuery {
            clip: rect(20.0, 20.0, 10.0, 10.0),
            ..query(Vec2::splat(5.0), false, false)
        };
        tracker.begin_step();
        assert!(!tracker.register_candidate(x, &r, &clipped));

        let obstructed = PointerQuery {
            obstructed: true,
            ..query(Vec2::splat(5.0), false, false)
        };
        assert!(!tracker.register_candidate(x, &r, &obstructed));
        tracker.commit(ButtonEdges::default());
        assert_eq!(tracker.hot(), Id::NONE);
    }

    #[test]
    fn test_capture_released_when_owner_disappears() {
        let mut tracker = InteractionTracker::new();
        let x = Id::root("x");
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let inside = Vec2::splat(5.0);

        step(&mut tracker, x, &r, query(inside, false, false));
        step(&mut tracker, x, &r, query(inside, false, true));
        assert_eq!(tracker.active(), x);

        // The widget is not drawn on the release step.
        tracker.begin_step();
        tracker.commit(ButtonEdges::between(true, false));
        assert_eq!(tracker.active(), Id::NONE);
    }

    #[test]
    fn test_only_one_widget_captures() {
        let mut tracker = InteractionTracker::new();
        let a = Id::root("a");
        let b = Id::root("b");
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let hover = query(Vec2::splat(5.0), false, false);
        let press = query(Vec2::splat(5.0), false, true);

        tracker.begin_step();
        tracker.button_behaviour(a, &r, &hover);
        tracker.button_behaviour(b, &r, &hover);
        tracker.commit(hover.edges);

        tracker.begin_step();
        let ra = tracker.button_behaviour(a, &r, &press);
        let rb = tracker.button_behaviour(b, &r, &press);
        tracker.commit(press.edges);

        assert!(!ra.pressed);
        assert!(rb.pressed);
        assert_eq!(tracker.active(), b);
    }
}
