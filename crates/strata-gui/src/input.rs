//! Backend-agnostic pointer input
//!
//! The host fills a [`PointerState`] from its windowing library every frame and
//! hands it to [`Context::step`](crate::Context::step). Press and release edges
//! are derived by comparing against the previous frame, so hosts only report
//! levels.

use glam::Vec2;

/// What the platform reports for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Pointer position in screen space, `None` when it left every window
    pub position: Option<Vec2>,
    /// Primary button held
    pub down: bool,
    /// Wheel movement this frame in pixels. Positive y moves toward the top of
    /// the content, i.e. it decreases the scroll offset
    pub wheel: Vec2,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl PointerState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn with_down(mut self, down: bool) -> Self {
        self.down = down;
        self
    }

    pub fn with_wheel(mut self, wheel: Vec2) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }
}

/// Press/release transitions of the primary button within one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdges {
    /// Went from up to down this step
    pub pressed: bool,
    /// Went from down to up this step
    pub released: bool,
    /// Currently held
    pub down: bool,
}

impl ButtonEdges {
    pub fn between(was_down: bool, is_down: bool) -> Self {
        Self {
            pressed: !was_down && is_down,
            released: was_down && !is_down,
            down: is_down,
        }
    }
}

/// Per-step input snapshot kept by the context
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub position: Option<Vec2>,
    /// Movement since the previous step (zero when either end is unknown)
    pub delta: Vec2,
    pub edges: ButtonEdges,
    pub wheel: Vec2,
    pub dt: f32,
}

impl InputFrame {
    /// Fold a new platform report into the snapshot of the previous step
    pub fn advance(&self, state: &PointerState) -> Self {
        let delta = match (self.position, state.position) {
            (Some(prev), Some(now)) => now - prev,
            _ => Vec2::ZERO,
        };

        Self {
            position: state.position,
            delta,
            edges: ButtonEdges::between(self.edges.down, state.down),
            wheel: state.wheel,
            dt: state.dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        assert_eq!(
            ButtonEdges::between(false, true),
            ButtonEdges { pressed: true, released: false, down: true }
        );
        assert_eq!(
            ButtonEdges::between(true, false),
            ButtonEdges { pressed: false, released: true, down: false }
        );
        assert_eq!(
            ButtonEdges::between(true, true),
            ButtonEdges { pressed: false, released: false, down: true }
        );
    }

    #[test]
    fn test_advance_computes_delta() {
        let first = InputFrame::default().advance(&PointerState::at(Vec2::new(10.0, 10.0)));
        assert_eq!(first.delta, Vec2::ZERO);

        let second = first.advance(&PointerState::at(Vec2::new(14.0, 7.0)).with_down(true));
        assert_eq!(second.delta, Vec2::new(4.0, -3.0));
        assert!(second.edges.pressed);

        let gone = second.advance(&PointerState::default());
        assert_eq!(gone.delta, Vec2::ZERO);
        assert!(gone.edges.released);
    }
}
