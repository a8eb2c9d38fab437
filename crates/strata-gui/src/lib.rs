//! # strata-gui
//!
//! Immediate-mode GUI kernel.
//!
//! Widgets are plain function calls made every frame. Each call asks the
//! layout for its next cell, hashes a stable identifier to look up persistent
//! state, and asks the interaction tracker whether the pointer is over it.
//! Rendering goes through the [`DrawSurface`] trait, so the kernel has no
//! dependency on any graphics API.
//!
//! ## Core Types
//!
//! - [`Context`] - Owns storage, viewports and font metrics across frames
//! - [`Ui`] - Per-viewport handle returned by [`Context::begin_viewport`]
//! - [`Id`] - Stable widget identity derived from a name and a parent id
//!
//! ## Layout
//!
//! - [`FrameStack`] / [`Frame`] - Nested clip and scroll regions
//! - [`Size`] - Preferred, fill and explicit cell sizing
//!
//! ## Interaction & State
//!
//! - [`InteractionTracker`] - Hot/active resolution with layered hover
//! - [`Storage`] - Per-widget bool, number and id values
//!
//! ## Styling & Output
//!
//! - [`Theme`] / [`WidgetStyle`] - Immutable per-viewport style data
//! - [`Content`] - What a cell displays
//! - [`DrawList`] - Recording [`DrawSurface`] for headless hosts and tests

mod color;
mod content;
mod context;
mod error;
mod id;
mod input;
mod interaction;
mod layout;
mod measure;
mod primitives;
mod storage;
mod style;
mod surface;
mod ui;
mod viewport;

pub use color::*;
pub use content::*;
pub use context::*;
pub use error::*;
pub use id::*;
pub use input::*;
pub use interaction::*;
pub use layout::*;
pub use measure::*;
pub use primitives::*;
pub use storage::*;
pub use style::*;
pub use surface::*;
pub use ui::*;
pub use viewport::*;

pub use glam::{Affine2, Vec2};
pub use strata_gui_macros::WithBuilders;
