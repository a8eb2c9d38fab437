//! Style selection and the theme passed into each viewport.
//!
//! Styles are plain data. A widget owns (or borrows from the [`Theme`]) a
//! [`WidgetStyle`] with one [`StyleRecord`] per interaction phase and asks it
//! for the record matching the current hot/active ids. Nothing here is global:
//! two viewports can run with different themes in the same frame.

use crate::color::{palette, Color};
use crate::id::Id;
use crate::measure::FontId;
use crate::primitives::Spacing;
use strata_gui_macros::WithBuilders;

/// Which style record applies to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Hot,
    Active,
}

impl InteractionPhase {
    /// Active wins over hot, hot over idle
    pub fn resolve(active: Id, hot: Id, id: Id) -> Self {
        if id.is_some() && active == id {
            InteractionPhase::Active
        } else if id.is_some() && hot == id {
            InteractionPhase::Hot
        } else {
            InteractionPhase::Idle
        }
    }
}

/// Visual properties for one phase
#[derive(Debug, Clone, Copy, PartialEq, WithBuilders)]
pub struct StyleRecord {
    pub background: Color,
    pub content: Color,
    pub padding: Spacing,
}

impl StyleRecord {
    pub const fn new(background: Color, content: Color, padding: Spacing) -> Self {
        Self {
            background,
            content,
            padding,
        }
    }
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self::new(Color::TRANSPARENT, palette::TEXT, Spacing::ZERO)
    }
}

/// Idle/hot/active records for a kind of widget
#[derive(Debug, Clone, Copy, PartialEq, Default, WithBuilders)]
pub struct WidgetStyle {
    pub idle: StyleRecord,
    pub hot: StyleRecord,
    pub active: StyleRecord,
}

impl WidgetStyle {
    /// Same record in every phase
    pub const fn uniform(record: StyleRecord) -> Self {
        Self {
            idle: record,
            hot: record,
            active: record,
        }
    }

    pub fn get(&self, phase: InteractionPhase) -> &StyleRecord {
        match phase {
            InteractionPhase::Idle => &self.idle,
            InteractionPhase::Hot => &self.hot,
            InteractionPhase::Active => &self.active,
        }
    }

    /// Record for `id` given the viewport's current active and hot ids
    pub fn current(&self, active: Id, hot: Id, id: Id) -> &StyleRecord {
        self.get(InteractionPhase::resolve(active, hot, id))
    }
}

/// Immutable style configuration for a viewport
#[derive(Debug, Clone, PartialEq, WithBuilders)]
pub struct Theme {
    /// Gap between cells, horizontally and vertically
    pub spacing: f32,
    /// Added to the row start by each `indent()`
    pub indent_width: f32,
    pub font: FontId,
    pub text_size: f32,
    /// Padding of the viewport's root frame
    pub root_padding: Spacing,
    /// Background of frames drawn with `draw_box`
    pub frame: WidgetStyle,
    pub button: WidgetStyle,
    /// Multiplier applied to wheel deltas before they reach a scroll frame
    pub scroll_speed: f32,
}

impl Default for Theme {
    fn default() -> Self {
        let button_padding = Spacing::symmetric(8.0, 4.0);
        Self {
            spacing: 4.0,
            indent_width: 16.0,
            font: FontId::default(),
            text_size: 14.0,
            root_padding: Spacing::all(6.0),
            frame: WidgetStyle::uniform(StyleRecord::new(palette::BASE, palette::TEXT, Spacing::all(4.0))),
            button: WidgetStyle {
                idle: StyleRecord::new(palette::RAISED, palette::TEXT, button_padding),
                hot: StyleRecord::new(palette::HOVER, palette::TEXT, button_padding),
                active: StyleRecord::new(palette::PRESSED, palette::ACCENT, button_padding),
            },
            scroll_speed: 1.0,
        }
    }
}
