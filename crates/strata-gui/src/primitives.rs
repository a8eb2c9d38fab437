use glam::Vec2;

/// Axis-aligned rectangle defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const ZERO: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True when the rect has no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is inside this rectangle (min inclusive, max exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Intersection of two rects.
    ///
    /// Disjoint rects produce an empty rect anchored inside `self` rather than
    /// `None`, so a clip chain stays well-defined (and contains no point).
    pub fn intersect(&self, other: &Rect) -> Rect {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max).max(min);
        Rect { min, max }
    }

    /// Shrink by padding on each side; never inverts.
    pub fn shrink(&self, padding: Spacing) -> Rect {
        let min = Vec2::new(self.min.x + padding.left, self.min.y + padding.top);
        let max = Vec2::new(self.max.x - padding.right, self.max.y - padding.bottom);
        Rect {
            min,
            max: max.max(min),
        }
    }

    pub fn translate(&self, offset: Vec2) -> Rect {
        Rect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Padding around content
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    pub const ZERO: Self = Self::all(0.0);

    /// Create spacing with all sides equal
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric horizontal and vertical values (CSS-style)
    ///
    /// ```
    /// # use strata_gui::Spacing;
    /// let spacing = Spacing::symmetric(10.0, 20.0);
    /// assert_eq!(spacing.left, 10.0);
    /// assert_eq!(spacing.top, 20.0);
    /// assert_eq!(spacing.horizontal(), 20.0);
    /// ```
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub const fn trbl(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Left + right
    pub const fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom
    pub const fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn total(&self) -> Vec2 {
        Vec2::new(self.horizontal(), self.vertical())
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let b = Rect::new(Vec2::new(50.0, 25.0), Vec2::new(150.0, 75.0));
        let clip = a.intersect(&b);
        assert_eq!(clip, Rect::new(Vec2::new(50.0, 25.0), Vec2::new(100.0, 75.0)));
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(20.0), Vec2::splat(30.0));
        let clip = a.intersect(&b);
        assert!(clip.is_empty());
        assert!(!clip.contains(Vec2::splat(20.0)));
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::from_min_size(Vec2::ZERO, Vec2::splat(10.0));
        assert!(r.contains(Vec2::ZERO));
        assert!(r.contains(Vec2::splat(9.99)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn test_shrink_never_inverts() {
        let r = Rect::from_min_size(Vec2::ZERO, Vec2::new(10.0, 4.0));
        let inner = r.shrink(Spacing::all(3.0));
        assert_eq!(inner.width(), 4.0);
        assert_eq!(inner.height(), 0.0);
    }
}
