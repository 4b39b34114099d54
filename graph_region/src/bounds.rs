// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo;

use crate::math::Vec2;

/// Axis-aligned bounding box in three dimensions.
///
/// A freshly created or [reset](Aabb::reset) box is empty: its low corner is
/// at `f32::MAX` and its high corner at `-f32::MAX`, so the first
/// [`resize`](Aabb::resize) snaps both corners onto the given point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub low: [f32; 3],
    /// Maximum corner.
    pub high: [f32; 3],
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new()
    }
}

impl Aabb {
    /// Creates an empty box.
    pub const fn new() -> Self {
        Self {
            low: [f32::MAX; 3],
            high: [-f32::MAX; 3],
        }
    }

    /// Creates a box spanning the two given corners.
    pub fn from_corners(a: [f32; 3], b: [f32; 3]) -> Self {
        let mut aabb = Self::new();
        aabb.resize(a);
        aabb.resize(b);
        aabb
    }

    /// Creates a flat box at `z = 0` from a kurbo rectangle.
    pub fn from_rect(rect: kurbo::Rect) -> Self {
        let rect = rect.abs();
        Self {
            low: [rect.x0 as f32, rect.y0 as f32, 0.0],
            high: [rect.x1 as f32, rect.y1 as f32, 0.0],
        }
    }

    /// Returns the XY extent as a kurbo rectangle, or `None` if the box is empty.
    pub fn to_rect(&self) -> Option<kurbo::Rect> {
        (!self.is_empty()).then(|| {
            kurbo::Rect::new(
                self.low[0] as f64,
                self.low[1] as f64,
                self.high[0] as f64,
                self.high[1] as f64,
            )
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if no point has been folded into the box.
    pub fn is_empty(&self) -> bool {
        self.low[0] > self.high[0] || self.low[1] > self.high[1] || self.low[2] > self.high[2]
    }

    /// Grows the box to include `point`.
    #[inline]
    pub fn resize(&mut self, point: [f32; 3]) {
        for axis in 0..3 {
            self.low[axis] = self.low[axis].min(point[axis]);
            self.high[axis] = self.high[axis].max(point[axis]);
        }
    }

    /// Grows the box to include `other`.
    pub fn resize_aabb(&mut self, other: &Self) {
        if !other.is_empty() {
            self.resize(other.low);
            self.resize(other.high);
        }
    }

    pub fn contains_point(&self, point: [f32; 3]) -> bool {
        (0..3).all(|axis| self.low[axis] <= point[axis] && point[axis] <= self.high[axis])
    }

    /// Returns `true` if `other` lies fully inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        !other.is_empty() && self.contains_point(other.low) && self.contains_point(other.high)
    }

    pub fn width(&self) -> f32 {
        self.extent(0)
    }

    pub fn height(&self) -> f32 {
        self.extent(1)
    }

    pub fn depth(&self) -> f32 {
        self.extent(2)
    }

    /// XY center of the box.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.low[0] + self.high[0]) * 0.5,
            (self.low[1] + self.high[1]) * 0.5,
        )
    }

    /// The eight corners, used for plane classification.
    pub fn corners(&self) -> [[f32; 3]; 8] {
        let [lx, ly, lz] = self.low;
        let [hx, hy, hz] = self.high;
        [
            [lx, ly, lz],
            [hx, ly, lz],
            [lx, hy, lz],
            [hx, hy, lz],
            [lx, ly, hz],
            [hx, ly, hz],
            [lx, hy, hz],
            [hx, hy, hz],
        ]
    }

    fn extent(&self, axis: usize) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.high[axis] - self.low[axis]
        }
    }
}

impl std::fmt::Display for Aabb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "[empty]");
        }
        write!(
            f,
            "[{} x {} x {}, low {:?}, high {:?}]",
            self.width(),
            self.height(),
            self.depth(),
            self.low,
            self.high
        )
    }
}
