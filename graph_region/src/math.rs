// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector and affine transform helpers used while accumulating shapes.

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use peniko::kurbo;

use crate::Aabb;

/// Tolerance used for the fuzzy comparisons of [`Vec2`].
pub const EPSILON: f32 = f32::EPSILON;

/// Two dimensional vector.
///
/// Components can be addressed by index, where `0` is `x` and `1` is `y`.
/// Any other index is a programming error and panics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a vector from polar coordinates.
    pub fn from_length_angle(magnitude: f32, radians: f32) -> Self {
        Self::new(magnitude * radians.cos(), magnitude * radians.sin())
    }

    pub fn is_zero(self) -> bool {
        self.x.abs() < EPSILON && self.y.abs() < EPSILON
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Returns the unit vector of `self`, or zero if `self` has no length.
    pub fn normalize(self) -> Self {
        let length_sq = self.length_sq();
        if length_sq.abs() < EPSILON {
            Self::ZERO
        } else {
            self * length_sq.sqrt().recip()
        }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn dist_sq(self, other: Self) -> f32 {
        (self - other).length_sq()
    }

    pub fn dist(self, other: Self) -> f32 {
        self.dist_sq(other).sqrt()
    }

    /// Direction angle in radians, valid in all quadrants.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Angle between `self` and `other` in radians.
    pub fn angle_to(self, other: Self) -> f32 {
        (self.dot(other) / (self.length() * other.length())).acos()
    }

    /// Rotates this vector by `radians` around `center`.
    pub fn rotate(self, radians: f32, center: Self) -> Self {
        let (sin, cos) = radians.sin_cos();
        let d = self - center;
        Self::new(d.x * cos - d.y * sin + center.x, d.x * sin + d.y * cos + center.y)
    }

    /// Counter-clockwise normal.
    pub fn normal_ccw(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Returns `true` if both components are within [`EPSILON`] of `other`.
    pub fn intersects(self, other: Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Index<usize> for Vec2 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 component index out of bounds: {index}"),
        }
    }
}

impl IndexMut<usize> for Vec2 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2 component index out of bounds: {index}"),
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<kurbo::Vec2> for Vec2 {
    fn from(v: kurbo::Vec2) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}

/// Affine transformation matrix.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// 2x2 matrix.
    pub matrix: [f32; 4],
    /// Translation.
    pub translation: [f32; 2],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        matrix: [1.0, 0.0, 0.0, 1.0],
        translation: [0.0; 2],
    };

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0],
            translation: [tx, ty],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            matrix: [sx, 0.0, 0.0, sy],
            translation: [0.0; 2],
        }
    }

    /// Counter-clockwise rotation around the origin.
    pub fn rotate(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            matrix: [cos, sin, -sin, cos],
            translation: [0.0; 2],
        }
    }

    /// Creates a transform from a kurbo affine matrix.
    pub fn from_kurbo(transform: &kurbo::Affine) -> Self {
        let c = transform.as_coeffs().map(|x| x as f32);
        Self {
            matrix: [c[0], c[1], c[2], c[3]],
            translation: [c[4], c[5]],
        }
    }

    /// Converts the transform to a kurbo affine matrix.
    pub fn to_kurbo(&self) -> kurbo::Affine {
        kurbo::Affine::new(
            [
                self.matrix[0],
                self.matrix[1],
                self.matrix[2],
                self.matrix[3],
                self.translation[0],
                self.translation[1],
            ]
            .map(|x| x as f64),
        )
    }

    #[inline]
    pub fn transform_vec2(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.matrix[0] * v.x + self.matrix[2] * v.y + self.translation[0],
            self.matrix[1] * v.x + self.matrix[3] * v.y + self.translation[1],
        )
    }

    /// Transforms the X and Y components of `point`; Z is passed through untouched.
    #[inline]
    pub fn transform_point(&self, point: [f32; 3]) -> [f32; 3] {
        let v = self.transform_vec2(Vec2::new(point[0], point[1]));
        [v.x, v.y, point[2]]
    }

    /// Returns the bounding box of the four transformed XY corners of `aabb`.
    ///
    /// The Z range is kept as is. An empty box stays empty.
    pub fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut out = Aabb::new();
        if aabb.is_empty() {
            return out;
        }
        let [lx, ly, lz] = aabb.low;
        let [hx, hy, hz] = aabb.high;
        for (x, y) in [(lx, ly), (hx, ly), (lx, hy), (hx, hy)] {
            let v = self.transform_vec2(Vec2::new(x, y));
            out.resize([v.x, v.y, lz]);
            out.resize([v.x, v.y, hz]);
        }
        out
    }
}

impl Mul for Transform {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self {
            matrix: [
                self.matrix[0] * other.matrix[0] + self.matrix[2] * other.matrix[1],
                self.matrix[1] * other.matrix[0] + self.matrix[3] * other.matrix[1],
                self.matrix[0] * other.matrix[2] + self.matrix[2] * other.matrix[3],
                self.matrix[1] * other.matrix[2] + self.matrix[3] * other.matrix[3],
            ],
            translation: [
                self.matrix[0] * other.translation[0]
                    + self.matrix[2] * other.translation[1]
                    + self.translation[0],
                self.matrix[1] * other.translation[0]
                    + self.matrix[3] * other.translation[1]
                    + self.translation[1],
            ],
        }
    }
}
