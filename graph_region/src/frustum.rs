// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View-volume culling.

use crate::Aabb;

/// A plane in Hessian normal form, `dot(normal, p) + distance = 0`.
///
/// Points with a positive signed distance are on the inner side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub normal: [f32; 3],
    pub distance: f32,
}

impl Plane {
    /// Creates a plane from its coefficients `a*x + b*y + c*z + d`, normalized
    /// so that `normal` has unit length.
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Self {
        let length = (a * a + b * b + c * c).sqrt();
        if length == 0.0 {
            return Self {
                normal: [a, b, c],
                distance: d,
            };
        }
        let inv = length.recip();
        Self {
            normal: [a * inv, b * inv, c * inv],
            distance: d * inv,
        }
    }

    #[inline]
    pub fn signed_distance(&self, point: [f32; 3]) -> f32 {
        self.normal[0] * point[0]
            + self.normal[1] * point[1]
            + self.normal[2] * point[2]
            + self.distance
    }
}

/// Six clipping planes bounding the visible volume.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Planes in order left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const BOTTOM: usize = 2;
    pub const TOP: usize = 3;
    pub const NEAR: usize = 4;
    pub const FAR: usize = 5;

    pub fn from_planes(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extracts the planes from a column-major projection-model-view matrix
    /// using the GL clip space convention.
    pub fn from_matrix(m: &[f32; 16]) -> Self {
        let row = |i: usize| [m[i], m[4 + i], m[8 + i], m[12 + i]];
        let r0 = row(0);
        let r1 = row(1);
        let r2 = row(2);
        let r3 = row(3);
        let plane = |s: f32, r: [f32; 4]| {
            Plane::from_coefficients(
                r3[0] + s * r[0],
                r3[1] + s * r[1],
                r3[2] + s * r[2],
                r3[3] + s * r[3],
            )
        };
        Self {
            planes: [
                plane(1.0, r0),
                plane(-1.0, r0),
                plane(1.0, r1),
                plane(-1.0, r1),
                plane(1.0, r2),
                plane(-1.0, r2),
            ],
        }
    }

    /// Volume of an orthographic projection, eye looking down negative Z.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            planes: [
                Plane::from_coefficients(1.0, 0.0, 0.0, -left),
                Plane::from_coefficients(-1.0, 0.0, 0.0, right),
                Plane::from_coefficients(0.0, 1.0, 0.0, -bottom),
                Plane::from_coefficients(0.0, -1.0, 0.0, top),
                Plane::from_coefficients(0.0, 0.0, -1.0, -near),
                Plane::from_coefficients(0.0, 0.0, 1.0, far),
            ],
        }
    }

    /// Returns `true` if `aabb` lies completely outside of one of the planes.
    ///
    /// Boxes straddling a plane are reported as not outside. An empty box is
    /// always outside.
    pub fn is_aabb_outside(&self, aabb: &Aabb) -> bool {
        if aabb.is_empty() {
            return true;
        }
        let corners = aabb.corners();
        self.planes
            .iter()
            .any(|plane| corners.iter().all(|c| plane.signed_distance(*c) < 0.0))
    }

    pub fn is_point_outside(&self, point: [f32; 3]) -> bool {
        self.planes
            .iter()
            .any(|plane| plane.signed_distance(point) < 0.0)
    }
}
