// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangulated outline geometry consumed by [`Region`](crate::Region).

use crate::Aabb;

/// A vertex of an outline shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Shape-local identifier, referenced by [`Triangle::ids`].
    pub id: u32,
    /// Position.
    pub coord: [f32; 3],
    /// Texture or curve parameters.
    pub tex_coord: [f32; 3],
}

/// A triangle of the shape triangulation, given as three shape-local vertex ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub ids: [u32; 3],
}

impl Triangle {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { ids: [a, b, c] }
    }
}

/// Source of pre-triangulated outline geometry.
///
/// Shapes are produced by a font or vector graphics front end and are only
/// ever read by a region.
pub trait OutlineShape {
    /// All vertices of the shape.
    fn vertices(&self) -> &[Vertex];

    /// The triangulation, referencing vertices by id.
    fn triangles(&self) -> &[Triangle];

    /// Bounding box of the untransformed shape.
    fn bounds(&self) -> Aabb;

    /// Number of vertices curve subdivision adds on top of the base outline.
    fn added_vertex_count(&self) -> usize {
        0
    }

    /// Resolves a vertex id.
    ///
    /// The default treats the id as the position in [`vertices`](Self::vertices).
    fn vertex(&self, id: u32) -> Option<&Vertex> {
        self.vertices().get(id as usize)
    }
}

impl<T: OutlineShape + ?Sized> OutlineShape for &T {
    fn vertices(&self) -> &[Vertex] {
        (**self).vertices()
    }

    fn triangles(&self) -> &[Triangle] {
        (**self).triangles()
    }

    fn bounds(&self) -> Aabb {
        (**self).bounds()
    }

    fn added_vertex_count(&self) -> usize {
        (**self).added_vertex_count()
    }

    fn vertex(&self, id: u32) -> Option<&Vertex> {
        (**self).vertex(id)
    }
}

/// Owned, already triangulated outline.
///
/// Vertex ids are assigned from the insertion position.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    bounds: Aabb,
    added_vertex_count: usize,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its id.
    pub fn push_vertex(&mut self, coord: [f32; 3], tex_coord: [f32; 3]) -> u32 {
        let id = self.vertices.len() as u32;
        self.bounds.resize(coord);
        self.vertices.push(Vertex {
            id,
            coord,
            tex_coord,
        });
        id
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push(Triangle::new(a, b, c));
    }

    /// Records how many of the vertices were introduced by curve subdivision.
    pub fn set_added_vertex_count(&mut self, count: usize) {
        self.added_vertex_count = count;
    }

    /// Axis-aligned rectangle at `z = 0` made of two triangles.
    pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let mut outline = Self::new();
        let a = outline.push_vertex([x0, y0, 0.0], [0.0, 0.0, 1.0]);
        let b = outline.push_vertex([x1, y0, 0.0], [1.0, 0.0, 1.0]);
        let c = outline.push_vertex([x1, y1, 0.0], [1.0, 1.0, 1.0]);
        let d = outline.push_vertex([x0, y1, 0.0], [0.0, 1.0, 1.0]);
        outline.push_triangle(a, b, c);
        outline.push_triangle(a, c, d);
        outline
    }
}

impl OutlineShape for Outline {
    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn added_vertex_count(&self) -> usize {
        self.added_vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::{Outline, OutlineShape};

    #[test]
    fn rect_outline() {
        let rect = Outline::rect(0.0, 0.0, 2.0, 1.0);
        assert_eq!(rect.vertices().len(), 4);
        assert_eq!(rect.triangles().len(), 2);
        assert_eq!(rect.bounds().high, [2.0, 1.0, 0.0]);
        assert_eq!(rect.vertex(3).map(|v| v.coord), Some([0.0, 1.0, 0.0]));
        assert!(rect.vertex(4).is_none());
    }
}
