// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph tests.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![allow(
    missing_debug_implementations,
    unreachable_pub,
    missing_docs,
    clippy::missing_assert_message,
    reason = "Test support code"
)]

use anyhow::{ensure, Result};
use graph_region::{
    Aabb, IndexWidth, Outline, OutlineShape, Region, RegionError, Transform,
};
use graph_text::{Font, GlyphVisitor, RegionRenderer, TextError};

/// Monospaced test font.
///
/// Every character other than whitespace is drawn with the same glyph,
/// advancing by one em; a newline starts the next line one em below.
pub struct MonoFont {
    name: String,
    glyph: Outline,
}

impl MonoFont {
    /// Font drawing unit squares.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_glyph(name, Outline::rect(0.0, 0.0, 1.0, 1.0))
    }

    pub fn with_glyph(name: impl Into<String>, glyph: Outline) -> Self {
        Self {
            name: name.into(),
            glyph,
        }
    }

    pub fn glyph(&self) -> &Outline {
        &self.glyph
    }
}

impl Font for MonoFont {
    fn unique_name(&self) -> &str {
        &self.name
    }

    fn process_string(
        &self,
        text: &str,
        visitor: &mut GlyphVisitor<'_>,
    ) -> Result<Aabb, RegionError> {
        let glyph_bounds = self.glyph.bounds();
        let mut bounds = Aabb::new();
        for (line, text) in text.lines().enumerate() {
            for (column, c) in text.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let transform = Transform::translate(column as f32, -(line as f32));
                visitor(&self.glyph, &transform)?;
                bounds.resize_aabb(&transform.transform_aabb(&glyph_bounds));
            }
        }
        Ok(bounds)
    }
}

/// What a [`RecordingRenderer`] saw for one draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct Draw {
    pub vertices: usize,
    pub indices: usize,
    /// The geometry had to be uploaded.
    pub uploaded: bool,
    /// A new program had to be selected.
    pub reselected: bool,
}

/// Renderer recording every draw and release instead of talking to a GPU.
pub struct RecordingRenderer {
    pub initialized: bool,
    /// Sample count written back for MSAA regions.
    pub msaa_samples: u32,
    pub draws: Vec<Draw>,
    /// Vertex count of every released region.
    pub released: Vec<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            initialized: true,
            msaa_samples: 4,
            draws: Vec::new(),
            released: Vec::new(),
        }
    }

    pub fn uninitialized() -> Self {
        Self {
            initialized: false,
            ..Self::new()
        }
    }

    pub fn uploads(&self) -> usize {
        self.draws.iter().filter(|d| d.uploaded).count()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IndexWidth> RegionRenderer<I> for RecordingRenderer {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn draw(&mut self, region: &mut Region<I>, sample_count: &mut u32) -> Result<(), TextError> {
        if region.render_modes().is_msaa() {
            *sample_count = self.msaa_samples;
        }
        self.draws.push(Draw {
            vertices: region.vertex_count(),
            indices: region.index_count(),
            uploaded: region.is_shape_dirty(),
            reselected: region.is_state_dirty(),
        });
        region.clear_shape_dirty();
        region.clear_state_dirty();
        Ok(())
    }

    fn release(&mut self, region: Region<I>) {
        self.released.push(region.vertex_count());
    }
}

/// Checks that every index of `region` refers to a pushed vertex and that
/// the index buffer holds whole triangles.
pub fn check_indices<I: IndexWidth>(region: &Region<I>) -> Result<()> {
    ensure!(
        region.index_count() % 3 == 0,
        "{} indices don't form whole triangles",
        region.index_count()
    );
    let vertex_count = region.vertex_count();
    for (i, &index) in region.indices().iter().enumerate() {
        let index: u32 = index.into();
        ensure!(
            (index as usize) < vertex_count,
            "index {i} is {index}, but only {vertex_count} vertices were pushed"
        );
    }
    Ok(())
}

/// A strip of `count` quads, quad `i` at `x = i`, with triangles starting at
/// varying vertex ids.
pub fn quad_strip(count: usize) -> Outline {
    let mut outline = Outline::new();
    for i in 0..count {
        let x = i as f32;
        let a = outline.push_vertex([x, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let b = outline.push_vertex([x + 1.0, 0.0, 0.0], [1.0, 0.0, 1.0]);
        let c = outline.push_vertex([x + 1.0, 1.0, 0.0], [1.0, 1.0, 1.0]);
        let d = outline.push_vertex([x, 1.0, 0.0], [0.0, 1.0, 1.0]);
        outline.push_triangle(c, d, a);
        outline.push_triangle(a, b, c);
    }
    outline
}

/// A set of differently placed and sized shapes.
pub fn test_shapes() -> Vec<(Outline, Transform)> {
    vec![
        (Outline::rect(0.0, 0.0, 1.0, 1.0), Transform::IDENTITY),
        (quad_strip(3), Transform::translate(-2.0, 5.0)),
        (
            Outline::rect(0.0, 0.0, 2.0, 0.5),
            Transform::scale(3.0, 3.0) * Transform::translate(1.0, 1.0),
        ),
        (quad_strip(1), Transform::rotate(std::f32::consts::FRAC_PI_2)),
    ]
}
