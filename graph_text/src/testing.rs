// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font and renderer stand-ins for unit tests.

use graph_region::{Aabb, IndexWidth, Outline, OutlineShape, Region, RegionError, Transform};

use crate::{Font, GlyphVisitor, RegionRenderer, Result, TextError};

/// Monospaced font drawing every non-space character as a unit square.
pub(crate) struct BoxFont;

impl Font for BoxFont {
    fn unique_name(&self) -> &str {
        "box"
    }

    fn process_string(
        &self,
        text: &str,
        visitor: &mut GlyphVisitor<'_>,
    ) -> Result<Aabb, RegionError> {
        let glyph = Outline::rect(0.0, 0.0, 1.0, 1.0);
        let mut bounds = Aabb::new();
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let transform = Transform::translate(i as f32, 0.0);
            visitor(&glyph, &transform)?;
            bounds.resize_aabb(&transform.transform_aabb(&glyph.bounds()));
        }
        Ok(bounds)
    }
}

/// Records draws and releases.
pub(crate) struct MockRenderer {
    pub(crate) initialized: bool,
    pub(crate) fail_draw: bool,
    /// Vertex count of every drawn region.
    pub(crate) drawn: Vec<usize>,
    pub(crate) released: usize,
}

impl MockRenderer {
    pub(crate) const MSAA_SAMPLES: u32 = 8;

    pub(crate) fn new() -> Self {
        Self {
            initialized: true,
            fail_draw: false,
            drawn: Vec::new(),
            released: 0,
        }
    }

    pub(crate) fn uninitialized() -> Self {
        Self {
            initialized: false,
            ..Self::new()
        }
    }
}

impl<I: IndexWidth> RegionRenderer<I> for MockRenderer {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn draw(&mut self, region: &mut Region<I>, sample_count: &mut u32) -> Result<()> {
        if self.fail_draw {
            return Err(TextError::renderer("draw failed"));
        }
        if region.render_modes().is_msaa() {
            *sample_count = Self::MSAA_SAMPLES;
        }
        region.clear_shape_dirty();
        region.clear_state_dirty();
        self.drawn.push(region.vertex_count());
        Ok(())
    }

    fn release(&mut self, _region: Region<I>) {
        self.released += 1;
    }
}
