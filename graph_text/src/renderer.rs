// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graph_region::{IndexWidth, Region};

use crate::Result;

/// GPU side of region rendering.
///
/// Implementations upload a region's buffers when its shape is dirty, pick a
/// program when its state is dirty and issue the draw call.
pub trait RegionRenderer<I: IndexWidth = u32> {
    /// Whether the renderer is ready to [`draw`](Self::draw).
    fn is_initialized(&self) -> bool;

    /// Draws `region`.
    ///
    /// `sample_count` holds the desired multisampling sample count. With
    /// MSAA rendering the count actually used is written back, otherwise it
    /// is left alone.
    fn draw(&mut self, region: &mut Region<I>, sample_count: &mut u32) -> Result<()>;

    /// Releases the GPU storage of a region that is no longer used.
    fn release(&mut self, region: Region<I>);
}
