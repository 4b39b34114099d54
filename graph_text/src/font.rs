// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use graph_region::{Aabb, OutlineShape, RegionError, Transform};

/// Callback receiving each glyph outline of a string together with the
/// transform placing it.
pub type GlyphVisitor<'a> =
    dyn FnMut(&dyn OutlineShape, &Transform) -> Result<(), RegionError> + 'a;

/// Source of glyph outlines.
///
/// Outline extraction and layout live outside of this crate; a font only has
/// to hand out already triangulated glyph shapes in font em-size.
pub trait Font {
    /// Name identifying the font, used as part of the cache key.
    fn unique_name(&self) -> &str;

    /// Lays out `text` and calls `visitor` for each visible glyph.
    ///
    /// Returns the bounds of the laid out string, or the first error returned
    /// by `visitor`.
    fn process_string(
        &self,
        text: &str,
        visitor: &mut GlyphVisitor<'_>,
    ) -> Result<Aabb, RegionError>;
}

impl<T: Font + ?Sized> Font for &T {
    fn unique_name(&self) -> &str {
        (**self).unique_name()
    }

    fn process_string(
        &self,
        text: &str,
        visitor: &mut GlyphVisitor<'_>,
    ) -> Result<Aabb, RegionError> {
        (**self).process_string(text, visitor)
    }
}
