// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text rendering on top of [`graph_region`].
//!
//! A [`Font`] turns a string into positioned glyph outlines, which are
//! accumulated into a [`Region`](graph_region::Region) and handed to a
//! [`RegionRenderer`] for drawing. [`TextRegionCache`] keeps one region per
//! rendered string so repeated draws reuse the already built buffers.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(missing_docs, reason = "We have many as-yet undocumented items.")]

mod cache;
mod font;
mod renderer;
mod string;

#[cfg(test)]
mod testing;

pub use cache::{CacheKey, CacheLimit, TextRegionCache, DEFAULT_CACHE_LIMIT};
pub use font::{Font, GlyphVisitor};
pub use renderer::RegionRenderer;
pub use string::{add_string_to_region, char_count, render_into, render_uncached};

use graph_region::RegionError;
use thiserror::Error;

/// Errors that can occur while rendering text.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TextError {
    /// The renderer has not been set up for drawing.
    #[error("Region renderer not initialized")]
    NotInitialized,
    /// A glyph shape couldn't be added to the region.
    #[error("Couldn't add glyph shape to region")]
    Region(#[from] RegionError),
    /// The renderer failed to draw a region.
    #[error("Region renderer failed")]
    Renderer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TextError {
    /// Wraps an error reported by a [`RegionRenderer`] implementation.
    pub fn renderer(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Renderer(err.into())
    }
}

/// Specialization of `Result` for our catch-all error type.
pub type Result<T, E = TextError> = std::result::Result<T, E>;
