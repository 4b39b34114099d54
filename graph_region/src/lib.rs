// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accumulation of triangulated outline shapes into GPU-ready buffers.
//!
//! A [`Region`] collects the vertices and triangles of many
//! [`OutlineShape`]s (glyphs, vector paths) into flat attribute buffers and a
//! single index buffer. The buffers are meant to be uploaded and drawn by an
//! external renderer, which watches the region's dirty flags to decide when a
//! re-upload or a new shader program is needed.
//!
//! ```
//! use graph_region::{Outline, Region32, RenderModes, Transform};
//!
//! let mut region = Region32::new(RenderModes::NORMAL);
//! let rect = Outline::rect(0.0, 0.0, 1.0, 1.0);
//! region.add_shape(&rect, None, None)?;
//! region.add_shape(&rect, Some(&Transform::translate(2.0, 0.0)), None)?;
//! assert_eq!(region.indices(), &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
//! assert_eq!(region.bounds().width(), 3.0);
//! # Ok::<(), graph_region::RegionError>(())
//! ```

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
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_panics_doc,
    reason = "Deferred"
)]

mod bounds;
mod frustum;
mod index;
pub mod math;
mod modes;
mod perf;
mod region;
mod shape;

pub use peniko;
pub use peniko::kurbo;

pub use bounds::Aabb;
pub use frustum::{Frustum, Plane};
pub use index::IndexWidth;
pub use math::{Transform, Vec2};
pub use modes::RenderModes;
pub use perf::PerfCounters;
pub use region::{
    BufferStat, BufferStats, GeometryCount, Region, Region16, Region32, MAX_QUALITY,
};
pub use shape::{Outline, OutlineShape, Triangle, Vertex};

use thiserror::Error;

/// Errors that can occur while adding shapes to a [`Region`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegionError {
    /// A shape would emit a vertex index the index storage can't hold.
    ///
    /// The region has reached its capacity; start a new region for further shapes.
    #[error("Vertex index {required} exceeds the index storage limit {limit}")]
    IndexOverflow { required: u64, limit: u32 },
    /// A triangle references a vertex the shape doesn't have.
    #[error("Triangle references vertex {id}, but the shape has {vertex_count} vertices")]
    InvalidVertexId { id: u32, vertex_count: usize },
}

/// Specialization of `Result` for our catch-all error type.
pub type Result<T, E = RegionError> = std::result::Result<T, E>;
