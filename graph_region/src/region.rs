// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::ops::{Add, AddAssign};

use web_time::Instant;

use crate::index::uses_known_offset;
use crate::{
    Aabb, Frustum, IndexWidth, OutlineShape, PerfCounters, RegionError, RenderModes, Result,
    Transform, Triangle, Vertex,
};

/// Default maximum [quality](Region::quality).
pub const MAX_QUALITY: u32 = 1;

/// Color stored for shapes added without one to a region with a color channel.
const DEFAULT_COLOR: [f32; 4] = [1.0; 4];

/// Expected ratio of indices to vertices (3 / 5), used to pre-size index buffers.
const INDEX_RATIO: (usize, usize) = (3, 5);

/// Number of vertices and indices a shape is expected to need.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometryCount {
    pub vertices: usize,
    pub indices: usize,
}

impl Add for GeometryCount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            vertices: self.vertices + other.vertices,
            indices: self.indices + other.indices,
        }
    }
}

impl AddAssign for GeometryCount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Accumulated, GPU-ready geometry of a set of outline shapes.
///
/// Shapes are appended with [`add_shape`](Self::add_shape). Vertices land in
/// separate attribute buffers (position, curve parameters and, with
/// [`RenderModes::COLOR_CHANNEL`], RGBA); triangles land in the index buffer
/// with their shape-local ids moved by the number of vertices already present.
///
/// The index type `I` is fixed per region, see [`IndexWidth`].
///
/// The external renderer uploads the buffers when [`is_shape_dirty`]
/// reports a change and clears the flag afterwards.
///
/// [`is_shape_dirty`]: Self::is_shape_dirty
pub struct Region<I: IndexWidth = u32> {
    render_modes: RenderModes,
    quality: u32,
    index_limit: u32,
    positions: Vec<[f32; 3]>,
    curve_params: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<I>,
    bounds: Aabb,
    shape_dirty: bool,
    state_dirty: bool,
    frustum: Option<Frustum>,
    perf: Option<PerfCounters>,
}

/// Region with 16-bit indices.
pub type Region16 = Region<u16>;

/// Region with 32-bit indices.
pub type Region32 = Region<u32>;

impl<I: IndexWidth> Region<I> {
    /// Creates an empty region. Both dirty flags start out set.
    pub fn new(render_modes: RenderModes) -> Self {
        log::debug!(
            "Creating region [{render_modes}, i32 indices {}]",
            I::IS_32_BIT
        );
        Self {
            render_modes,
            quality: MAX_QUALITY,
            index_limit: I::MAX_INDICES,
            positions: Vec::new(),
            curve_params: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
            bounds: Aabb::new(),
            shape_dirty: true,
            state_dirty: true,
            frustum: None,
            perf: None,
        }
    }

    /// Lowers the vertex number up to which shape-local ids are moved by an
    /// offset. Triangles beyond it use duplicated vertices.
    ///
    /// The limit is clamped to [`IndexWidth::MAX_INDICES`].
    pub fn with_index_limit(mut self, limit: u32) -> Self {
        self.index_limit = limit.min(I::MAX_INDICES);
        self
    }

    pub fn render_modes(&self) -> RenderModes {
        self.render_modes
    }

    pub fn has_color_channel(&self) -> bool {
        self.render_modes.has_color_channel()
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }

    pub fn set_quality(&mut self, quality: u32) {
        self.quality = quality;
    }

    /// Returns `true` if indices are stored as 32-bit integers.
    pub fn uses_i32_idx(&self) -> bool {
        I::IS_32_BIT
    }

    pub fn index_limit(&self) -> u32 {
        self.index_limit
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Bounding box of every vertex pushed since creation or the last [`clear`](Self::clear).
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }

    /// Installs or removes frustum culling for subsequently added shapes.
    pub fn set_frustum(&mut self, frustum: Option<Frustum>) {
        self.frustum = frustum;
    }

    /// Marks the geometry as changed, requiring a re-upload.
    pub fn mark_shape_dirty(&mut self) {
        self.shape_dirty = true;
    }

    pub fn is_shape_dirty(&self) -> bool {
        self.shape_dirty
    }

    pub fn clear_shape_dirty(&mut self) {
        self.shape_dirty = false;
    }

    /// Marks the render state as changed, requiring a new shader program
    /// selection (and a new off-screen pass in two pass mode).
    pub fn mark_state_dirty(&mut self) {
        self.state_dirty = true;
    }

    pub fn is_state_dirty(&self) -> bool {
        self.state_dirty
    }

    pub fn clear_state_dirty(&mut self) {
        self.state_dirty = false;
    }

    /// Drops all geometry while keeping the buffer capacity for reuse.
    pub fn clear(&mut self) {
        log::debug!("Clearing region with {} vertices", self.positions.len());
        self.positions.clear();
        self.curve_params.clear();
        self.colors.clear();
        self.indices.clear();
        self.bounds.reset();
        self.shape_dirty = true;
        self.state_dirty = true;
    }

    /// Counts the vertices and indices needed to add `shape`.
    ///
    /// The index estimate assumes index reuse and may be lower than what the
    /// shape ends up pushing; buffers grow on demand in that case.
    pub fn count_shape<S: OutlineShape + ?Sized>(&self, shape: &S) -> GeometryCount {
        let vertices = shape.vertices().len() + shape.added_vertex_count();
        let triangle_indices = shape.triangles().len() * 3;
        let estimate = (vertices * INDEX_RATIO.0).div_ceil(INDEX_RATIO.1);
        GeometryCount {
            vertices,
            indices: estimate.min(triangle_indices),
        }
    }

    /// Sums [`count_shape`](Self::count_shape) over `shapes`.
    pub fn count_shapes<S: OutlineShape>(
        &self,
        shapes: impl IntoIterator<Item = S>,
    ) -> GeometryCount {
        shapes
            .into_iter()
            .fold(GeometryCount::default(), |acc, shape| {
                acc + self.count_shape(&shape)
            })
    }

    /// Ensures room for `vertices` and `indices` elements in total.
    ///
    /// Buffers already at least this large are left alone.
    pub fn set_buffer_capacity(&mut self, vertices: usize, indices: usize) {
        fn ensure<T>(v: &mut Vec<T>, total: usize) {
            if v.capacity() < total {
                v.reserve_exact(total - v.len());
            }
        }
        ensure(&mut self.positions, vertices);
        ensure(&mut self.curve_params, vertices);
        if self.has_color_channel() {
            ensure(&mut self.colors, vertices);
        }
        ensure(&mut self.indices, indices);
    }

    /// Ensures room for `vertices` and `indices` more elements.
    pub fn grow_buffer(&mut self, vertices: usize, indices: usize) {
        self.positions.reserve(vertices);
        self.curve_params.reserve(vertices);
        if self.has_color_channel() {
            self.colors.reserve(vertices);
        }
        self.indices.reserve(indices);
    }

    /// Adds `shape`, optionally transformed.
    ///
    /// With a [frustum](Self::set_frustum) installed, a shape whose (transformed)
    /// bounding box lies fully outside is skipped without touching the region.
    ///
    /// `rgba` is only used if the region has a color channel; shapes added
    /// without a color are then stored opaque white.
    ///
    /// Returns an error, leaving the region untouched, if the shape would push
    /// a vertex the index storage can't address or if a triangle references
    /// an unknown vertex.
    pub fn add_shape<S: OutlineShape + ?Sized>(
        &mut self,
        shape: &S,
        transform: Option<&Transform>,
        rgba: Option<[f32; 4]>,
    ) -> Result<()> {
        if let Some(frustum) = &self.frustum {
            let shape_bounds = shape.bounds();
            let shape_bounds = match transform {
                Some(t) => t.transform_aabb(&shape_bounds),
                None => shape_bounds,
            };
            if frustum.is_aabb_outside(&shape_bounds) {
                return Ok(());
            }
        }
        let duplicated = self.check_indices(shape).inspect_err(|err| {
            log::warn!("Rejecting shape: {err}");
        })?;
        let count = self.count_shape(shape);
        self.grow_buffer(count.vertices + duplicated * 3, shape.triangles().len() * 3);
        let color = self
            .has_color_channel()
            .then(|| rgba.unwrap_or(DEFAULT_COLOR));
        if let Some(mut perf) = self.perf.take() {
            self.push_shape_instrumented(shape, transform, color, &mut perf);
            self.perf = Some(perf);
        } else if log::log_enabled!(log::Level::Trace) {
            let mut scratch = PerfCounters::default();
            self.push_shape_instrumented(shape, transform, color, &mut scratch);
        } else {
            self.push_shape(shape, transform, color);
        }
        self.mark_shape_dirty();
        Ok(())
    }

    /// Adds every shape of `shapes` with the same transform and color.
    ///
    /// Culling applies to each shape on its own. Stops at the first error.
    pub fn add_shapes<S: OutlineShape>(
        &mut self,
        shapes: impl IntoIterator<Item = S>,
        transform: Option<&Transform>,
        rgba: Option<[f32; 4]>,
    ) -> Result<()> {
        for shape in shapes {
            self.add_shape(&shape, transform, rgba)?;
        }
        Ok(())
    }

    /// Validates every index `shape` would emit and the resulting vertex
    /// count, and returns the number of triangles that will need duplicated
    /// vertices.
    fn check_indices<S: OutlineShape + ?Sized>(&self, shape: &S) -> Result<usize> {
        let vertices = shape.vertices();
        if vertices.len() < 3 {
            return Ok(0);
        }
        let idx_offset = self.positions.len() as u64;
        let limit = u64::from(I::MAX_REPRESENTABLE);
        let mut duplicated = 0_usize;
        for tri in shape.triangles() {
            if let Some(&id) = tri.ids.iter().find(|&&id| shape.vertex(id).is_none()) {
                return Err(RegionError::InvalidVertexId {
                    id,
                    vertex_count: vertices.len(),
                });
            }
            if uses_known_offset(self.index_limit, idx_offset, tri.ids[0]) {
                let max_id = tri.ids.iter().copied().max().unwrap_or_default();
                let required = u64::from(max_id) + idx_offset;
                if required > limit {
                    return Err(RegionError::IndexOverflow {
                        required,
                        limit: I::MAX_REPRESENTABLE,
                    });
                }
            } else {
                duplicated += 1;
            }
        }
        // The last pushed vertex must stay addressable, even if no triangle
        // refers to it yet.
        let required = idx_offset + vertices.len() as u64 + duplicated as u64 * 3 - 1;
        if required > limit {
            return Err(RegionError::IndexOverflow {
                required,
                limit: I::MAX_REPRESENTABLE,
            });
        }
        Ok(duplicated)
    }

    fn push_shape<S: OutlineShape + ?Sized>(
        &mut self,
        shape: &S,
        transform: Option<&Transform>,
        color: Option<[f32; 4]>,
    ) {
        let vertices = shape.vertices();
        if vertices.len() < 3 {
            return;
        }
        let idx_offset = self.positions.len() as u32;
        for vertex in vertices {
            self.push_vertex(vertex, transform, color);
        }
        for tri in shape.triangles() {
            if uses_known_offset(self.index_limit, idx_offset.into(), tri.ids[0]) {
                self.push_indices(tri.ids.map(|id| id + idx_offset));
            } else if let Some(tri_vertices) = resolve_triangle(shape, tri) {
                self.push_new_vertices_idx(tri_vertices, transform, color);
            }
        }
    }

    fn push_shape_instrumented<S: OutlineShape + ?Sized>(
        &mut self,
        shape: &S,
        transform: Option<&Transform>,
        color: Option<[f32; 4]>,
        perf: &mut PerfCounters,
    ) {
        perf.count += 1;
        let t0 = Instant::now();
        let vertices = shape.vertices();
        let triangles = shape.triangles();
        log::trace!(
            "Region add: tris {}, verts {} + {} added, transform {transform:?}",
            triangles.len(),
            vertices.len(),
            shape.added_vertex_count()
        );
        if vertices.len() < 3 {
            return;
        }
        let idx_offset = self.positions.len() as u32;
        for vertex in vertices {
            self.push_vertex(vertex, transform, color);
        }
        let t1 = Instant::now();
        perf.vertices += t1 - t0;

        let mut moved = 0_usize;
        let mut duplicated = 0_usize;
        for tri in triangles {
            let t2 = Instant::now();
            let first_id = tri.ids[0];
            perf.tri_misc += t2.elapsed();
            if uses_known_offset(self.index_limit, idx_offset.into(), first_id) {
                let tpi = Instant::now();
                self.push_indices(tri.ids.map(|id| id + idx_offset));
                perf.tri_push_idx += tpi.elapsed();
                moved += 3;
            } else if let Some(tri_vertices) = resolve_triangle(shape, tri) {
                let tpvi = Instant::now();
                self.push_new_vertices_idx(tri_vertices, transform, color);
                perf.tri_push_vertidx += tpvi.elapsed();
                duplicated += 3;
            }
        }
        let tx = Instant::now();
        perf.triangles_total += tx - t1;
        perf.total += tx - t0;
        log::trace!(
            "Region add done: idx [i32 {}, offset {idx_offset}], verts [v-new {}, t-new {duplicated}], \
             t-moved {moved}, vertices {}, box {}",
            I::IS_32_BIT,
            vertices.len(),
            self.positions.len(),
            self.bounds
        );
    }

    #[inline]
    fn push_vertex(
        &mut self,
        vertex: &Vertex,
        transform: Option<&Transform>,
        color: Option<[f32; 4]>,
    ) {
        let coord = match transform {
            Some(t) => t.transform_point(vertex.coord),
            None => vertex.coord,
        };
        self.bounds.resize(coord);
        self.positions.push(coord);
        self.curve_params.push(vertex.tex_coord);
        if let Some(color) = color {
            self.colors.push(color);
        }
    }

    #[inline]
    fn push_indices(&mut self, ids: [u32; 3]) {
        self.indices.extend_from_slice(&ids.map(I::narrow));
    }

    fn push_new_vertices_idx(
        &mut self,
        vertices: [&Vertex; 3],
        transform: Option<&Transform>,
        color: Option<[f32; 4]>,
    ) {
        let base = self.positions.len() as u32;
        self.push_indices([base, base + 1, base + 2]);
        for vertex in vertices {
            self.push_vertex(vertex, transform, color);
        }
    }
}

/// Performance counter control.
impl<I: IndexWidth> Region<I> {
    /// Enables or disables the [`add_shape`](Self::add_shape) timing buckets.
    ///
    /// Enabling already enabled counters resets them.
    pub fn enable_perf_counters(&mut self, enable: bool) {
        self.perf = enable.then(PerfCounters::default);
    }

    pub fn perf_counters(&self) -> Option<&PerfCounters> {
        self.perf.as_ref()
    }

    pub fn clear_perf_counters(&mut self) {
        if let Some(perf) = &mut self.perf {
            perf.clear();
        }
    }

    /// Total time spent in instrumented additions, zero when disabled.
    pub fn perf_total_duration(&self) -> std::time::Duration {
        self.perf.as_ref().map(|perf| perf.total).unwrap_or_default()
    }

    /// Writes the counters to `out`; writes nothing when disabled.
    pub fn print_perf_counters(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match &self.perf {
            Some(perf) => write!(out, "{perf}"),
            None => Ok(()),
        }
    }
}

/// Buffer access for the external renderer.
impl<I: IndexWidth> Region<I> {
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Texture or curve parameters, one entry per vertex.
    pub fn curve_params(&self) -> &[[f32; 3]] {
        &self.curve_params
    }

    /// Per-vertex RGBA, or `None` without a color channel.
    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.has_color_channel().then_some(self.colors.as_slice())
    }

    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn curve_params_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.curve_params)
    }

    pub fn colors_bytes(&self) -> Option<&[u8]> {
        self.colors().map(bytemuck::cast_slice)
    }

    pub fn indices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Sizes and capacities of the backing buffers.
    pub fn buffer_stats(&self) -> BufferStats {
        BufferStats {
            positions: BufferStat::of(&self.positions),
            curve_params: BufferStat::of(&self.curve_params),
            colors: self.has_color_channel().then(|| BufferStat::of(&self.colors)),
            indices: BufferStat::of(&self.indices),
        }
    }

    pub fn print_buffer_stats(&self, out: &mut impl fmt::Write) -> fmt::Result {
        write!(out, "{}", self.buffer_stats())
    }
}

impl<I: IndexWidth> fmt::Display for Region<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region[{}, q {}, dirty [shape {}, state {}], vertices {}, box {}]",
            self.render_modes,
            self.quality,
            self.shape_dirty,
            self.state_dirty,
            self.positions.len(),
            self.bounds
        )
    }
}

impl<I: IndexWidth> fmt::Debug for Region<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("render_modes", &self.render_modes)
            .field("quality", &self.quality)
            .field("index_limit", &self.index_limit)
            .field("vertices", &self.positions.len())
            .field("indices", &self.indices.len())
            .field("bounds", &self.bounds)
            .field("shape_dirty", &self.shape_dirty)
            .field("state_dirty", &self.state_dirty)
            .field("frustum", &self.frustum)
            .finish_non_exhaustive()
    }
}

/// Element count, size and capacity of one buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferStat {
    pub elements: usize,
    pub size_bytes: usize,
    pub capacity_bytes: usize,
}

impl BufferStat {
    fn of<T>(v: &Vec<T>) -> Self {
        let element_size = size_of::<T>();
        Self {
            elements: v.len(),
            size_bytes: v.len() * element_size,
            capacity_bytes: v.capacity() * element_size,
        }
    }
}

/// Statistics of all buffers of a region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferStats {
    pub positions: BufferStat,
    pub curve_params: BufferStat,
    /// Only present with a color channel.
    pub colors: Option<BufferStat>,
    pub indices: BufferStat,
}

impl BufferStats {
    pub fn total_size_bytes(&self) -> usize {
        self.iter().map(|(_, stat)| stat.size_bytes).sum()
    }

    pub fn total_capacity_bytes(&self) -> usize {
        self.iter().map(|(_, stat)| stat.capacity_bytes).sum()
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, BufferStat)> + '_ {
        [
            Some(("positions", self.positions)),
            Some(("curve params", self.curve_params)),
            self.colors.map(|stat| ("colors", stat)),
            Some(("indices", self.indices)),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for BufferStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, stat) in self.iter() {
            writeln!(
                f,
                "{name:>12}: elements {}, size {} / capacity {} [bytes]",
                stat.elements, stat.size_bytes, stat.capacity_bytes
            )?;
        }
        let total_size = self.total_size_bytes();
        let total_capacity = self.total_capacity_bytes();
        let filled = if total_capacity == 0 {
            0.0
        } else {
            total_size as f64 * 100.0 / total_capacity as f64
        };
        writeln!(
            f,
            "{:>12}: size {total_size} / capacity {total_capacity} [bytes], {filled:.1}% filled",
            "total"
        )
    }
}

fn resolve_triangle<'a, S: OutlineShape + ?Sized>(
    shape: &'a S,
    tri: &Triangle,
) -> Option<[&'a Vertex; 3]> {
    let [a, b, c] = tri.ids;
    Some([shape.vertex(a)?, shape.vertex(b)?, shape.vertex(c)?])
}
