// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing buckets for [`Region::add_shape`](crate::Region::add_shape).

use std::fmt;
use std::time::Duration;

/// Accumulated timings of all instrumented shape additions.
///
/// The triangle buckets are nested in `triangles_total`, which in turn is
/// nested with `vertices` in `total`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerfCounters {
    /// Pushing the shape vertices.
    pub vertices: Duration,
    /// Triangles whose indices could be moved by the offset.
    pub tri_push_idx: Duration,
    /// Triangles that needed duplicated vertices.
    pub tri_push_vertidx: Duration,
    /// Per-triangle lookups.
    pub tri_misc: Duration,
    pub triangles_total: Duration,
    pub total: Duration,
    /// Number of instrumented `add_shape` calls.
    pub count: u64,
}

impl PerfCounters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Time spent in the triangle loop outside of the measured buckets.
    pub fn triangles_self(&self) -> Duration {
        self.triangles_total
            .saturating_sub(self.tri_push_vertidx)
            .saturating_sub(self.tri_push_idx)
            .saturating_sub(self.tri_misc)
    }

    /// Time spent in `add_shape` outside of the vertex and triangle loops.
    pub fn total_self(&self) -> Duration {
        self.total
            .saturating_sub(self.triangles_total)
            .saturating_sub(self.vertices)
    }

    fn per_add(&self, d: Duration) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            d.as_nanos() as f64 / self.count as f64
        }
    }
}

impl fmt::Display for PerfCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("total self", self.total_self()),
            ("vertices", self.vertices),
            ("triangles total", self.triangles_total),
            ("triangles self", self.triangles_self()),
            ("tri misc", self.tri_misc),
            ("tri p-idx", self.tri_push_idx),
            ("tri p-vertidx", self.tri_push_vertidx),
        ];
        writeln!(
            f,
            "Region.add(): count {:3}, total {:5} [ms], per-add {:4.2} [ns]",
            self.count,
            self.total.as_millis(),
            self.per_add(self.total)
        )?;
        for (name, d) in rows {
            writeln!(
                f,
                "{name:>26} {:5} [ms], per-add {:4.2} [ns]",
                d.as_millis(),
                self.per_add(d)
            )?;
        }
        Ok(())
    }
}
