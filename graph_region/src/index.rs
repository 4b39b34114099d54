// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Debug;

use bytemuck::Pod;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Integer type of the index buffer of a [`Region`](crate::Region).
///
/// Implemented for `u16`, for targets limited to 16-bit element indices, and
/// for `u32`. The trait is sealed; the overflow checks of a region rely on
/// its limits.
///
/// ```compile_fail
/// use graph_region::IndexWidth;
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
/// #[repr(transparent)]
/// struct Wide(u32);
///
/// impl From<Wide> for u32 {
///     fn from(index: Wide) -> Self {
///         index.0
///     }
/// }
///
/// impl IndexWidth for Wide {
///     const MAX_INDICES: u32 = u32::MAX;
///     const MAX_REPRESENTABLE: u32 = u32::MAX;
///     const IS_32_BIT: bool = true;
///     fn narrow(index: u32) -> Self {
///         Self(index)
///     }
/// }
/// ```
pub trait IndexWidth: sealed::Sealed + Pod + Eq + Debug + Into<u32> + 'static {
    /// Highest vertex number whose shape-local ids can be moved by an offset.
    const MAX_INDICES: u32;

    /// Highest vertex number a region may address. No region holds more
    /// than `MAX_REPRESENTABLE + 1` vertices.
    const MAX_REPRESENTABLE: u32;

    /// Whether indices are 32 bits wide.
    const IS_32_BIT: bool;

    /// Narrows an index already checked against [`Self::MAX_REPRESENTABLE`].
    fn narrow(index: u32) -> Self;
}

impl IndexWidth for u16 {
    const MAX_INDICES: u32 = 0xffff;
    const MAX_REPRESENTABLE: u32 = u16::MAX as u32;
    const IS_32_BIT: bool = false;

    #[inline]
    fn narrow(index: u32) -> Self {
        debug_assert!(index <= Self::MAX_REPRESENTABLE);
        index as Self
    }
}

impl IndexWidth for u32 {
    const MAX_INDICES: u32 = 0x7fff_ffff;
    const MAX_REPRESENTABLE: u32 = 0x7fff_ffff;
    const IS_32_BIT: bool = true;

    #[inline]
    fn narrow(index: u32) -> Self {
        index
    }
}

/// Returns `true` if the triangle starting at shape-local id `first_id` can be
/// emitted by moving its ids by `idx_offset`.
///
/// The headroom check is strict: a first id equal to the remaining headroom
/// is routed to the duplicating path.
#[inline]
pub(crate) fn uses_known_offset(max_indices: u32, idx_offset: u64, first_id: u32) -> bool {
    u64::from(max_indices).saturating_sub(idx_offset) > u64::from(first_id)
}
