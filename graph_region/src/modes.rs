// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::ops::BitOr;

/// Render mode bit-set of a region.
///
/// Fixed when the region is created and consumed by the external renderer
/// to pick an anti-aliasing strategy and shader variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderModes(pub u32);

impl RenderModes {
    /// Default single pass rendering.
    pub const NORMAL: Self = Self(0);

    /// Two pass rendering with an MSAA off-screen target.
    pub const MSAA: Self = Self(1 << 0);

    /// Two pass view based anti-aliasing.
    pub const VBAA: Self = Self(1 << 1);

    /// Non-uniform curve weights in `[0.0, 1.9]` instead of the uniform 1.0.
    pub const VARIABLE_WEIGHT: Self = Self(1 << 8);

    /// A per-vertex RGBA attribute is part of the vertex stream.
    pub const COLOR_CHANNEL: Self = Self(1 << 9);

    /// Colors are taken from a color texture.
    pub const COLOR_TEXTURE: Self = Self(1 << 10);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_msaa(self) -> bool {
        self.0 & Self::MSAA.0 != 0
    }

    pub const fn is_vbaa(self) -> bool {
        self.0 & Self::VBAA.0 != 0
    }

    /// Either of the two pass methods is selected.
    pub const fn is_two_pass(self) -> bool {
        self.0 & (Self::MSAA.0 | Self::VBAA.0) != 0
    }

    pub const fn has_variable_weight(self) -> bool {
        self.0 & Self::VARIABLE_WEIGHT.0 != 0
    }

    pub const fn has_color_channel(self) -> bool {
        self.0 & Self::COLOR_CHANNEL.0 != 0
    }

    pub const fn has_color_texture(self) -> bool {
        self.0 & Self::COLOR_TEXTURE.0 != 0
    }
}

impl BitOr for RenderModes {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl fmt::Display for RenderModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let aa = if self.is_vbaa() {
            "vbaa"
        } else if self.is_msaa() {
            "msaa"
        } else {
            "norm"
        };
        f.write_str(aa)?;
        if self.has_variable_weight() {
            f.write_str("-curve")?;
        }
        if self.has_color_channel() {
            f.write_str("-cols")?;
        }
        if self.has_color_texture() {
            f.write_str("-ctex")?;
        }
        Ok(())
    }
}
