// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::{DefaultHasher, Hash, Hasher};

use graph_region::{Aabb, IndexWidth, Region, RenderModes};
use indexmap::IndexMap;
use peniko::Color;

use crate::string::{add_string_to_region, ensure_initialized, render_uncached};
use crate::{Font, RegionRenderer, Result};

/// Default number of cached strings.
pub const DEFAULT_CACHE_LIMIT: usize = 256;

/// Number of regions a [`TextRegionCache`] retains.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CacheLimit {
    /// Strings that aren't cached yet are rendered through a temporary
    /// region.
    Disabled,
    /// At most this many regions; the oldest entry is evicted first.
    /// `Limited(0)` behaves like [`Disabled`](Self::Disabled).
    Limited(usize),
    Unlimited,
}

impl CacheLimit {
    /// Whether rendered strings are kept at all.
    pub const fn retains(self) -> bool {
        !matches!(self, Self::Disabled | Self::Limited(0))
    }

    /// Maximum number of entries, `None` if unbounded.
    pub const fn max_entries(self) -> Option<usize> {
        match self {
            Self::Disabled => Some(0),
            Self::Limited(n) => Some(n),
            Self::Unlimited => None,
        }
    }
}

impl Default for CacheLimit {
    fn default() -> Self {
        Self::Limited(DEFAULT_CACHE_LIMIT)
    }
}

/// Identifies a cached string.
///
/// The text is only represented by a 32-bit hash, so two strings with the
/// same hash share an entry. Such collisions are not detected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub font: String,
    pub text_hash: u32,
    pub variant: u32,
}

impl CacheKey {
    pub fn new(font_name: &str, text: &str, variant: u32) -> Self {
        Self {
            font: font_name.to_owned(),
            text_hash: text_hash(text),
            variant,
        }
    }
}

fn text_hash(text: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish() as u32
}

/// Caches one [`Region`] per rendered string.
///
/// Entries are evicted in insertion order once the [limit](CacheLimit) is
/// reached; drawing a cached string does not refresh its position. Evicted
/// and cleared regions are handed to [`RegionRenderer::release`].
pub struct TextRegionCache<I: IndexWidth = u32> {
    render_modes: RenderModes,
    limit: CacheLimit,
    regions: IndexMap<CacheKey, Region<I>>,
}

impl<I: IndexWidth> TextRegionCache<I> {
    /// Creates an empty cache building regions with `render_modes`.
    pub fn new(render_modes: RenderModes) -> Self {
        Self {
            render_modes,
            limit: CacheLimit::default(),
            regions: IndexMap::new(),
        }
    }

    pub fn render_modes(&self) -> RenderModes {
        self.render_modes
    }

    /// Draws `text`, building and caching its region on first use.
    ///
    /// Regions still cached from before the limit was lowered are drawn
    /// as long as they are retained. Other strings go through a temporary
    /// region while the cache is [disabled](CacheLimit::Disabled).
    ///
    /// `rgba` is only used by render modes with a color channel. It is part
    /// of the cached region, so a cached string keeps the color it was first
    /// rendered with.
    ///
    /// Returns the bounds of the drawn region.
    pub fn render<R, F>(
        &mut self,
        renderer: &mut R,
        font: &F,
        text: &str,
        rgba: Option<Color>,
        sample_count: &mut u32,
    ) -> Result<Aabb>
    where
        R: RegionRenderer<I> + ?Sized,
        F: Font + ?Sized,
    {
        ensure_initialized::<I, R>(renderer)?;
        let key = CacheKey::new(font.unique_name(), text, 0);
        if let Some(region) = self.regions.get_mut(&key) {
            let bounds = *region.bounds();
            renderer.draw(region, sample_count)?;
            return Ok(bounds);
        }
        if !self.limit.retains() {
            return render_uncached::<I, R, F>(
                renderer,
                self.render_modes,
                font,
                text,
                rgba,
                sample_count,
            );
        }
        let mut region = Region::new(self.render_modes);
        add_string_to_region(&mut region, font, text, rgba)?;
        let bounds = *region.bounds();
        let region = self.insert(renderer, key, region);
        renderer.draw(region, sample_count)?;
        Ok(bounds)
    }

    /// The cached region of `text`, if any.
    pub fn cached_region<F: Font + ?Sized>(&self, font: &F, text: &str) -> Option<&Region<I>> {
        self.regions
            .get(&CacheKey::new(font.unique_name(), text, 0))
    }

    /// Drops the cached region of `text`.
    ///
    /// Returns `false` if it wasn't cached.
    pub fn remove<R, F>(&mut self, renderer: &mut R, font: &F, text: &str) -> bool
    where
        R: RegionRenderer<I> + ?Sized,
        F: Font + ?Sized,
    {
        let key = CacheKey::new(font.unique_name(), text, 0);
        match self.regions.shift_remove(&key) {
            Some(region) => {
                renderer.release(region);
                true
            }
            None => false,
        }
    }

    /// Releases every cached region.
    pub fn clear<R: RegionRenderer<I> + ?Sized>(&mut self, renderer: &mut R) {
        log::debug!("Clearing text cache with {} regions", self.regions.len());
        for (_, region) in self.regions.drain(..) {
            renderer.release(region);
        }
    }

    /// Sets the cache limit, applied when the next string is cached.
    ///
    /// Entries beyond a lowered limit stay cached, and are counted by
    /// [`cache_size`](Self::cache_size), until the next insertion. A
    /// [disabled](CacheLimit::Disabled) cache never inserts, so its entries
    /// are only released by [`clear`](Self::clear), [`remove`](Self::remove)
    /// or [`set_cache_limit_and_validate`](Self::set_cache_limit_and_validate).
    pub fn set_cache_limit(&mut self, limit: CacheLimit) {
        self.limit = limit;
    }

    /// Sets the cache limit and evicts entries exceeding it right away.
    pub fn set_cache_limit_and_validate<R: RegionRenderer<I> + ?Sized>(
        &mut self,
        renderer: &mut R,
        limit: CacheLimit,
    ) {
        self.limit = limit;
        self.evict(renderer, 0);
    }

    pub fn cache_limit(&self) -> CacheLimit {
        self.limit
    }

    /// Number of cached regions.
    pub fn cache_size(&self) -> usize {
        self.regions.len()
    }

    /// Inserts `region` for a key that isn't cached yet, first evicting as
    /// many of the oldest entries as needed to make room.
    fn insert<R: RegionRenderer<I> + ?Sized>(
        &mut self,
        renderer: &mut R,
        key: CacheKey,
        region: Region<I>,
    ) -> &mut Region<I> {
        self.evict(renderer, 1);
        self.regions.entry(key).or_insert(region)
    }

    /// Evicts the oldest entries until `space` more fit within the limit.
    fn evict<R: RegionRenderer<I> + ?Sized>(&mut self, renderer: &mut R, space: usize) {
        let Some(max) = self.limit.max_entries() else {
            return;
        };
        while !self.regions.is_empty() && self.regions.len() + space > max {
            if let Some((key, region)) = self.regions.shift_remove_index(0) {
                log::debug!(
                    "Evicting cached text region [{}, hash {:#010x}]",
                    key.font,
                    key.text_hash
                );
                renderer.release(region);
            }
        }
    }
}

impl<I: IndexWidth> std::fmt::Debug for TextRegionCache<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRegionCache")
            .field("render_modes", &self.render_modes)
            .field("limit", &self.limit)
            .field("size", &self.regions.len())
            .finish()
    }
}
