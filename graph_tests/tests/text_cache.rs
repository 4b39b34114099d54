// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text rendering through the region cache.

#![allow(clippy::missing_assert_message, reason = "Tests")]

use anyhow::Result;
use graph_region::peniko::Color;
use graph_region::{Outline, OutlineShape, Region32, RenderModes};
use graph_tests::{check_indices, MonoFont, RecordingRenderer};
use graph_text::{
    add_string_to_region, render_into, render_uncached, CacheLimit, TextError, TextRegionCache,
};

#[test]
fn limit_plus_one_evicts_first_entry() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
    cache.set_cache_limit(CacheLimit::Limited(3));
    for text in ["one", "two", "three", "four"] {
        cache.render(&mut renderer, &font, text, None, &mut 0)?;
    }
    assert_eq!(cache.cache_size(), 3);
    assert!(cache.cached_region(&font, "one").is_none());
    for text in ["two", "three", "four"] {
        assert!(cache.cached_region(&font, text).is_some());
    }
    // "one" had three glyphs.
    assert_eq!(renderer.released, vec![12]);
    Ok(())
}

#[test]
fn default_limit_holds_256_strings() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u16>::new(RenderModes::NORMAL);
    for i in 0..300 {
        cache.render(&mut renderer, &font, &i.to_string(), None, &mut 0)?;
    }
    assert_eq!(cache.cache_size(), 256);
    assert_eq!(renderer.released.len(), 300 - 256);
    assert!(cache.cached_region(&font, "43").is_none());
    assert!(cache.cached_region(&font, "44").is_some());
    Ok(())
}

#[test]
fn disabled_cache_retains_nothing() -> Result<()> {
    let font = MonoFont::new("mono");
    for limit in [CacheLimit::Disabled, CacheLimit::Limited(0)] {
        let mut renderer = RecordingRenderer::new();
        let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
        cache.set_cache_limit(limit);
        let first = cache.render(&mut renderer, &font, "ab", None, &mut 0)?;
        let second = cache.render(&mut renderer, &font, "ab", None, &mut 0)?;
        assert_eq!(first, second);
        assert_eq!(cache.cache_size(), 0);
        // Every draw went through a fresh, then released, region.
        assert_eq!(renderer.uploads(), 2);
        assert_eq!(renderer.released, vec![8, 8]);
    }
    Ok(())
}

#[test]
fn unlimited_cache_never_evicts() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
    cache.set_cache_limit(CacheLimit::Unlimited);
    for i in 0..1000 {
        cache.render(&mut renderer, &font, &format!("line {i}"), None, &mut 0)?;
    }
    assert_eq!(cache.cache_size(), 1000);
    assert!(renderer.released.is_empty());
    Ok(())
}

#[test]
fn clear_releases_everything() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
    for text in ["a", "bb", "ccc"] {
        cache.render(&mut renderer, &font, text, None, &mut 0)?;
    }
    cache.clear(&mut renderer);
    assert_eq!(cache.cache_size(), 0);
    assert_eq!(renderer.released, vec![4, 8, 12]);
    cache.clear(&mut renderer);
    assert_eq!(renderer.released.len(), 3);
    Ok(())
}

#[test]
fn cached_strings_are_uploaded_once() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
    for _ in 0..5 {
        cache.render(&mut renderer, &font, "hello", None, &mut 0)?;
    }
    assert_eq!(renderer.draws.len(), 5);
    assert_eq!(renderer.uploads(), 1);
    assert!(renderer.draws[0].reselected);
    assert!(!renderer.draws[1].reselected);
    let region = cache.cached_region(&font, "hello").map(check_indices);
    assert!(matches!(region, Some(Ok(()))));
    Ok(())
}

#[test]
fn fonts_and_strings_have_separate_entries() -> Result<()> {
    let mono = MonoFont::new("mono");
    let wide = MonoFont::with_glyph("wide", Outline::rect(0.0, 0.0, 2.0, 1.0));
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
    let narrow_bounds = cache.render(&mut renderer, &mono, "ab", None, &mut 0)?;
    let wide_bounds = cache.render(&mut renderer, &wide, "ab", None, &mut 0)?;
    cache.render(&mut renderer, &mono, "ba", None, &mut 0)?;
    assert_eq!(cache.cache_size(), 3);
    assert_eq!(narrow_bounds.width(), 2.0);
    assert_eq!(wide_bounds.width(), 3.0);
    Ok(())
}

#[test]
fn uninitialized_renderer_is_reported() {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::uninitialized();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
    let err = cache
        .render(&mut renderer, &font, "a", None, &mut 0)
        .unwrap_err();
    assert!(matches!(err, TextError::NotInitialized));
    assert_eq!(cache.cache_size(), 0);
    assert!(renderer.draws.is_empty());

    let err = render_uncached::<u32, _, _>(
        &mut renderer,
        RenderModes::NORMAL,
        &font,
        "a",
        None,
        &mut 0,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Region renderer not initialized");
    assert!(renderer.released.is_empty());
}

#[test]
fn msaa_sample_count_is_written_back() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    renderer.msaa_samples = 8;
    let mut samples = 4;
    let mut cache = TextRegionCache::<u32>::new(RenderModes::MSAA);
    cache.render(&mut renderer, &font, "a", None, &mut samples)?;
    assert_eq!(samples, 8);

    let mut samples = 4;
    let mut plain = TextRegionCache::<u32>::new(RenderModes::VBAA);
    plain.render(&mut renderer, &font, "a", None, &mut samples)?;
    assert_eq!(samples, 4);
    Ok(())
}

#[test]
fn colored_text() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::COLOR_CHANNEL);
    let red = Color::rgba8(255, 0, 0, 255);
    cache.render(&mut renderer, &font, "ab", Some(red), &mut 0)?;
    let region = cache.cached_region(&font, "ab").map(Region32::colors);
    let colors = region.flatten().unwrap_or_default();
    assert_eq!(colors.len(), 8);
    assert!(colors.iter().all(|c| *c == [1.0, 0.0, 0.0, 1.0]));

    // Without a color, glyphs are white.
    let mut region = Region32::new(RenderModes::COLOR_CHANNEL);
    add_string_to_region(&mut region, &font, "a", None)?;
    assert_eq!(region.colors().map(|c| c[0]), Some([1.0; 4]));
    Ok(())
}

#[test]
fn multi_line_strings() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut region = Region32::new(RenderModes::NORMAL);
    let bounds = add_string_to_region(&mut region, &font, "ab\nc", None)?;
    assert_eq!(bounds.height(), 2.0);
    assert_eq!(bounds.width(), 2.0);
    assert_eq!(region.vertex_count(), 3 * font.glyph().vertices().len());
    assert_eq!(graph_text::char_count("ab\nc", '\n') + 1, 2);
    Ok(())
}

#[test]
fn render_into_reuses_given_region() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut region = Region32::new(RenderModes::NORMAL);
    render_into(&mut renderer, &mut region, &font, "long text", None, &mut 0)?;
    let capacity = region.buffer_stats().total_capacity_bytes();
    let bounds = render_into(&mut renderer, &mut region, &font, "hi", None, &mut 0)?;
    assert_eq!(bounds.width(), 2.0);
    assert_eq!(region.vertex_count(), 8);
    assert_eq!(region.buffer_stats().total_capacity_bytes(), capacity);
    assert_eq!(renderer.uploads(), 2);
    assert!(renderer.released.is_empty());
    Ok(())
}

#[test]
fn removed_entry_is_rebuilt() -> Result<()> {
    let font = MonoFont::new("mono");
    let mut renderer = RecordingRenderer::new();
    let mut cache = TextRegionCache::<u32>::new(RenderModes::NORMAL);
    cache.render(&mut renderer, &font, "x", None, &mut 0)?;
    assert!(cache.remove(&mut renderer, &font, "x"));
    cache.render(&mut renderer, &font, "x", None, &mut 0)?;
    assert_eq!(renderer.uploads(), 2);
    assert_eq!(renderer.released, vec![4]);
    Ok(())
}
