// Copyright 2025 the Graph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uncached string rendering.

use graph_region::{Aabb, IndexWidth, OutlineShape, Region, RegionError, RenderModes, Transform};
use peniko::Color;

use crate::{Font, RegionRenderer, Result, TextError};

/// Adds the glyph outlines of `text` to the end of `region`.
///
/// `rgba` is only used if the region has a color channel. Shapes are added in
/// font em-size, each placed by the transform the font supplies.
///
/// Returns the bounds of the laid out string as reported by the font.
pub fn add_string_to_region<I: IndexWidth, F: Font + ?Sized>(
    region: &mut Region<I>,
    font: &F,
    text: &str,
    rgba: Option<Color>,
) -> Result<Aabb, RegionError> {
    let rgba = rgba
        .filter(|_| region.has_color_channel())
        .map(color_components);
    font.process_string(
        text,
        &mut |shape: &dyn OutlineShape, transform: &Transform| {
            region.add_shape(shape, Some(transform), rgba)
        },
    )
}

/// Renders `text` through a temporary region, released after drawing.
///
/// Recreating the region on every call is expensive with two pass render
/// modes; prefer [`render_into`] or a [`TextRegionCache`](crate::TextRegionCache)
/// for text drawn every frame.
///
/// Returns the bounds of the drawn region.
pub fn render_uncached<I, R, F>(
    renderer: &mut R,
    render_modes: RenderModes,
    font: &F,
    text: &str,
    rgba: Option<Color>,
    sample_count: &mut u32,
) -> Result<Aabb>
where
    I: IndexWidth,
    R: RegionRenderer<I> + ?Sized,
    F: Font + ?Sized,
{
    ensure_initialized::<I, R>(renderer)?;
    let mut region = Region::<I>::new(render_modes);
    let drawn = add_string_to_region(&mut region, font, text, rgba)
        .map_err(TextError::from)
        .and_then(|_| {
            let bounds = *region.bounds();
            renderer.draw(&mut region, sample_count).map(|()| bounds)
        });
    renderer.release(region);
    drawn
}

/// Clears `region`, adds `text` and draws it.
///
/// Returns the bounds of the drawn region.
pub fn render_into<I, R, F>(
    renderer: &mut R,
    region: &mut Region<I>,
    font: &F,
    text: &str,
    rgba: Option<Color>,
    sample_count: &mut u32,
) -> Result<Aabb>
where
    I: IndexWidth,
    R: RegionRenderer<I> + ?Sized,
    F: Font + ?Sized,
{
    ensure_initialized::<I, R>(renderer)?;
    region.clear();
    add_string_to_region(region, font, text, rgba)?;
    let bounds = *region.bounds();
    renderer.draw(region, sample_count)?;
    Ok(bounds)
}

/// Counts the occurrences of `c` in `text`.
///
/// Handy for sizing multi-line text by counting `'\n'`.
pub fn char_count(text: &str, c: char) -> usize {
    text.chars().filter(|&ch| ch == c).count()
}

pub(crate) fn ensure_initialized<I, R>(renderer: &R) -> Result<()>
where
    I: IndexWidth,
    R: RegionRenderer<I> + ?Sized,
{
    if renderer.is_initialized() {
        Ok(())
    } else {
        Err(TextError::NotInitialized)
    }
}

fn color_components(color: Color) -> [f32; 4] {
    [color.r, color.g, color.b, color.a].map(|c| f32::from(c) / 255.0)
}

#[cfg(test)]
mod tests {
    use graph_region::{Region16, Region32, RegionError, RenderModes};
    use peniko::Color;

    use super::{add_string_to_region, char_count, render_into, render_uncached};
    use crate::testing::{BoxFont, MockRenderer};
    use crate::TextError;

    #[test]
    fn string_glyphs_are_placed_by_font() {
        let mut region = Region32::new(RenderModes::NORMAL);
        let bounds = add_string_to_region(&mut region, &BoxFont, "a b", None).unwrap();
        // Two glyphs, the space only advances.
        assert_eq!(region.vertex_count(), 8);
        assert_eq!(region.positions()[4], [2.0, 0.0, 0.0]);
        assert_eq!(bounds.width(), 3.0);
        assert_eq!(*region.bounds(), bounds);
    }

    #[test]
    fn color_only_with_color_channel() {
        let mut region = Region32::new(RenderModes::COLOR_CHANNEL);
        add_string_to_region(&mut region, &BoxFont, "x", Some(Color::rgba8(255, 0, 0, 255)))
            .unwrap();
        assert_eq!(region.colors().unwrap()[0], [1.0, 0.0, 0.0, 1.0]);

        let mut region = Region32::new(RenderModes::NORMAL);
        add_string_to_region(&mut region, &BoxFont, "x", Some(Color::rgba8(255, 0, 0, 255)))
            .unwrap();
        assert!(region.colors().is_none());
    }

    #[test]
    fn overflow_stops_the_string() {
        let mut region = Region16::new(RenderModes::NORMAL).with_index_limit(0);
        // Every glyph is duplicated: 4 + 6 vertices each.
        let long = "x".repeat(7000);
        let err = add_string_to_region(&mut region, &BoxFont, &long, None).unwrap_err();
        assert!(matches!(err, RegionError::IndexOverflow { .. }));
        // The glyph at offset 65530 would need index 65539.
        assert_eq!(region.vertex_count(), 65_530);
    }

    #[test]
    fn uncached_region_is_released() {
        let mut renderer = MockRenderer::new();
        let mut samples = 4;
        let bounds = render_uncached::<u32, _, _>(
            &mut renderer,
            RenderModes::MSAA,
            &BoxFont,
            "ab",
            None,
            &mut samples,
        )
        .unwrap();
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(renderer.drawn, vec![8]);
        assert_eq!(renderer.released, 1);
        assert_eq!(samples, MockRenderer::MSAA_SAMPLES);
    }

    #[test]
    fn render_into_clears_first() {
        let mut renderer = MockRenderer::new();
        let mut region = Region32::new(RenderModes::NORMAL);
        let mut samples = 0;
        render_into(&mut renderer, &mut region, &BoxFont, "abc", None, &mut samples).unwrap();
        render_into(&mut renderer, &mut region, &BoxFont, "a", None, &mut samples).unwrap();
        assert_eq!(region.vertex_count(), 4);
        assert_eq!(renderer.drawn, vec![12, 4]);
        assert_eq!(renderer.released, 0);
        assert_eq!(samples, 0);
    }

    #[test]
    fn uninitialized_renderer() {
        let mut renderer = MockRenderer::uninitialized();
        let mut region = Region32::new(RenderModes::NORMAL);
        let err = render_into(&mut renderer, &mut region, &BoxFont, "a", None, &mut 0)
            .unwrap_err();
        assert!(matches!(err, TextError::NotInitialized));
        assert_eq!(region.vertex_count(), 0);
    }

    #[test]
    fn counts_chars() {
        assert_eq!(char_count("a\nb\nc", '\n'), 2);
        assert_eq!(char_count("", 'a'), 0);
    }
}
