//! Tile sizing for newly inserted images

use crate::{ImageMeta, SizeStrategy};
use bento_grid::{draw_size, GridConfig};
use rand::Rng;

/// Pick a tile size for `image` under `strategy`.
///
/// Aspect-ratio sizing needs both natural dimensions; images without them
/// get a random draw instead.
pub fn tile_size<R: Rng + ?Sized>(
    image: &ImageMeta,
    strategy: SizeStrategy,
    config: &GridConfig,
    rng: &mut R,
) -> (u32, u32) {
    match (strategy, image.aspect_ratio()) {
        (SizeStrategy::AspectRatio, Some(aspect)) => aspect_size(aspect, config),
        _ => draw_size(config, rng),
    }
}

/// Size a tile at the default width with a row count matching `aspect`
/// (width over height) once rendered.
///
/// The row count lies in `min_h..=max_aspect_h` (and never exceeds
/// `max_rows`), however extreme the ratio.
pub fn aspect_size(aspect: f64, config: &GridConfig) -> (u32, u32) {
    let w = config.default_w.clamp(config.min_w, config.max_w);
    let pixels = &config.pixels;
    let column_px = f64::from(pixels.container_width_px) / f64::from(config.grid_width);
    let height_px = f64::from(w) * column_px / aspect;
    let row_pitch = f64::from(pixels.row_height_px + pixels.margin_px);
    let ceiling = config.max_aspect_h.min(config.max_rows);

    let rows = if row_pitch > 0.0 {
        // clamp before the cast; NaN falls through to the ceiling
        (height_px / row_pitch).ceil().min(f64::from(ceiling)) as u32
    } else {
        config.min_h
    };
    (w, rows.max(config.min_h))
}
