use image::{GrayImage, Luma};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use super::{BitMatrix, MAX_SIZE};
use crate::error::EncodeError;

pub const DARK: Luma<u8> = Luma([0]);
pub const LIGHT: Luma<u8> = Luma([255]);

// Geometry
//------------------------------------------------------------------------------

/// Placement of a symbol inside a fixed size canvas.
///
/// Every module becomes a `scale x scale` square. The symbol plus its quiet zone is
/// scaled by the largest integer that fits the requested size and centered; leftover
/// pixels go to the padding. If the requested size is smaller than the symbol with its
/// quiet zone, the canvas grows to fit at scale 1. Canvases wider or taller than
/// [`MAX_SIZE`] are refused.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub left: u32,
    pub top: u32,
}

impl Geometry {
    pub fn new(
        symbol_w: u32,
        quiet_zone: u32,
        width: u32,
        height: u32,
    ) -> Result<Self, EncodeError> {
        let unsupported = || EncodeError::UnsupportedCanvas { width, height, quiet_zone };
        let full_w = quiet_zone
            .checked_mul(2)
            .and_then(|q| q.checked_add(symbol_w))
            .filter(|&w| w > 0)
            .ok_or_else(unsupported)?;

        let width = width.max(full_w);
        let height = height.max(full_w);
        if width > MAX_SIZE || height > MAX_SIZE {
            return Err(unsupported());
        }

        let scale = (width / full_w).min(height / full_w);
        let left = (width - symbol_w * scale) / 2;
        let top = (height - symbol_w * scale) / 2;
        Ok(Self { width, height, scale, left, top })
    }
}

#[cfg(test)]
mod geometry_tests {
    use test_case::test_case;

    use super::Geometry;
    use crate::error::EncodeError;

    #[test_case(21, 400, Geometry { width: 400, height: 400, scale: 13, left: 63, top: 63 }; "version_1")]
    #[test_case(25, 400, Geometry { width: 400, height: 400, scale: 12, left: 50, top: 50 }; "version_2")]
    #[test_case(177, 400, Geometry { width: 400, height: 400, scale: 2, left: 23, top: 23 }; "version_40")]
    #[test_case(21, 10, Geometry { width: 29, height: 29, scale: 1, left: 4, top: 4 }; "canvas_too_small")]
    fn test_geometry(symbol_w: u32, size: u32, exp: Geometry) {
        assert_eq!(Geometry::new(symbol_w, 4, size, size).unwrap(), exp);
    }

    #[test_case(21, u32::MAX, 400; "quiet_zone_overflow")]
    #[test_case(21, 3_000, 400; "quiet_zone_wider_than_limit")]
    #[test_case(21, 4, 100_000; "canvas_too_large")]
    #[test_case(0, 0, 400; "empty_symbol")]
    fn test_geometry_unsupported(symbol_w: u32, quiet_zone: u32, size: u32) {
        assert!(matches!(
            Geometry::new(symbol_w, quiet_zone, size, size),
            Err(EncodeError::UnsupportedCanvas { .. })
        ));
    }

    #[test]
    fn test_geometry_at_limit() {
        let geo = Geometry::new(177, 64, 4096, 4096).unwrap();
        assert_eq!((geo.width, geo.scale), (4096, 13));
    }

    #[test]
    fn test_geometry_non_square_canvas() {
        let geo = Geometry::new(21, 4, 400, 200).unwrap();
        assert_eq!(geo.scale, 6);
        assert_eq!((geo.left, geo.top), ((400 - 126) / 2, (200 - 126) / 2));
    }
}

// Renderer
//------------------------------------------------------------------------------

/// Rasterizes `matrix` onto a white canvas of at least `width x height` pixels.
pub fn render(
    matrix: &BitMatrix,
    quiet_zone: u32,
    width: u32,
    height: u32,
) -> Result<GrayImage, EncodeError> {
    let geo = Geometry::new(matrix.width() as u32, quiet_zone, width, height)?;
    tracing::debug!(
        symbol_w = matrix.width(),
        scale = geo.scale,
        left = geo.left,
        top = geo.top,
        "Rendering symbol"
    );

    let mut canvas = GrayImage::from_pixel(geo.width, geo.height, LIGHT);
    for (x, y) in matrix.iter_dark() {
        let px = geo.left + x as u32 * geo.scale;
        let py = geo.top + y as u32 * geo.scale;
        let module = Rect::at(px as i32, py as i32).of_size(geo.scale, geo.scale);
        draw_filled_rect_mut(&mut canvas, module, DARK);
    }

    Ok(canvas)
}

#[cfg(test)]
mod render_tests {
    use super::{render, BitMatrix, DARK, LIGHT};

    #[test]
    fn test_render_small_matrix() {
        let matrix = BitMatrix::from_rows(&["#.", ".#"]);
        // full width 4, scale 2, padding (8 - 4) / 2 = 2
        let img = render(&matrix, 1, 8, 8).unwrap();
        assert_eq!(img.dimensions(), (8, 8));

        for y in 0..8 {
            for x in 0..8 {
                let dark = matches!((x, y), (2..=3, 2..=3) | (4..=5, 4..=5));
                let exp = if dark { DARK } else { LIGHT };
                assert_eq!(*img.get_pixel(x, y), exp, "Pixel mismatch at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_render_uneven_padding() {
        let matrix = BitMatrix::from_rows(&["###", "###", "###"]);
        // full width 5, scale 2, symbol spans 6px, padding (11 - 6) / 2 = 2
        let img = render(&matrix, 1, 11, 11).unwrap();
        assert_eq!(img.dimensions(), (11, 11));
        assert_eq!(*img.get_pixel(1, 1), LIGHT);
        assert_eq!(*img.get_pixel(2, 2), DARK);
        assert_eq!(*img.get_pixel(7, 7), DARK);
        assert_eq!(*img.get_pixel(8, 8), LIGHT);
        assert_eq!(*img.get_pixel(10, 10), LIGHT);
    }

    #[test]
    fn test_render_quiet_zone_is_white() {
        let matrix = BitMatrix::from_rows(&["###", "###", "###"]);
        let img = render(&matrix, 4, 110, 110).unwrap();
        // full width 11, scale 10, padding (110 - 30) / 2 = 40
        for i in 0..110 {
            assert_eq!(*img.get_pixel(i, 39), LIGHT);
            assert_eq!(*img.get_pixel(39, i), LIGHT);
            assert_eq!(*img.get_pixel(i, 70), LIGHT);
            assert_eq!(*img.get_pixel(70, i), LIGHT);
        }
        assert_eq!(*img.get_pixel(40, 40), DARK);
        assert_eq!(*img.get_pixel(69, 69), DARK);
    }
}
