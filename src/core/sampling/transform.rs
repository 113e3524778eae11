use crate::types::PixelOffset;

/// GDAL-ordered affine transform
/// `[origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// Pixel space: x = column, y = row
    pub const IDENTITY: GeoTransform = GeoTransform([0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Geographic (x, y) of a pixel, taken at `offset` inside the cell
    pub fn pixel_to_geo(&self, row: usize, col: usize, offset: PixelOffset) -> (f64, f64) {
        let gt = &self.0;
        let c = col as f64 + offset.fraction();
        let r = row as f64 + offset.fraction();
        (
            gt[0] + c * gt[1] + r * gt[2],
            gt[3] + c * gt[4] + r * gt[5],
        )
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORTH_UP: GeoTransform = GeoTransform([-90.0, 0.5, 0.0, 30.0, 0.0, -0.25]);

    #[test]
    fn center_of_pixel() {
        assert_eq!(
            NORTH_UP.pixel_to_geo(0, 0, PixelOffset::Center),
            (-89.75, 29.875)
        );
        assert_eq!(
            NORTH_UP.pixel_to_geo(2, 3, PixelOffset::Center),
            (-88.25, 29.375)
        );
    }

    #[test]
    fn upper_left_corner() {
        assert_eq!(
            NORTH_UP.pixel_to_geo(2, 3, PixelOffset::UpperLeft),
            (-88.5, 29.5)
        );
    }

    #[test]
    fn rotation_terms_are_applied() {
        let gt = GeoTransform([10.0, 1.0, 0.5, 20.0, 0.25, -1.0]);
        // c = 1.5, r = 0.5
        assert_eq!(gt.pixel_to_geo(0, 1, PixelOffset::Center), (11.75, 19.875));
    }

    #[test]
    fn identity_maps_to_pixel_space() {
        assert_eq!(
            GeoTransform::default().pixel_to_geo(4, 7, PixelOffset::Center),
            (7.5, 4.5)
        );
    }
}
