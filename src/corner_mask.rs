//! Corner softening for icon sources.
//!
//! Near-white pixels close to each corner of the image get an alpha that
//! grows with their distance from the corner point, so a white square
//! background fades out into a rounded silhouette.

use image::{ColorType, DynamicImage, Pixel, Rgba, RgbaImage};

/// Pixels whose red, green and blue all exceed this value count as white.
pub const WHITE_THRESHOLD: u8 = 240;

/// The corner radius is this fraction of the shorter image side.
const RADIUS_DIVISOR: u32 = 4;

/// Parameters of the corner mask for one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskParams {
    pub corner_radius: u32,
    pub white_threshold: u8,
}

impl MaskParams {
    /// Derives the mask for a `width` x `height` image.
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        Self {
            corner_radius: width.min(height) / RADIUS_DIVISOR,
            white_threshold: WHITE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Lookup order when deciding which corner owns a pixel.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Whether (x, y) lies in this corner's `radius` x `radius` bounding square.
    pub fn contains(self, x: u32, y: u32, width: u32, height: u32, radius: u32) -> bool {
        let left = x < radius;
        let right = x >= width.saturating_sub(radius);
        let top = y < radius;
        let bottom = y >= height.saturating_sub(radius);

        match self {
            Corner::TopLeft => left && top,
            Corner::TopRight => right && top,
            Corner::BottomLeft => left && bottom,
            Corner::BottomRight => right && bottom,
        }
    }

    /// Offset from (x, y) to the extreme pixel of this corner.
    pub fn offset(self, x: u32, y: u32, width: u32, height: u32) -> (u32, u32) {
        match self {
            Corner::TopLeft => (x, y),
            Corner::TopRight => (width - 1 - x, y),
            Corner::BottomLeft => (x, height - 1 - y),
            Corner::BottomRight => (width - 1 - x, height - 1 - y),
        }
    }
}

/// First corner whose bounding square holds (x, y), if any.
pub fn corner_for(x: u32, y: u32, width: u32, height: u32, radius: u32) -> Option<Corner> {
    Corner::ALL
        .into_iter()
        .find(|corner| corner.contains(x, y, width, height, radius))
}

pub fn is_white(pixel: &Rgba<u8>, threshold: u8) -> bool {
    pixel.channels()[..3].iter().all(|&channel| channel > threshold)
}

/// Alpha for a white pixel at `distance` from its corner: 0 on the corner
/// point, 255 on the arc.
pub fn masked_alpha(distance: f64, radius: u32) -> u8 {
    (255.0 * distance / f64::from(radius)).round().clamp(0.0, 255.0) as u8
}

/// Rewrites the alpha of white pixels inside the corner arcs in place and
/// returns how many pixels were touched.
pub fn apply_corner_mask(img: &mut RgbaImage, params: &MaskParams) -> usize {
    let (width, height) = img.dimensions();
    let radius = params.corner_radius;
    if radius == 0 {
        return 0;
    }

    let row_len = width as usize * 4;
    let mut rewritten = 0;

    for (y, row) in img.chunks_exact_mut(row_len).enumerate() {
        let y = y as u32;
        if y >= radius && y < height - radius {
            continue;
        }

        // 2 * radius <= width, so the two column ranges never overlap
        for x in (0..radius).chain(width - radius..width) {
            let Some(corner) = corner_for(x, y, width, height, radius) else {
                continue;
            };

            let (dx, dy) = corner.offset(x, y, width, height);
            let distance = ((u64::from(dx).pow(2) + u64::from(dy).pow(2)) as f64).sqrt();
            if distance > f64::from(radius) {
                continue;
            }

            let start = x as usize * 4;
            let pixel = Rgba::from_slice_mut(&mut row[start..start + 4]);
            if is_white(pixel, params.white_threshold) {
                pixel[3] = masked_alpha(distance, radius);
                rewritten += 1;
            }
        }
    }

    rewritten
}

/// Converts `source` to RGBA and softens its corners.
pub fn round_corners(source: DynamicImage) -> RgbaImage {
    if source.color() != ColorType::Rgba8 {
        log::info!("Converted {:?} image to RGBA", source.color());
    }

    let mut img = source.into_rgba8();
    let params = MaskParams::for_dimensions(img.width(), img.height());
    let rewritten = apply_corner_mask(&mut img, &params);

    log::info!(
        "Softened white corners (radius {}px, {} pixels made transparent)",
        params.corner_radius,
        rewritten
    );
    img
}
