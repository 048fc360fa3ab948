use crate::{corner_mask, error::IconError};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::FilterType,
    ColorType, DynamicImage, ImageBuffer, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Source icon, relative to the working directory.
pub const SOURCE_PATH: &str = "icons/icon.png";

/// Directory receiving the generated icons.
pub const OUTPUT_DIR: &str = "icons";

pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

/// Generate `icon{size}.png` in `out_dir` for every entry of [`ICON_SIZES`].
///
/// Returns the written paths in size order. Files written before a failure
/// are left in place.
pub fn generate_icons(source: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, IconError> {
    if !source.exists() {
        return Err(IconError::MissingSource(source.to_path_buf()));
    }

    // Ensure the output directory exists
    create_dir_all(out_dir).map_err(|e| IconError::processing("create", out_dir, e))?;

    let source_image = load_image(source)?;
    log::info!(
        "Loaded source image {}, size: {}x{}",
        source.display(),
        source_image.width(),
        source_image.height()
    );

    let rounded = corner_mask::round_corners(source_image);

    let mut written = Vec::with_capacity(ICON_SIZES.len());
    for size in ICON_SIZES {
        let resized = resize_icon(&rounded, size);
        let output_path = out_dir.join(format!("icon{size}.png"));
        save_png(&resized, &output_path)?;
        log::info!("  ✓ Generated {} ({size}x{size})", output_path.display());
        written.push(output_path);
    }

    log::info!("Finished generating {} icons", written.len());
    Ok(written)
}

fn load_image(path: &Path) -> Result<DynamicImage, IconError> {
    image::open(path).map_err(|e| IconError::processing("load", path, e))
}

/// Premultiplied 16-bit RGBA, so resampling weights colour by coverage.
type PremultipliedImage = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Lanczos3 resize in premultiplied alpha; the hidden colour of fully
/// transparent pixels never bleeds into visible edges.
fn resize_icon(img: &RgbaImage, size: u32) -> RgbaImage {
    let premultiplied = premultiply(img);
    let resized = image::imageops::resize(&premultiplied, size, size, FilterType::Lanczos3);
    unpremultiply(&resized)
}

fn premultiply(img: &RgbaImage) -> PremultipliedImage {
    PremultipliedImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let scale = |c: u8| ((u32::from(c) * u32::from(a) * 257 + 127) / 255) as u16;
        Rgba([scale(r), scale(g), scale(b), u16::from(a) * 257])
    })
}

fn unpremultiply(img: &PremultipliedImage) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        if a == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let a = u32::from(a);
        let unscale = |c: u16| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
        Rgba([unscale(r), unscale(g), unscale(b), ((a + 128) / 257) as u8])
    })
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<(), IconError> {
    let file = File::create(path).map_err(|e| IconError::processing("create", path, e))?;
    let mut out_file = BufWriter::new(file);
    write_png(img, &mut out_file).map_err(|e| IconError::processing("encode", path, e))?;
    out_file
        .flush()
        .map_err(|e| IconError::processing("write", path, e))?;
    Ok(())
}

// Encode RGBA pixels as PNG with compression
fn write_png<W: Write>(img: &RgbaImage, w: W) -> image::ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
}
