//! Per-channel pixel statistics used to judge how busy a strip of pixels is

use crate::raster::image::{PixelMode, RasterImage, Rect};
use image::{DynamicImage, GenericImageView, Pixel};
use ndarray::{Array2, Axis};

/// Population variance of every channel over all pixels of `view`
///
/// Gray sources yield one value, RGB and palette sources three, RGBA four.
pub fn channel_variances(view: &RasterImage) -> Vec<f64> {
    let samples = channel_samples(view.pixels(), view.mode());
    if samples.nrows() == 0 {
        return vec![0.0; samples.ncols()];
    }
    samples.var_axis(Axis(0), 0.0).to_vec()
}

/// Sum of per-channel variances of the pixels inside `rect`
///
/// Near zero means the strip is visually uniform. Returns `None` when the
/// rectangle is empty or reaches outside the image.
pub fn region_busyness(image: &RasterImage, rect: Rect) -> Option<f64> {
    let strip = image.crop(rect).ok()?;
    Some(channel_variances(&strip).iter().sum())
}

// Rows are pixels, columns are channels, samples scaled to 8 bits
fn channel_samples(pixels: &DynamicImage, mode: PixelMode) -> Array2<f64> {
    let count = (pixels.width() as usize) * (pixels.height() as usize);
    match mode {
        PixelMode::Grayscale => collect(&pixels.to_luma8(), count, 1),
        PixelMode::Rgba => collect(&pixels.to_rgba8(), count, 4),
        PixelMode::Rgb | PixelMode::Indexed => collect(&pixels.to_rgb8(), count, 3),
    }
}

fn collect<I>(buffer: &I, count: usize, channels: usize) -> Array2<f64>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let mut samples = Array2::zeros((count, channels));
    for (index, (_, _, pixel)) in buffer.pixels().enumerate() {
        for (channel, value) in pixel.channels().iter().take(channels).enumerate() {
            if let Some(slot) = samples.get_mut((index, channel)) {
                *slot = f64::from(*value);
            }
        }
    }
    samples
}
