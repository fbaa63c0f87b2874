//! Tests for the PDF merge entry point

#[cfg(test)]
mod tests {
    use image::codecs::gif::GifEncoder;
    use image::{Delay, DynamicImage, Frame, Rgb, RgbImage, Rgba, RgbaImage};
    use lopdf::Document;
    use std::path::{Path, PathBuf};
    use stitchslice::io::configuration::MERGE_FALLBACK_DPI;
    use stitchslice::ops::merge::{MergeRequest, merge_to_pdf, page_for};
    use stitchslice::raster::image::{RasterImage, Resolution};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 10, 10]))
            .save(&path)
            .unwrap();
        path
    }

    fn write_gif(dir: &Path, name: &str, frames: usize) -> PathBuf {
        let path = dir.join(name);
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = GifEncoder::new(file);
        let frames = (0..frames).map(|i| {
            let shade = u8::try_from(i * 60).unwrap();
            Frame::from_parts(
                RgbaImage::from_pixel(8, 8, Rgba([shade, 0, 0, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(50, 1),
            )
        });
        encoder.encode_frames(frames).unwrap();
        path
    }

    fn page_count(path: &Path) -> usize {
        let bytes = std::fs::read(path).unwrap();
        Document::load_mem(&bytes).unwrap().get_pages().len()
    }

    // Tests every frame of every source becomes a page
    // Verified by keeping only the first GIF frame
    #[test]
    fn test_merge_counts_frames() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("book.pdf");
        let request = MergeRequest {
            sources: vec![
                write_png(dir.path(), "a.png", 20, 30),
                write_gif(dir.path(), "anim.gif", 2),
                write_png(dir.path(), "b.png", 30, 20),
            ],
            output_path: output.clone(),
            page_ceiling_kb: None,
        };

        let outcome = merge_to_pdf(&request);

        assert!(outcome.ok, "{}", outcome.message);
        assert_eq!(
            outcome.message,
            "Successfully merged 4 images into book.pdf"
        );
        assert_eq!(page_count(&output), 4);
    }

    // Tests undecodable sources are skipped and named
    // Verified by failing the whole merge on one bad source
    #[test]
    fn test_merge_skips_undecodable() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.jpg");
        std::fs::write(&broken, b"not a jpeg").unwrap();
        let output = dir.path().join("nested/out.pdf");
        let request = MergeRequest {
            sources: vec![broken, write_png(dir.path(), "ok.png", 10, 10)],
            output_path: output.clone(),
            page_ceiling_kb: Some(50),
        };

        let outcome = merge_to_pdf(&request);

        assert!(outcome.ok, "{}", outcome.message);
        assert!(outcome.message.contains("Skipped 1 input(s)"));
        assert!(outcome.message.contains("broken.jpg"));
        assert_eq!(page_count(&output), 1);
    }

    // Tests a merge with nothing to write fails without creating a file
    // Verified by writing an empty document
    #[test]
    fn test_merge_nothing_fails() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("empty.pdf");

        let empty = MergeRequest {
            sources: Vec::new(),
            output_path: output.clone(),
            page_ceiling_kb: None,
        };
        let outcome = merge_to_pdf(&empty);
        assert!(!outcome.ok);
        assert!(outcome.message.contains("no images selected"));

        let missing = MergeRequest {
            sources: vec![dir.path().join("gone.png")],
            output_path: output.clone(),
            page_ceiling_kb: None,
        };
        let outcome = merge_to_pdf(&missing);
        assert!(!outcome.ok);
        assert!(outcome.message.contains("no valid images to merge"));
        assert!(!output.exists());
    }

    // Tests pages keep source resolution and fall back otherwise
    // Verified by using the page fallback for every page
    #[test]
    fn test_page_resolution() {
        let frame = RasterImage::new(DynamicImage::ImageRgb8(RgbImage::new(50, 20)));

        let page = page_for(&frame, None).unwrap();
        assert_eq!(page.resolution, Resolution::uniform(MERGE_FALLBACK_DPI));
        assert_eq!((page.width, page.height), (50, 20));
        assert!(page.jpeg.starts_with(&[0xFF, 0xD8]));

        let dense = frame.with_resolution(Some(Resolution::uniform(300.0)));
        let page = page_for(&dense, Some(100)).unwrap();
        assert_eq!(page.resolution, Resolution::uniform(300.0));
    }
}
