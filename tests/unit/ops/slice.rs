//! Tests for the linear and grid slice entry points

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::path::{Path, PathBuf};
    use stitchslice::encode::format::OutputFormat;
    use stitchslice::layout::cuts::SliceDirection;
    use stitchslice::ops::slice::{GridSliceRequest, SliceRequest, slice_grid, slice_linear};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([90, 120, 150]))
            .save(&path)
            .unwrap();
        path
    }

    fn dimensions(path: &Path) -> (u32, u32) {
        let image = image::open(path).unwrap();
        (image.width(), image.height())
    }

    // Tests horizontal slices land in a folder named after the source
    // Verified by writing pieces next to the source
    #[test]
    fn test_horizontal_slices_in_source_folder() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "long.png", 40, 90);
        let out = dir.path().join("out");
        let mut request = SliceRequest::new(&source, &out, 3);
        request.format = OutputFormat::Png;

        let outcome = slice_linear(&request);

        assert!(outcome.ok, "{}", outcome.message);
        assert_eq!(
            outcome.message,
            "Successfully sliced 3 parts (horizontal, PNG) into folder 'long'."
        );
        for name in ["long_01.png", "long_02.png", "long_03.png"] {
            assert_eq!(dimensions(&out.join("long").join(name)), (40, 30));
        }
    }

    // Tests vertical slices carry the v tag and keep the full height
    // Verified by cutting along the wrong axis
    #[test]
    fn test_vertical_slices() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "wide.png", 100, 20);
        let mut request = SliceRequest::new(&source, dir.path(), 4);
        request.direction = SliceDirection::Vertical;
        request.format = OutputFormat::Png;

        let outcome = slice_linear(&request);

        assert!(outcome.ok, "{}", outcome.message);
        assert_eq!(dimensions(&dir.path().join("wide/wide_v01.png")), (25, 20));
        assert_eq!(dimensions(&dir.path().join("wide/wide_v04.png")), (25, 20));
        assert!(!dir.path().join("wide/wide_05.png").exists());
    }

    // Tests content-aware slicing still covers the whole image
    // Verified by dropping the remainder after the last cut
    #[test]
    fn test_content_aware_covers_image() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "flat.png", 30, 301);
        let mut request = SliceRequest::new(&source, dir.path(), 3);
        request.content_aware = true;
        request.format = OutputFormat::Png;

        assert!(slice_linear(&request).ok);

        let total: u32 = (1..=3)
            .map(|i| dimensions(&dir.path().join(format!("flat/flat_{i:02}.png"))).1)
            .sum();
        assert_eq!(total, 301);
    }

    // Tests grid cells are named by row and column
    // Verified by emitting cells in column-major order
    #[test]
    fn test_grid_cells_named() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "poster.png", 60, 40);
        let mut request = GridSliceRequest::new(&source, dir.path(), 2, 3);
        request.format = OutputFormat::Png;

        let outcome = slice_grid(&request);

        assert!(outcome.ok, "{}", outcome.message);
        assert!(outcome.message.starts_with("Successfully sliced 6 grid parts"));
        let cells = dir.path().join("poster");
        assert_eq!(dimensions(&cells.join("poster_r01_c01.png")), (20, 20));
        assert_eq!(dimensions(&cells.join("poster_r02_c03.png")), (20, 20));
        assert!(!cells.join("poster_r03_c01.png").exists());
    }

    // Tests the base-name override renames both folder and files
    // Verified by overriding the folder only
    #[test]
    fn test_base_name_override() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "scan.png", 10, 20);
        let mut request = SliceRequest::new(&source, dir.path(), 2);
        request.base_name = Some("chapter".to_string());

        assert!(slice_linear(&request).ok);

        assert!(dir.path().join("chapter/chapter_01.jpg").exists());
        assert!(dir.path().join("chapter/chapter_02.jpg").exists());
        assert!(!dir.path().join("scan").exists());
    }

    // Tests a target width rescales before cutting
    // Verified by cutting at source resolution
    #[test]
    fn test_target_width_applied_first() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "big.png", 80, 160);
        let mut request = GridSliceRequest::new(&source, dir.path(), 2, 2);
        request.target_width = Some(40);
        request.format = OutputFormat::Png;

        assert!(slice_grid(&request).ok);

        let last = dir.path().join("big/big_r02_c02.png");
        assert_eq!(dimensions(&last), (20, 40));
    }

    // Tests invalid requests and unreadable sources fail
    // Verified by producing empty folders on failure
    #[test]
    fn test_invalid_requests_fail() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "short.png", 10, 4);

        assert!(!slice_linear(&SliceRequest::new(&source, dir.path(), 0)).ok);
        assert!(!slice_linear(&SliceRequest::new(&source, dir.path(), 5)).ok);
        assert!(!slice_grid(&GridSliceRequest::new(&source, dir.path(), 0, 1)).ok);
        assert!(!slice_grid(&GridSliceRequest::new(&source, dir.path(), 5, 1)).ok);

        let missing = SliceRequest::new(dir.path().join("missing.png"), dir.path(), 2);
        let outcome = slice_linear(&missing);
        assert!(!outcome.ok);
        assert!(outcome.message.contains("missing.png"));
        assert!(!dir.path().join("missing").exists());
    }

    // Tests an unreachable size ceiling still writes every piece
    // Verified by failing pieces that miss the ceiling
    #[test]
    fn test_unreachable_ceiling_still_writes() {
        let dir = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let noise = RgbImage::from_fn(300, 300, |_, _| {
            Rgb([rng.random(), rng.random(), rng.random()])
        });
        let source = dir.path().join("noise.png");
        noise.save(&source).unwrap();
        let mut request = SliceRequest::new(&source, dir.path(), 2);
        request.ceiling_kb = Some(1);

        let outcome = slice_linear(&request);

        assert!(outcome.ok, "{}", outcome.message);
        assert!(dir.path().join("noise/noise_01.jpg").exists());
        assert!(dir.path().join("noise/noise_02.jpg").exists());
    }
}
