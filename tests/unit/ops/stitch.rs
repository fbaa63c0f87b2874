//! Tests for the stitch entry point

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use image::{Rgb, RgbImage};
    use std::path::{Path, PathBuf};
    use stitchslice::encode::format::OutputFormat;
    use stitchslice::layout::stitch::StitchLayout;
    use stitchslice::ops::stitch::{StitchRequest, plan_groups, stitch, stitch_on};
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([20, 40, 60]))
            .save(&path)
            .unwrap();
        path
    }

    // Tests a vertical stitch writes one dated sheet
    // Verified by formatting the date with dashes
    #[test]
    fn test_vertical_stitch_single_sheet() {
        let dir = TempDir::new().unwrap();
        let sources = vec![
            write_png(dir.path(), "1.png", 30, 10),
            write_png(dir.path(), "2.png", 30, 20),
        ];
        let out = dir.path().join("out");
        let mut request = StitchRequest::new(sources, &out);
        request.format = OutputFormat::Png;

        let outcome = stitch_on(&request, date());

        assert!(outcome.ok, "{}", outcome.message);
        assert_eq!(
            outcome.message,
            "Successfully created 1 images (vertical, PNG)."
        );
        let sheet = image::open(out.join("stitched_vertical_20250102_p1.png")).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (30, 30));
    }

    // Tests split stitching writes one sheet per balanced group
    // Verified by ignoring the split count
    #[test]
    fn test_split_into_parts() {
        let dir = TempDir::new().unwrap();
        let sources: Vec<PathBuf> = (1..=4)
            .map(|i| write_png(dir.path(), &format!("{i}.png"), 20, 20))
            .collect();
        let mut request = StitchRequest::new(sources, dir.path());
        request.split_count = 2;
        request.layout = StitchLayout::Horizontal;

        let outcome = stitch_on(&request, date());

        assert!(outcome.ok, "{}", outcome.message);
        assert!(dir.path().join("stitched_horizontal_20250102_p1.jpg").exists());
        assert!(dir.path().join("stitched_horizontal_20250102_p2.jpg").exists());
        let first = image::open(dir.path().join("stitched_horizontal_20250102_p1.jpg")).unwrap();
        assert_eq!((first.width(), first.height()), (40, 20));
    }

    // Tests existing outputs are never overwritten
    // Verified by writing to the unsuffixed name every time
    #[test]
    fn test_collision_suffix() {
        let dir = TempDir::new().unwrap();
        let sources = vec![write_png(dir.path(), "a.png", 8, 8)];
        let mut request = StitchRequest::new(sources, dir.path());
        request.base_name = Some("album".to_string());

        assert!(stitch_on(&request, date()).ok);
        assert!(stitch_on(&request, date()).ok);

        assert!(dir.path().join("album_p1.jpg").exists());
        assert!(dir.path().join("album_p1_1.jpg").exists());
    }

    // Tests undecodable sources are skipped and reported without failing
    // Verified by aborting the sheet on the first decode failure
    #[test]
    fn test_undecodable_source_skipped() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"garbage").unwrap();
        let sources = vec![
            write_png(dir.path(), "a.png", 10, 10),
            broken,
            write_png(dir.path(), "b.png", 10, 10),
        ];
        let mut request = StitchRequest::new(sources, dir.path().join("out"));
        request.format = OutputFormat::Png;

        let outcome = stitch_on(&request, date());

        assert!(outcome.ok, "{}", outcome.message);
        assert!(outcome.message.contains("Skipped 1 input(s)"));
        assert!(outcome.message.contains("broken.png"));
        let sheet = image::open(dir.path().join("out/stitched_vertical_20250102_p1.png")).unwrap();
        assert_eq!(sheet.height(), 20);
    }

    // Tests invalid requests fail before touching the file system
    // Verified by creating the output directory first
    #[test]
    fn test_invalid_requests() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("never");

        let empty = StitchRequest::new(Vec::new(), &out);
        assert!(!stitch(&empty).ok);

        let mut zero_grid = StitchRequest::new(vec![dir.path().join("a.png")], &out);
        zero_grid.layout = StitchLayout::Grid { rows: 0, cols: 2 };
        let outcome = stitch(&zero_grid);
        assert!(!outcome.ok);
        assert!(outcome.message.contains("grid"));

        let mut zero_width = StitchRequest::new(vec![dir.path().join("a.png")], &out);
        zero_width.target_width = Some(0);
        assert!(!stitch(&zero_width).ok);

        assert!(!out.exists());
    }

    // Tests a stitch where nothing decodes fails
    // Verified by reporting success for an empty sheet
    #[test]
    fn test_nothing_decodable_fails() {
        let dir = TempDir::new().unwrap();
        let request = StitchRequest::new(vec![dir.path().join("missing.png")], dir.path());

        let outcome = stitch_on(&request, date());

        assert!(!outcome.ok);
        assert!(outcome.message.contains("missing.png"));
    }

    // Tests grouping weights come from headers and grids never split
    // Verified by splitting grid layouts
    #[test]
    fn test_plan_groups() {
        let dir = TempDir::new().unwrap();
        let sources = vec![
            write_png(dir.path(), "tall.png", 10, 100),
            write_png(dir.path(), "s1.png", 10, 10),
            write_png(dir.path(), "s2.png", 10, 10),
            dir.path().join("unreadable.png"),
        ];
        let mut request = StitchRequest::new(sources, dir.path());
        request.split_count = 3;

        assert_eq!(plan_groups(&request), vec![0..1, 1..3, 3..4]);

        request.layout = StitchLayout::Grid { rows: 2, cols: 2 };
        assert_eq!(plan_groups(&request), vec![0..4]);
    }
}
