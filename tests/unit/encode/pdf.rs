//! Tests for PDF assembly around JPEG pages

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use lopdf::{Document, Object};
    use stitchslice::encode::encoder::encode_jpeg;
    use stitchslice::encode::pdf::{PdfPage, write_document};
    use stitchslice::raster::image::Resolution;

    fn page(width: u32, height: u32, dpi: f64) -> PdfPage {
        let rgb = RgbImage::from_pixel(width, height, Rgb([120, 60, 30]));
        PdfPage {
            jpeg: encode_jpeg(&rgb, 80, None).unwrap(),
            width,
            height,
            resolution: Resolution::uniform(dpi),
        }
    }

    // Tests page size in points follows the resolution
    // Verified by multiplying by the DPI instead of dividing
    #[test]
    fn test_size_points_from_resolution() {
        let (width, height) = page(144, 72, 144.0).size_points();

        assert!((width - 72.0).abs() < 1e-3);
        assert!((height - 36.0).abs() < 1e-3);
    }

    // Tests invalid resolutions map one pixel to one point
    // Verified by dividing by a zero DPI
    #[test]
    fn test_size_points_with_invalid_resolution() {
        let (width, height) = page(50, 20, 0.0).size_points();

        assert!((width - 50.0).abs() < 1e-3);
        assert!((height - 20.0).abs() < 1e-3);
    }

    // Tests every page becomes one document page with a matching media box
    // Verified by writing all images onto the first page
    #[test]
    fn test_write_document_pages() {
        let pages = [page(100, 50, 72.0), page(30, 60, 72.0), page(10, 10, 72.0)];

        let bytes = write_document(&pages).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        let page_ids: Vec<_> = doc.get_pages().into_values().collect();
        assert_eq!(page_ids.len(), 3);

        let first = doc.get_dictionary(page_ids[0]).unwrap();
        let media_box = first.get(b"MediaBox").and_then(Object::as_array).unwrap();
        let extents: Vec<f32> = media_box
            .iter()
            .map(|value| value.as_float().unwrap())
            .collect();
        assert_eq!(extents, vec![0.0, 0.0, 100.0, 50.0]);
    }

    // Tests page images are embedded as untouched DCT streams
    // Verified by letting lopdf compress the image stream
    #[test]
    fn test_jpeg_embedded_verbatim() {
        let single = page(16, 16, 96.0);

        let bytes = write_document(std::slice::from_ref(&single)).unwrap();

        let found = bytes
            .windows(single.jpeg.len())
            .any(|window| window == single.jpeg.as_slice());
        assert!(found);
    }
}
