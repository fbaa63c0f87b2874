//! PDF documents made of full-page JPEG images

use crate::io::configuration::POINTS_PER_INCH;
use crate::io::error::Result;
use crate::raster::image::Resolution;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// One page: a baseline RGB JPEG and the density it should print at
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// JPEG stream embedded as-is with the `DCTDecode` filter
    pub jpeg: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Resolution that maps pixels to page points
    pub resolution: Resolution,
}

impl PdfPage {
    /// Page size in points
    pub fn size_points(&self) -> (f32, f32) {
        let to_points = |pixels: u32, dpi: f64| {
            let dpi = if dpi.is_finite() && dpi > 0.0 {
                dpi
            } else {
                POINTS_PER_INCH
            };
            (f64::from(pixels) * POINTS_PER_INCH / dpi) as f32
        };
        (
            to_points(self.width, self.resolution.x),
            to_points(self.height, self.resolution.y),
        )
    }
}

/// Serialize `pages` into a complete PDF byte stream
///
/// # Errors
///
/// Returns `Pdf` if a content stream cannot be encoded or the document
/// cannot be written
pub fn write_document(pages: &[PdfPage]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        kids.push(Object::Reference(add_page(&mut doc, pages_id, page)?));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn add_page(doc: &mut Document, pages_id: ObjectId, page: &PdfPage) -> Result<ObjectId> {
    let (width, height) = page.size_points();

    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(page.width),
            "Height" => i64::from(page.height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        page.jpeg.clone(),
    )
    .with_compression(false);
    let image_id = doc.add_object(image);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
    }))
}
