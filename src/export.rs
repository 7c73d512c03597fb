//! Serialization out of the pipeline: raster bytes and print documents.
//!
//! These are one-shot, synchronous buffer-to-bytes conversions — no
//! cancellation, no partial output. JPEG flattens transparency onto
//! white first (the format has no alpha); PDF embeds the image as a
//! DCT-encoded XObject on a single page of exactly the requested
//! physical size, 72 points per inch.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::bitmap::{Bitmap, BitmapError};

/// Encode as PNG, preserving alpha.
pub fn to_png_bytes(bitmap: &Bitmap) -> Result<Vec<u8>, BitmapError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            bitmap.pixels(),
            bitmap.width(),
            bitmap.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| BitmapError::Encode(e.to_string()))?;
    Ok(out)
}

/// Encode as JPEG at `quality` (1–100), flattened onto white.
pub fn to_jpeg_bytes(bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, BitmapError> {
    let flat = bitmap.over_background([255, 255, 255, 255]);
    let rgb: Vec<u8> = flat
        .pixels()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(
            &rgb,
            bitmap.width(),
            bitmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| BitmapError::Encode(e.to_string()))?;
    Ok(out)
}

/// JPEG quality used inside PDF documents.
const PDF_JPEG_QUALITY: u8 = 95;

/// Points per inch in PDF user space.
const PT_PER_IN: f32 = 72.0;

/// Build a single-page PDF of exactly `width_in` × `height_in` inches
/// with the bitmap filling the page at 1:1 physical scale.
pub fn to_pdf_document(
    bitmap: &Bitmap,
    width_in: f32,
    height_in: f32,
) -> Result<Vec<u8>, BitmapError> {
    let jpeg = to_jpeg_bytes(bitmap, PDF_JPEG_QUALITY)?;
    let width_pt = width_in * PT_PER_IN;
    let height_pt = height_in * PT_PER_IN;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => bitmap.width() as i64,
            "Height" => bitmap.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    // Image space is the unit square; cm scales it to the full page.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width_pt.into(),
                    0.into(),
                    0.into(),
                    height_pt.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content
            .encode()
            .map_err(|e| BitmapError::Encode(e.to_string()))?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| BitmapError::Encode(e.to_string()))?;
    Ok(bytes)
}
