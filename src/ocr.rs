use image::imageops::FilterType;
use image::{ DynamicImage, GrayImage };
use log::{ debug, info };
use rusty_tesseract::{ Args, Image };

use std::collections::HashMap;

use crate::error::PlateScanError;

// Characters tesseract is allowed to emit for a plate.
const PLATE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 ";

/// Plate text recognition through the system tesseract engine, tuned for
/// single-line plate crops.
pub struct PlateOcr {
    args: Args,
}

impl PlateOcr {

    pub fn new() -> Self {
        let mut config_variables = HashMap::new();
        config_variables.insert(
            "tessedit_char_whitelist".to_string(),
            PLATE_ALPHABET.to_string(),
        );
        let args = Args {
            lang: "eng".to_string(),
            config_variables,
            dpi: Some(300),
            // single text line
            psm: Some(7),
            oem: Some(3),
        };
        Self { args }
    }

    /// Run OCR over a plate crop. `None` means the engine read nothing,
    /// which is a normal outcome for a bad crop, not an error.
    pub fn read_plate(&self, plate: &GrayImage) -> Result<Option<String>, PlateScanError> {
        let img = upscale_for_ocr(plate);
        let tess_img = Image::from_dynamic_image(&img)?;
        let raw = rusty_tesseract::image_to_string(&tess_img, &self.args)?;
        debug!("tesseract raw output: {:?}", raw);
        Ok(tidy(&raw))
    }

}

impl Default for PlateOcr {
    fn default() -> Self {
        Self::new()
    }
}

// Plate crops are small and tesseract wants glyphs at least ~10 px tall,
// so small crops get upscaled before recognition.
fn upscale_for_ocr(plate: &GrayImage) -> DynamicImage {
    let img = DynamicImage::ImageLuma8(plate.clone());
    let min_side = plate.width().min(plate.height());
    let factor = if min_side < 100 {
        4
    } else if min_side < 200 {
        2
    } else {
        1
    };
    if factor == 1 {
        return img;
    }
    info!(
        "upscaling {}x{} plate crop {}x for OCR",
        plate.width(),
        plate.height(),
        factor
    );
    img.resize(
        plate.width() * factor,
        plate.height() * factor,
        FilterType::Lanczos3,
    )
}

/// Collapse the engine output to a single line; whitespace-only output
/// counts as no reading.
pub fn tidy(raw: &str) -> Option<String> {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
