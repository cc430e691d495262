use image::{ DynamicImage, Rgb };
use imageproc::{ drawing, rect };
use log::info;

pub mod detect;
pub mod error;
pub mod ocr;
pub mod registry;
pub mod routes;

use detect::{ PlateDetector, PlateRegion };
use error::PlateScanError;
use ocr::PlateOcr;

/// One recognized plate: the raw OCR text and where it was found.
#[derive(Debug, Clone)]
pub struct PlateReading {
    pub text: String,
    pub region: PlateRegion,
}

/// Plate localization and OCR in one place.
#[derive(Default)]
pub struct PlateScan {
    detector: PlateDetector,
    ocr: PlateOcr,
}

impl PlateScan {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(detector: PlateDetector, ocr: PlateOcr) -> Self {
        Self { detector, ocr }
    }

    /// Recognize the plate in one image.
    /// `None` means no quadrilateral candidate was found or the OCR engine
    /// read nothing from the crop; both are expected outcomes, not errors.
    pub fn recognize(&self, img: &DynamicImage) -> Result<Option<PlateReading>, PlateScanError> {
        let gray = img.to_luma8();
        let region = match self.detector.locate(&gray) {
            Some(region) => region,
            None => {
                info!("no quadrilateral plate candidate found");
                return Ok(None);
            }
        };
        info!(
            "plate candidate at ({}, {}) size {}x{}",
            region.x, region.y, region.width, region.height
        );
        let plate = self.detector.crop(&gray, &region);
        let text = self.ocr.read_plate(&plate)?;
        Ok(text.map(|text| PlateReading { text, region }))
    }

    /// Draw the detected plate box onto a copy of the input.
    pub fn annotate(&self, img: &DynamicImage, reading: &PlateReading) -> DynamicImage {
        let mut canvas = img.to_rgb8();
        let region = &reading.region;
        let bounds = rect::Rect::at(region.x as i32, region.y as i32)
            .of_size(region.width, region.height);
        drawing::draw_hollow_rect_mut(&mut canvas, bounds, Rgb([255, 0, 0]));
        DynamicImage::ImageRgb8(canvas)
    }

}

#[cfg(test)]
mod test {

    use image::{ DynamicImage, GenericImageView, GrayImage, Luma };
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    use super::{ PlateReading, PlateScan };
    use crate::detect::PlateDetector;

    #[test]
    fn recognize_reports_none_without_a_candidate() {
        let scan = PlateScan::new();
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(160, 90, Luma([90u8])));
        // never reaches the OCR engine, so this is safe without tesseract
        assert!(scan.recognize(&blank).unwrap().is_none());
    }

    #[test]
    fn annotate_keeps_dimensions() {
        let mut gray = GrayImage::from_pixel(400, 200, Luma([10u8]));
        draw_filled_rect_mut(&mut gray, Rect::at(80, 60).of_size(240, 80), Luma([240u8]));
        let region = PlateDetector::default().locate(&gray).unwrap();

        let img = DynamicImage::ImageLuma8(gray);
        let scan = PlateScan::new();
        let reading = PlateReading { text: "IT20 BOM".to_string(), region };
        let annotated = scan.annotate(&img, &reading);
        assert_eq!(annotated.dimensions(), img.dimensions());
    }

}
