use image::imageops;
use image::GrayImage;
use imageproc::contours::{ find_contours, Contour };
use imageproc::edges::canny;
use imageproc::filter::bilateral_filter;
use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point;
use log::debug;

use std::cmp::Ordering;

/// A plate candidate: the four approximated corner points and the
/// axis-aligned bounding rectangle they span, clamped to the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateRegion {
    pub corners: [Point<u32>; 4],
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Contour-based plate localization: bilateral filter, Canny edges,
/// contour search, then the largest contour that approximates to a
/// quadrilateral wins.
pub struct PlateDetector {
    pub blur_window: u32,
    pub blur_sigma_color: f32,
    pub blur_sigma_spatial: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    pub max_candidates: usize,
    pub approx_epsilon: f64,
}

impl Default for PlateDetector {
    fn default() -> Self {
        Self {
            blur_window: 11,
            blur_sigma_color: 17.0,
            blur_sigma_spatial: 17.0,
            canny_low: 30.0,
            canny_high: 200.0,
            max_candidates: 10,
            approx_epsilon: 10.0,
        }
    }
}

impl PlateDetector {

    /// Find the most plausible plate region in a grayscale image.
    /// Only the largest `max_candidates` contours are considered, and the
    /// first one whose polygon approximation has exactly four vertices is
    /// taken as the plate.
    pub fn locate(&self, gray: &GrayImage) -> Option<PlateRegion> {
        if gray.width() < 3 || gray.height() < 3 {
            return None;
        }
        let smoothed = bilateral_filter(
            gray,
            self.blur_window,
            self.blur_sigma_color,
            self.blur_sigma_spatial,
        );
        let edges = canny(&smoothed, self.canny_low, self.canny_high);

        let contours: Vec<Contour<u32>> = find_contours(&edges);
        debug!("found {} contours in edge map", contours.len());
        let mut candidates: Vec<(f64, Vec<Point<u32>>)> = contours
            .into_iter()
            .map(|c| (contour_area(&c.points), c.points))
            .collect();
        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        for (area, points) in candidates.iter().take(self.max_candidates) {
            let approx = approximate_polygon_dp(points, self.approx_epsilon, true);
            if approx.len() == 4 {
                debug!("quadrilateral candidate with contour area {:.1}", area);
                let corners = [approx[0], approx[1], approx[2], approx[3]];
                return self.region_from_corners(gray, corners);
            }
        }
        None
    }

    /// Cut the plate region out of the grayscale image.
    pub fn crop(&self, gray: &GrayImage, region: &PlateRegion) -> GrayImage {
        imageops::crop_imm(gray, region.x, region.y, region.width, region.height).to_image()
    }

    fn region_from_corners(&self, gray: &GrayImage, corners: [Point<u32>; 4]) -> Option<PlateRegion> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        for p in &corners {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        max_x = max_x.min(gray.width() - 1);
        max_y = max_y.min(gray.height() - 1);
        if min_x >= max_x || min_y >= max_y {
            return None;
        }
        Some(PlateRegion {
            corners,
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

}

// Shoelace formula over the contour points.
fn contour_area(points: &[Point<u32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        doubled += (p.x as f64) * (q.y as f64) - (q.x as f64) * (p.y as f64);
    }
    doubled.abs() / 2.0
}

#[cfg(test)]
mod test {

    use image::{ GrayImage, Luma };
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::point::Point;
    use imageproc::rect::Rect;

    use super::{ contour_area, PlateDetector };

    fn plate_like_image() -> GrayImage {
        let mut img = GrayImage::from_pixel(400, 200, Luma([10u8]));
        draw_filled_rect_mut(&mut img, Rect::at(80, 60).of_size(240, 80), Luma([240u8]));
        img
    }

    #[test]
    fn locates_high_contrast_rectangle() {
        let detector = PlateDetector::default();
        let region = detector
            .locate(&plate_like_image())
            .expect("rectangle should be located");
        assert!(region.x >= 70 && region.x <= 90, "x: {}", region.x);
        assert!(region.y >= 50 && region.y <= 70, "y: {}", region.y);
        assert!(region.width >= 220 && region.width <= 260, "width: {}", region.width);
        assert!(region.height >= 60 && region.height <= 100, "height: {}", region.height);
    }

    #[test]
    fn blank_image_has_no_candidate() {
        let detector = PlateDetector::default();
        let blank = GrayImage::from_pixel(200, 100, Luma([128u8]));
        assert!(detector.locate(&blank).is_none());
    }

    #[test]
    fn tiny_image_has_no_candidate() {
        let detector = PlateDetector::default();
        let tiny = GrayImage::from_pixel(2, 2, Luma([255u8]));
        assert!(detector.locate(&tiny).is_none());
    }

    #[test]
    fn crop_matches_region_bounds() {
        let img = plate_like_image();
        let detector = PlateDetector::default();
        let region = detector.locate(&img).unwrap();
        let crop = detector.crop(&img, &region);
        assert_eq!(crop.dimensions(), (region.width, region.height));
    }

    #[test]
    fn contour_area_of_squares() {
        let unit = [
            Point::new(0u32, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ];
        assert_eq!(contour_area(&unit), 1.0);

        let ten = [
            Point::new(0u32, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_eq!(contour_area(&ten), 100.0);

        let degenerate = [Point::new(3u32, 4), Point::new(5, 6)];
        assert_eq!(contour_area(&degenerate), 0.0);
    }

}
