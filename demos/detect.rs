use image::Rgb;
use imageproc::{ drawing, rect };

use std::env::args;
use std::error::Error;
use std::process;

use plate_scan::detect::PlateDetector;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = args();
    args.next();
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("didn't get an image from args");
            process::exit(1);
        }
    };

    let img = image::open(&path)?;
    let gray = img.to_luma8();
    let detector = PlateDetector::default();
    let region = match detector.locate(&gray) {
        Some(region) => region,
        None => {
            eprintln!("no plate-shaped contour in {}", path);
            process::exit(1);
        }
    };
    println!(
        "plate candidate at ({}, {}) size {}x{}",
        region.x, region.y, region.width, region.height
    );

    let mut canvas = img.to_rgb8();
    let bounds = rect::Rect::at(region.x as i32, region.y as i32)
        .of_size(region.width, region.height);
    drawing::draw_hollow_rect_mut(&mut canvas, bounds, Rgb([255, 0, 0]));
    let out = format!("{}-detected.png", path);
    canvas.save(&out)?;
    println!("saved {}", out);
    Ok(())
}
