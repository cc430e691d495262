use std::env::args;
use std::error::Error;
use std::fs;
use std::process;
use std::time::SystemTime;

use plate_scan::PlateScan;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = args();
    args.next();
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("didn't get a directory from args");
            process::exit(1);
        }
    };

    let scanner = PlateScan::new();
    let dir = fs::read_dir(path)?;

    let mut speeds = Vec::new();
    let mut total_amount = 0;
    let mut success = 0;
    for entry_result in dir {
        let path = entry_result?.path();
        let is_image = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("jpg" | "jpeg" | "png")
        );
        if !is_image {
            continue;
        }
        let before_time = SystemTime::now();
        let img = image::open(&path)?;
        let res = scanner.recognize(&img)?;
        let speed = SystemTime::now().duration_since(before_time)?.as_millis();
        total_amount += 1;
        match res {
            Some(reading) => {
                success += 1;
                speeds.push(speed);
                println!("file: {:?}, plate: {}, speed: {}ms", path, reading.text, speed);
            }
            None => println!("file: {:?}, no plate, speed: {}ms", path, speed),
        }
    }

    if !speeds.is_empty() {
        let average_speed = speeds.iter().sum::<u128>() / speeds.len() as u128;
        println!(
            "total_amount: {}, success: {}, average_speed: {}ms",
            total_amount, success, average_speed
        );
    } else {
        println!("total_amount: {}, success: 0", total_amount);
    }
    Ok(())
}
