use clap::{ Parser, Subcommand };

use std::path::PathBuf;
use std::process;

use plate_scan::error::PlateScanError;
use plate_scan::registry::CarRegistry;
use plate_scan::routes::{ normalize_city, RouteTable };
use plate_scan::PlateScan;

#[derive(Parser)]
#[command(name = "plate-scan", version, about = "Reads a license plate from a photo, checks it against the car registry, and answers route distance queries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect and read the license plate in an image, then look it up
    Recognize {
        /// Image file with a license plate
        image: PathBuf,
        /// Car registry CSV, created with defaults when missing
        #[arg(long, default_value = "Cars.csv")]
        registry: PathBuf,
        /// Save a copy of the input with the detected plate box drawn on it
        #[arg(long)]
        annotated: Option<PathBuf>,
    },
    /// Look a plate up in the car registry without any imaging
    Lookup {
        /// Plate text, matched ignoring case and spaces
        plate: String,
        #[arg(long, default_value = "Cars.csv")]
        registry: PathBuf,
    },
    /// Distance between two cities from the route table
    Route {
        from: String,
        to: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PlateScanError> {
    match cli.command {
        Command::Recognize { image, registry, annotated } => {
            let img = image::open(&image)?;
            let registry = CarRegistry::load_or_seed(&registry)?;
            let scanner = PlateScan::new();
            let reading = scanner.recognize(&img)?;
            for line in report_lines(&registry, reading.as_ref().map(|r| r.text.as_str())) {
                println!("{}", line);
            }
            if let (Some(reading), Some(out)) = (reading, annotated) {
                scanner.annotate(&img, &reading).save(&out)?;
                println!("Annotated image saved to {}", out.display());
            }
        }
        Command::Lookup { plate, registry } => {
            let registry = CarRegistry::load_or_seed(&registry)?;
            for line in report_lines(&registry, Some(&plate)) {
                println!("{}", line);
            }
        }
        Command::Route { from, to } => {
            let table = RouteTable::default();
            let (from, to) = (normalize_city(&from), normalize_city(&to));
            match table.distance(&from, &to) {
                Some(km) => println!("Distance from {} to {}: {} km", from, to, km),
                None => {
                    println!("No direct route found between {} and {}.", from, to);
                    println!("Known cities: {}", table.cities().join(", "));
                }
            }
        }
    }
    Ok(())
}

// Both labels are always reported, as the original app did: a failed
// detection still answers "Car Details: Not Found".
fn report_lines(registry: &CarRegistry, plate: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    let plate = match plate {
        Some(plate) => {
            lines.push(format!("License Plate: {}", plate));
            plate
        }
        None => {
            lines.push("License Plate: Not Detected".to_string());
            lines.push("Car Details: Not Found".to_string());
            return lines;
        }
    };
    match registry.find(plate) {
        Some(car) => {
            lines.push(format!("Car Details: {}", car.summary()));
            for advisory in car.advisories() {
                lines.push(advisory.to_string());
            }
        }
        None => lines.push("Car Details: Not Found".to_string()),
    }
    lines
}

#[cfg(test)]
mod test {

    use plate_scan::registry::CarRegistry;

    use super::report_lines;

    fn seeded_registry() -> CarRegistry {
        let dir = tempfile::tempdir().unwrap();
        CarRegistry::load_or_seed(dir.path().join("Cars.csv")).unwrap()
    }

    #[test]
    fn failed_detection_reports_both_labels() {
        let registry = seeded_registry();
        assert_eq!(
            report_lines(&registry, None),
            vec!["License Plate: Not Detected", "Car Details: Not Found"]
        );
    }

    #[test]
    fn known_plate_reports_details_and_advisories() {
        let registry = seeded_registry();
        let lines = report_lines(&registry, Some("mh12 ab1234"));
        assert_eq!(lines[0], "License Plate: mh12 ab1234");
        assert_eq!(lines[1], "Car Details: Age: 11 years, Months without Servicing: 7");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn unknown_plate_reports_not_found() {
        let registry = seeded_registry();
        assert_eq!(
            report_lines(&registry, Some("KA99 XX0000")),
            vec!["License Plate: KA99 XX0000", "Car Details: Not Found"]
        );
    }

}
