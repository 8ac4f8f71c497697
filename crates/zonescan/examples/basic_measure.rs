use image::ImageReader;
use std::error::Error;
use std::path::Path;
use zonescan::{MeasureConfig, ZoneMeter};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <plate.png> [config.json] [zone=factor ...]",
            args[0]
        );
        std::process::exit(2);
    }

    let image = ImageReader::open(&args[1])?.decode()?.to_luma8();
    let config = match args.get(2).filter(|a| a.ends_with(".json")) {
        Some(path) => MeasureConfig::from_json_file(Path::new(path))?,
        None => MeasureConfig::default(),
    };

    let meter = ZoneMeter::with_config(config);
    let measurement = meter.measure(&image)?;
    println!(
        "Found {} disks, {} zones, scale {:.4} mm/px.",
        measurement.disks.len(),
        measurement.zones.len(),
        measurement.scale.mm_per_px
    );

    let mut session = measurement.review_session();
    for adj in args.iter().skip(2).filter(|a| a.contains('=')) {
        if let Some((zone, factor)) = adj.split_once('=') {
            session.set_factor(zone.parse()?, factor.parse()?)?;
        }
    }

    for record in measurement.records(&session) {
        println!(
            "disk {:>2} ({:>4}, {:>4})  {:5.1} px  x{:.2}  {:5.2} mm  {}",
            record.disk_index,
            record.center[0],
            record.center[1],
            record.adjusted_radius_px,
            record.adjustment_factor,
            record.diameter_mm,
            record.label
        );
    }
    Ok(())
}
