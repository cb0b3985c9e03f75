//! Image Inspection Example
//!
//! Opens an image, prints its decoded EXIF metadata and GPS location,
//! saves the plain-text and JSON reports, and writes a thumbnail.
//!
//! Run with: cargo run --example inspect -- <image_path> [output_dir]

use std::env;
use std::fs;
use std::path::Path;

use exif_locate::{ImageInspector, InspectorConfig, error::Result};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("exif-locate - Image Inspection Example");
        println!("======================================");
        println!();
        println!("Usage: {} <image_path> [output_dir]", args[0]);
        println!();
        println!("Arguments:");
        println!("  image_path  - Path to the image to inspect");
        println!("  output_dir  - Optional output directory (default: ./output)");
        println!();
        println!("Example:");
        println!("  {} vacation_photo.jpg ./results", args[0]);
        return Ok(());
    }

    let image_path = &args[1];
    let output_dir = args.get(2).map(|s| s.as_str()).unwrap_or("./output");

    if !Path::new(image_path).exists() {
        eprintln!("Error: Image file '{}' not found", image_path);
        std::process::exit(1);
    }

    fs::create_dir_all(output_dir)?;

    println!("📁 Input:  {}", image_path);
    println!("📂 Output: {}", output_dir);
    println!();

    let inspector = ImageInspector::open(image_path)?.with_config(InspectorConfig {
        thumbnail_size: 200,
    });

    // ═══════════════════════════════════════════════════════════════════
    // 1. METADATA
    // ═══════════════════════════════════════════════════════════════════
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("1️⃣  METADATA");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let report = inspector.inspect();
    println!("{}", report.metadata_text());

    // ═══════════════════════════════════════════════════════════════════
    // 2. GPS LOCATION
    // ═══════════════════════════════════════════════════════════════════
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("2️⃣  GPS LOCATION");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("{}", report.location_text());
    println!();

    if let Some(url) = report.map_url() {
        println!("  🌍 Open this in a browser to see the location:");
        println!("     {}", url);
        println!();
    }

    // ═══════════════════════════════════════════════════════════════════
    // 3. SAVED REPORTS
    // ═══════════════════════════════════════════════════════════════════
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("3️⃣  SAVED REPORTS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let text_output = format!("{}/metadata.txt", output_dir);
    report.save(&text_output)?;
    println!("  ✓ Text report:  {}", text_output);

    let json_output = format!("{}/metadata.json", output_dir);
    fs::write(&json_output, report.to_json()?)?;
    println!("  ✓ JSON report:  {}", json_output);

    // Thumbnail failures are reported but do not invalidate the reports
    let thumb_output = format!("{}/thumbnail.png", output_dir);
    match inspector.thumbnail() {
        Ok(thumb) => {
            thumb.save(&thumb_output)?;
            println!(
                "  ✓ Thumbnail:    {} ({}x{})",
                thumb_output,
                thumb.width(),
                thumb.height()
            );
        }
        Err(e) => {
            println!("  ⚠️ Thumbnail failed: {}", e);
        }
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("All outputs saved to: {}/", output_dir);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    Ok(())
}
