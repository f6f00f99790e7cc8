use image_stats::{AveragingMethod, Config, analyze};
use std::env;

/// Print the average color of an image under every averaging method.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/sunset.jpg".to_string());
    let bytes = std::fs::read(&path)?;

    println!("{path}");
    for method in [
        AveragingMethod::Arithmetic,
        AveragingMethod::Harmonic,
        AveragingMethod::Geometric,
    ] {
        let config = Config::builder().averaging_method(method).build();
        let result = analyze(&bytes, &config)?;
        match result.color_data {
            Some(colors) => println!(
                "\t{method:<10} {}  (dominant {})",
                colors.avg_color.hex, colors.dominant_color.hex
            ),
            None => println!("\t{method:<10} no opaque pixels"),
        }
    }

    Ok(())
}
