use image_stats::ImageAnalyzer;
use std::env;

/// Analyze one image file with the configuration taken from the environment.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/sunset.jpg".to_string());
    let analyzer = ImageAnalyzer::from_env()?;
    let bytes = std::fs::read(&path)?;
    let analyze_result = analyzer.analyze(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&analyze_result)?);

    Ok(())
}
