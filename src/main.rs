use color_eyre::eyre;
use image_stats::source::ImageSource;
use image_stats::{AnalysisResult, ImageAnalyzer, ImageStatsError};
use log::error;
use reqwest::Client;
use std::env;

const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

async fn analyze_input(
    analyzer: &ImageAnalyzer,
    client: &Client,
    input: &str,
) -> Result<AnalysisResult, ImageStatsError> {
    let source = ImageSource::parse(input, analyzer.config().host_rewrite.as_ref())?;
    let bytes = source.load(client).await?;
    let analyzer = analyzer.clone();
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&bytes)).await??;
    Ok(result)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let level = env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::new()
        .parse_filters(&level.to_ascii_lowercase())
        .init();

    // A bad AVERAGING_METHOD stops the process here, before any image is touched.
    let analyzer = ImageAnalyzer::from_env()?;
    let inputs: Vec<String> = env::args().skip(1).collect();
    if inputs.is_empty() {
        eyre::bail!("usage: image-stats <path-or-url>...");
    }

    let client = Client::new();
    let mut failures = 0;
    for input in &inputs {
        match analyze_input(&analyzer, &client, input).await {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(e) => {
                error!("Failed to process {input}: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eyre::bail!("{failures} of {} inputs could not be analyzed", inputs.len());
    }
    Ok(())
}
