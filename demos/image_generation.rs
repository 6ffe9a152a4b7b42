//! Generate an image, save it, then describe it with the vision brain.
//!
//! Run with:
//! ```bash
//! export OPENAI_API_KEY="your-api-key"
//! cargo run --example image_generation
//! ```

use ai_toolkit::catalog::{Catalog, ImageModel, ImageSize, ImageStyle};
use ai_toolkit::client::Brain;
use ai_toolkit::model::ImagePrompt;
use ai_toolkit::options::{HttpTransport, ImageOptions, TransportOptions, VisionOptions};
use ai_toolkit::providers::{ImageBrain, VisionBrain};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let transport_options = TransportOptions::new(HttpTransport::from_env()?)
        .with_timeout(std::time::Duration::from_secs(120));

    let options = ImageOptions::default()
        .with_model(ImageModel::DallE2)
        .with_size(ImageSize::S512x512)
        .with_style(ImageStyle::Natural);
    println!("{}: {}", options.model.wire_str(), options.model.price_info());

    let images = ImageBrain::new(options, transport_options.clone());
    let image = images.send("A watercolor lighthouse at dusk").await?;
    println!("URL: {}", image.url);
    if let Some(revised) = &image.revised_prompt {
        println!("Revised prompt: {}", revised);
    }

    tokio::fs::write("lighthouse.png", &image.bytes).await?;
    println!("Saved {} bytes to lighthouse.png", image.bytes.len());

    // The vision endpoint accepts the PNG bytes under the JPEG data URI as well
    let vision = VisionBrain::new(VisionOptions::default(), transport_options);
    let description = vision
        .send(&ImagePrompt::new(image.bytes.to_vec(), "Describe this picture in one sentence."))
        .await?;
    println!("\n=== Vision ===\n{}", description);

    Ok(())
}
