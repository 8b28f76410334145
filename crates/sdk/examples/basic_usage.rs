//! Basic SDK usage example.
//!
//! Lists the style guides, brand voices and audiences of the account behind
//! `JASPER_API_KEY`, then generates a short piece of content.
//!
//! Run with: cargo run --example basic_usage

use jasper_sdk::{ApiResponse, GenerateContentRequest, JasperClient, JasperResult};

#[tokio::main]
async fn main() -> JasperResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let client = JasperClient::builder()
        .api_key(std::env::var("JASPER_API_KEY").unwrap_or_default())
        .build()?;

    println!("Listing style guides...");
    let mut style_id = None;
    match client.styles().list().await? {
        ApiResponse::Success(styles) => {
            for style in &styles {
                println!("  Style: {}", style.id);
            }
            style_id = styles.first().map(|s| s.id.clone());
        }
        other => println!("  Unexpected response: {:?}", other),
    }

    println!("\nListing brand voices...");
    if let ApiResponse::Success(tones) = client.tones().list(Some(100)).await? {
        for tone in tones.iter().take(5) {
            println!("  Tone: {} ({})", tone.name, tone.id);
        }
    }

    println!("\nListing audiences...");
    if let ApiResponse::Success(audiences) = client.audiences().list().await? {
        for audience in audiences.iter().take(5) {
            println!("  Audience: {} ({})", audience.name, audience.id);
        }
    }

    println!("\nGenerating a tagline...");
    let mut request = GenerateContentRequest::new("Write a tagline for a coffee shop");
    if let Some(style_id) = style_id {
        request = request.style_id(style_id);
    }

    match client.commands().run(&request).await? {
        ApiResponse::Success(outputs) => {
            let text = outputs.first().and_then(|o| o.text.as_deref()).unwrap_or("");
            println!("  {}", text);
        }
        ApiResponse::Failure { message, .. } => println!("  Jasper AI Error: {}", message),
        other => println!("  Unexpected response: {:?}", other),
    }

    Ok(())
}
