pub mod chat;
pub mod health;
pub mod images;
pub mod upload;

use galleria_core::MediaAsset;
use serde::Serialize;

use crate::OutputFormat;

/// How results are printed and which failure contract commands use.
#[derive(Debug, Clone)]
pub struct Output {
    pub format: OutputFormat,
    /// Propagate failures (exit 1) instead of printing offline data.
    pub strict: bool,
}

impl Output {
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn print_asset(asset: &MediaAsset) {
    println!("ID:          {}", asset.id);
    println!("Title:       {}", or_dash(asset.title.as_deref()));
    println!("Description: {}", or_dash(asset.description.as_deref()));
    println!("File:        {} ({}, {} bytes)", asset.original_name, asset.mime_type, asset.size);
    if let (Some(w), Some(h)) = (asset.width, asset.height) {
        println!("Dimensions:  {w}x{h}");
    }
    println!("URL:         {}", or_dash(asset.source_url.as_deref()));
    println!("Status:      {}", asset.status);
    println!("Created:     {}", asset.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if asset.is_fallback() {
        println!("(local record only: the upload did not reach the server)");
    }
}
