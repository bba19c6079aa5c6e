use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use galleria_client::GalleryClient;
use galleria_core::NewAsset;

use super::{Output, print_asset, print_json};

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Image file to upload.
    pub path: PathBuf,
    /// Title for the image.
    #[arg(long)]
    pub title: Option<String>,
    /// Description for the image.
    #[arg(long)]
    pub description: Option<String>,
}

/// Read the file and guess its MIME type from the extension.
fn prepare(args: &UploadArgs) -> anyhow::Result<NewAsset> {
    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let file_name = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("upload path has no file name")?;
    let mime = mime_guess::from_path(&args.path).first_or_octet_stream();

    let mut upload = NewAsset::new(file_name, mime.essence_str(), bytes);
    if let Some(title) = &args.title {
        upload = upload.with_title(title);
    }
    if let Some(description) = &args.description {
        upload = upload.with_description(description);
    }
    Ok(upload)
}

pub async fn run(gallery: &GalleryClient, args: &UploadArgs, out: &Output) -> anyhow::Result<()> {
    let upload = prepare(args)?;
    let asset = if out.strict {
        gallery.try_create_asset(&upload).await?
    } else {
        gallery.create_asset(&upload).await
    };
    if out.is_json() {
        return print_json(&asset);
    }
    print_asset(&asset);
    Ok(())
}
