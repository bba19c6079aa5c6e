use clap::Args;
use galleria_client::GalleryClient;
use galleria_core::{AssetPatch, ListQuery};

use super::{Output, print_asset, print_json};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number (1-based).
    #[arg(long)]
    pub page: Option<u32>,
    /// Page size.
    #[arg(long)]
    pub limit: Option<u32>,
    /// Case-insensitive title/description filter.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Image ID.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Image ID.
    pub id: String,
    /// New title.
    #[arg(long)]
    pub title: Option<String>,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
}

pub async fn list(gallery: &GalleryClient, args: &ListArgs, out: &Output) -> anyhow::Result<()> {
    let query = ListQuery {
        page: args.page,
        limit: args.limit,
        search: args.search.clone(),
    };
    let page = if out.strict {
        gallery.try_list_assets(&query).await?
    } else {
        gallery.list_assets(&query).await
    };

    if out.is_json() {
        return print_json(&page);
    }
    if !gallery.is_online() {
        println!("(offline: showing sample images)");
    }
    println!(
        "Page {}/{} ({} images total):",
        page.page, page.total_pages, page.total
    );
    for asset in &page.items {
        println!(
            "  {id:<24} {title:<24} {size:>10} B  {mime}",
            id = asset.id,
            title = asset.title.as_deref().unwrap_or(&asset.original_name),
            size = asset.size,
            mime = asset.mime_type,
        );
    }
    if page.has_next_page() {
        println!("More: --page {}", page.page + 1);
    }
    Ok(())
}

pub async fn get(gallery: &GalleryClient, args: &IdArgs, out: &Output) -> anyhow::Result<()> {
    let asset = if out.strict {
        gallery.try_get_asset(&args.id).await?
    } else {
        gallery.get_asset(&args.id).await
    };
    if out.is_json() {
        return print_json(&asset);
    }
    print_asset(&asset);
    Ok(())
}

pub async fn update(gallery: &GalleryClient, args: &UpdateArgs, out: &Output) -> anyhow::Result<()> {
    let patch = AssetPatch {
        title: args.title.clone(),
        description: args.description.clone(),
    };
    if patch.is_empty() {
        anyhow::bail!("nothing to update: pass --title and/or --description");
    }

    let asset = if out.strict {
        gallery.try_update_asset(&args.id, &patch).await?
    } else {
        gallery.update_asset(&args.id, &patch).await
    };
    if out.is_json() {
        return print_json(&asset);
    }
    if !gallery.is_online() {
        println!("(offline: update was not applied)");
    }
    print_asset(&asset);
    Ok(())
}

pub async fn delete(gallery: &GalleryClient, args: &IdArgs, out: &Output) -> anyhow::Result<()> {
    if out.strict {
        gallery.try_delete_asset(&args.id).await?;
    } else {
        gallery.delete_asset(&args.id).await;
    }
    let deleted = gallery.is_online();
    if out.is_json() {
        return print_json(&serde_json::json!({ "id": args.id, "deleted": deleted }));
    }
    if deleted {
        println!("Deleted image {}.", args.id);
    } else {
        println!("Image service unreachable; {} was not deleted.", args.id);
    }
    Ok(())
}

pub async fn download(gallery: &GalleryClient, args: &IdArgs, out: &Output) -> anyhow::Result<()> {
    let link = if out.strict {
        gallery.try_download_url(&args.id).await?
    } else {
        gallery.download_url(&args.id).await
    };
    if out.is_json() {
        return print_json(&link);
    }
    println!("{}", link.download_url);
    Ok(())
}
