use galleria_client::GalleryClient;

use super::{Output, print_json};

pub async fn run(gallery: &GalleryClient, out: &Output) -> anyhow::Result<()> {
    let health = if out.strict {
        gallery.try_health_check().await?
    } else {
        gallery.health_check().await
    };

    if out.is_json() {
        return print_json(&health);
    }
    if gallery.is_online() {
        println!("Image service at {} reports: {}", gallery.base_url(), health.status);
    } else {
        println!("Image service at {} is unreachable ({}).", gallery.base_url(), health.status);
    }
    Ok(())
}
