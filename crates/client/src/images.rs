use chrono::Utc;
use galleria_core::{AssetPatch, DownloadLink, HealthStatus, ListQuery, MediaAsset, NewAsset, Page};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::{Error, GalleryClient, fallback, id_segment, media_url};

fn field_u32(body: &Value, key: &str) -> Option<u32> {
    body.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

impl GalleryClient {
    fn rewrite(&self, asset: MediaAsset) -> MediaAsset {
        media_url::rewrite(asset, |id| self.proxy_url(id))
    }

    /// Turn a list response into a [`Page`], tolerating missing fields.
    ///
    /// Records live under `items` or `images` (a bare array is accepted too).
    /// A missing or non-array field yields no records; entries that do not
    /// deserialize are skipped.
    fn normalize_page(&self, body: &Value, query: &ListQuery) -> Page<MediaAsset> {
        let entries = body
            .as_array()
            .or_else(|| body.get("items").and_then(Value::as_array))
            .or_else(|| body.get("images").and_then(Value::as_array));

        let mut items: Vec<MediaAsset> = match entries {
            Some(entries) => entries
                .iter()
                .filter_map(|entry| match MediaAsset::deserialize(entry) {
                    Ok(asset) => Some(self.rewrite(asset)),
                    Err(e) => {
                        warn!(error = %e, "skipping malformed image record");
                        None
                    }
                })
                .collect(),
            None => {
                warn!("image list response has no record array");
                Vec::new()
            }
        };

        let page = field_u32(body, "page")
            .unwrap_or_else(|| query.effective_page())
            .max(1);
        let limit = match field_u32(body, "limit") {
            Some(limit) => {
                if items.len() > limit as usize {
                    warn!(
                        limit,
                        received = items.len(),
                        "image list exceeded its page size, truncating"
                    );
                    items.truncate(limit as usize);
                }
                limit
            }
            None => query
                .effective_limit()
                .max(u32::try_from(items.len()).unwrap_or(u32::MAX)),
        };
        let total = body
            .get("total")
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64);
        let total_pages = field_u32(body, "totalPages")
            .unwrap_or_else(|| Page::<MediaAsset>::page_count(total, limit));

        Page {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// List images, propagating any failure.
    ///
    /// Only the query parameters that are set are sent.
    #[instrument(skip(self))]
    pub async fn try_list_assets(&self, query: &ListQuery) -> Result<Page<MediaAsset>, Error> {
        let response = self
            .send(self.request(Method::GET, "/images").query(&query.to_pairs()))
            .await?;
        let body: Value = self.read_json(response).await?;
        Ok(self.normalize_page(&body, query))
    }

    /// List images, serving the offline catalog on failure.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() {
    /// use galleria_client::GalleryClient;
    /// use galleria_core::ListQuery;
    ///
    /// let client = GalleryClient::new("http://localhost:3000/api/v1");
    /// let page = client
    ///     .list_assets(&ListQuery::new().page(2).limit(10).search("sunset"))
    ///     .await;
    /// println!("{} of {} images", page.items.len(), page.total);
    /// # }
    /// ```
    pub async fn list_assets(&self, query: &ListQuery) -> Page<MediaAsset> {
        match self.try_list_assets(query).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "listing images failed, serving offline catalog");
                fallback::mock_page(query)
            }
        }
    }

    // =========================================================================
    // Single image
    // =========================================================================

    /// Fetch one image, propagating any failure.
    #[instrument(skip(self))]
    pub async fn try_get_asset(&self, id: &str) -> Result<MediaAsset, Error> {
        let endpoint = format!("/images/{}", id_segment(id)?);
        let response = self.send(self.request(Method::GET, &endpoint)).await?;
        let asset: MediaAsset = self.read_json(response).await?;
        Ok(self.rewrite(asset))
    }

    /// Fetch one image. On failure returns a stand-in with the same `id`.
    pub async fn get_asset(&self, id: &str) -> MediaAsset {
        match self.try_get_asset(id).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!(error = %e, id, "fetching image failed, serving stand-in");
                fallback::mock_asset(id)
            }
        }
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Upload an image as multipart form data, propagating any failure.
    ///
    /// The body's own boundary sets the content type; no JSON content type
    /// is sent.
    #[instrument(skip(self))]
    pub async fn try_create_asset(&self, upload: &NewAsset) -> Result<MediaAsset, Error> {
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| Error::Configuration(format!("invalid MIME type: {e}")))?;

        let mut form = Form::new().part("file", file);
        if let Some(title) = &upload.title {
            form = form.text("title", title.clone());
        }
        if let Some(description) = upload.description.as_ref().filter(|d| !d.trim().is_empty()) {
            form = form.text("description", description.clone());
        }

        let response = self
            .send(self.request(Method::POST, "/images").multipart(form))
            .await?;
        let asset: MediaAsset = self.read_json(response).await?;
        Ok(self.rewrite(asset))
    }

    /// Upload an image. On failure returns a local record whose id starts
    /// with `fallback-`; nothing is stored remotely.
    pub async fn create_asset(&self, upload: &NewAsset) -> MediaAsset {
        match self.try_create_asset(upload).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!(error = %e, file = %upload.file_name, "upload failed, keeping local record");
                fallback::fallback_upload(upload, Utc::now())
            }
        }
    }

    // =========================================================================
    // Update / delete
    // =========================================================================

    /// Patch an image's title or description, propagating any failure.
    #[instrument(skip(self))]
    pub async fn try_update_asset(&self, id: &str, patch: &AssetPatch) -> Result<MediaAsset, Error> {
        let endpoint = format!("/images/{}", id_segment(id)?);
        let response = self
            .send(self.request(Method::PATCH, &endpoint).json(patch))
            .await?;
        let asset: MediaAsset = self.read_json(response).await?;
        Ok(self.rewrite(asset))
    }

    /// Patch an image. On failure returns the stand-in for `id`; the patch is
    /// not applied to it.
    pub async fn update_asset(&self, id: &str, patch: &AssetPatch) -> MediaAsset {
        match self.try_update_asset(id, patch).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!(error = %e, id, "update failed, serving unpatched stand-in");
                fallback::mock_asset(id)
            }
        }
    }

    /// Delete an image, propagating any failure.
    #[instrument(skip(self))]
    pub async fn try_delete_asset(&self, id: &str) -> Result<(), Error> {
        let endpoint = format!("/images/{}", id_segment(id)?);
        self.send(self.request(Method::DELETE, &endpoint)).await?;
        Ok(())
    }

    /// Delete an image. Failures are logged and otherwise ignored.
    pub async fn delete_asset(&self, id: &str) {
        if let Err(e) = self.try_delete_asset(id).await {
            warn!(error = %e, id, "delete failed, treating as no-op");
        }
    }

    // =========================================================================
    // Download / health
    // =========================================================================

    /// Resolve a download URL, propagating any failure.
    #[instrument(skip(self))]
    pub async fn try_download_url(&self, id: &str) -> Result<DownloadLink, Error> {
        let endpoint = format!("/images/{}/download", id_segment(id)?);
        let response = self.send(self.request(Method::GET, &endpoint)).await?;
        self.read_json(response).await
    }

    /// Resolve a download URL. On failure returns the placeholder image URL.
    pub async fn download_url(&self, id: &str) -> DownloadLink {
        match self.try_download_url(id).await {
            Ok(link) => link,
            Err(e) => {
                warn!(error = %e, id, "download link unavailable, serving placeholder");
                fallback::offline_download(id)
            }
        }
    }

    /// Query `/health`, propagating any failure.
    #[instrument(skip(self))]
    pub async fn try_health_check(&self) -> Result<HealthStatus, Error> {
        let response = self.send(self.request(Method::GET, "/health")).await?;
        self.read_json(response).await
    }

    /// Query `/health`. On failure reports status `"offline"`.
    pub async fn health_check(&self) -> HealthStatus {
        match self.try_health_check().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "health check failed");
                fallback::offline_health()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(id: &str, url: &str) -> Value {
        json!({
            "id": id,
            "originalName": "a.jpg",
            "mimeType": "image/jpeg",
            "size": 10,
            "s3Url": url,
            "status": "active",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z"
        })
    }

    fn client() -> GalleryClient {
        GalleryClient::new("https://api.example.com/v1")
    }

    #[test]
    fn normalize_full_response() {
        let body = json!({
            "images": [record("a", "http://127.0.0.1:9000/a.jpg"), record("b", "https://cdn.example.com/b.jpg")],
            "total": 12,
            "page": 2,
            "limit": 2,
            "totalPages": 6
        });
        let page = client().normalize_page(&body, &ListQuery::new().page(2).limit(2));
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.items[0].source_url.as_deref(),
            Some("https://api.example.com/v1/images/a/proxy")
        );
        assert_eq!(
            page.items[1].source_url.as_deref(),
            Some("https://cdn.example.com/b.jpg")
        );
        assert_eq!((page.total, page.page, page.limit, page.total_pages), (12, 2, 2, 6));
    }

    #[test]
    fn normalize_missing_array_yields_empty_items() {
        for body in [json!({"total": 3}), json!({"images": "nope"}), json!(null), json!("text")] {
            let page = client().normalize_page(&body, &ListQuery::new());
            assert!(page.items.is_empty(), "{body}");
            assert_eq!(page.page, 1);
            assert_eq!(page.limit, 10);
        }
    }

    #[test]
    fn normalize_skips_malformed_records() {
        let body = json!({"items": [record("a", "https://cdn.example.com/a.jpg"), {"id": 5}, "junk"]});
        let page = client().normalize_page(&body, &ListQuery::new().limit(5));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn normalize_accepts_bare_array() {
        let body = json!([record("a", "https://cdn.example.com/a.jpg")]);
        let page = client().normalize_page(&body, &ListQuery::new());
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn normalize_truncates_oversized_pages() {
        let body = json!({
            "items": [
                record("a", "https://cdn.example.com/a.jpg"),
                record("b", "https://cdn.example.com/b.jpg"),
                record("c", "https://cdn.example.com/c.jpg")
            ],
            "limit": 2
        });
        let page = client().normalize_page(&body, &ListQuery::new());
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.limit, 2);
    }

    #[test]
    fn normalize_without_limit_keeps_all_records() {
        let items: Vec<Value> = (0..12)
            .map(|i| record(&format!("r{i}"), "https://cdn.example.com/x.jpg"))
            .collect();
        let page = client().normalize_page(&json!({ "items": items }), &ListQuery::new());
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.limit, 12);
        assert!(page.items.len() <= page.limit as usize);
    }
}
