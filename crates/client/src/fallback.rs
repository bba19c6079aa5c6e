//! Deterministic stand-in data served while the image service is unreachable.
//!
//! Everything here is a pure function of its inputs (the upload timestamp is
//! passed in), so degraded-mode output is reproducible and testable without a
//! network.

use chrono::{DateTime, TimeDelta, Utc};
use galleria_core::{
    DownloadLink, FALLBACK_ID_PREFIX, HealthStatus, ListQuery, MediaAsset, NewAsset, Page,
};

/// Number of records in the offline catalog.
pub const CATALOG_SIZE: u32 = 30;

/// Status reported by [`offline_health`].
pub const OFFLINE_STATUS: &str = "offline";

const THEMES: [&str; 6] = [
    "Mountain Lake",
    "City Lights",
    "Ocean Sunset",
    "Forest Trail",
    "Desert Dunes",
    "Autumn Leaves",
];

/// 2024-01-01T00:00:00Z, the creation time of the first catalog record.
const CATALOG_EPOCH_SECS: i64 = 1_704_067_200;

fn catalog_time(offset_hours: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(CATALOG_EPOCH_SECS + offset_hours * 3600)
}

/// Placeholder image URL for an asset id.
pub fn placeholder_url(id: &str) -> String {
    format!("https://picsum.photos/800/600?random={id}")
}

fn catalog_entry(n: u32) -> MediaAsset {
    let theme = THEMES[(n as usize - 1) % THEMES.len()];
    let id = format!("mock-{n}");
    let created_at = catalog_time(i64::from(n) * 24);

    MediaAsset {
        title: Some(format!("{theme} {n}")),
        description: Some(format!(
            "A sample {} photo from the offline gallery",
            theme.to_lowercase()
        )),
        original_name: format!("sample-{n}.jpg"),
        mime_type: "image/jpeg".to_owned(),
        size: 250_000 + u64::from(n) * 37_500,
        width: Some(800),
        height: Some(600),
        source_key: Some(format!("samples/sample-{n}.jpg")),
        source_url: Some(placeholder_url(&id)),
        status: "active".to_owned(),
        created_at,
        updated_at: created_at + TimeDelta::hours(1),
        id,
    }
}

/// The full offline catalog, ids `mock-1` through `mock-30`.
pub fn mock_catalog() -> Vec<MediaAsset> {
    (1..=CATALOG_SIZE).map(catalog_entry).collect()
}

fn matches_search(asset: &MediaAsset, needle: &str) -> bool {
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    };
    contains(&asset.title) || contains(&asset.description)
}

/// One page of the offline catalog, filtered and sliced like the server would.
///
/// The search term matches case-insensitively against title or description.
/// `items.len()` never exceeds the requested limit.
pub fn mock_page(query: &ListQuery) -> Page<MediaAsset> {
    let page = query.effective_page();
    let limit = query.effective_limit();

    let mut catalog = mock_catalog();
    if let Some(term) = query.search_term() {
        let needle = term.to_lowercase();
        catalog.retain(|asset| matches_search(asset, &needle));
    }

    let total = catalog.len() as u64;
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let items: Vec<MediaAsset> = catalog.into_iter().skip(start).take(limit as usize).collect();

    Page {
        items,
        total,
        page,
        limit,
        total_pages: Page::<MediaAsset>::page_count(total, limit),
    }
}

/// A stand-in for a single asset. The returned `id` always equals `id`.
///
/// Catalog ids resolve to their catalog record so offline list and detail
/// views agree.
pub fn mock_asset(id: &str) -> MediaAsset {
    if let Some(n) = id
        .strip_prefix("mock-")
        .and_then(|n| n.parse::<u32>().ok())
        .filter(|n| (1..=CATALOG_SIZE).contains(n))
    {
        let entry = catalog_entry(n);
        if entry.id == id {
            return entry;
        }
    }

    let created_at = catalog_time(0);
    MediaAsset {
        id: id.to_owned(),
        title: Some("Sample Image".to_owned()),
        description: Some("This is a sample image from fallback data".to_owned()),
        original_name: "sample.jpg".to_owned(),
        mime_type: "image/jpeg".to_owned(),
        size: 1_024_000,
        width: Some(800),
        height: Some(600),
        source_key: Some("sample.jpg".to_owned()),
        source_url: Some(placeholder_url(id)),
        status: "active".to_owned(),
        created_at,
        updated_at: created_at,
    }
}

/// The local record for an upload that never reached the server.
///
/// The id is `fallback-{unix millis}` so callers can tell degraded-mode writes
/// apart. Nothing is persisted.
pub fn fallback_upload(upload: &NewAsset, now: DateTime<Utc>) -> MediaAsset {
    MediaAsset {
        id: format!("{FALLBACK_ID_PREFIX}{}", now.timestamp_millis()),
        title: upload.title.clone(),
        description: upload.description.clone(),
        original_name: upload.file_name.clone(),
        mime_type: upload.mime_type.clone(),
        size: upload.bytes.len() as u64,
        width: None,
        height: None,
        source_key: None,
        source_url: None,
        status: "pending".to_owned(),
        created_at: now,
        updated_at: now,
    }
}

/// Download link served while offline.
pub fn offline_download(id: &str) -> DownloadLink {
    DownloadLink {
        download_url: placeholder_url(id),
    }
}

/// Health status served while offline.
pub fn offline_health() -> HealthStatus {
    HealthStatus {
        status: OFFLINE_STATUS.to_owned(),
    }
}
