//! Rewriting of media URLs that only resolve on the server's own network.
//!
//! Uploads stored on a developer machine come back with URLs like
//! `http://127.0.0.1:9000/bucket/key`. A phone on another network cannot reach
//! those, so they are replaced by the service's `/images/{id}/proxy` route.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use galleria_core::MediaAsset;
use reqwest::Url;

fn is_private_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_private_v4(mapped);
    }
    // fc00::/7 unique local, fe80::/10 link local
    let first = ip.segments()[0];
    ip.is_loopback() || ip.is_unspecified() || (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
}

/// Returns `true` if `url` points at a host a remote device cannot reach.
///
/// Unparsable URLs are treated as reachable and left alone.
pub fn is_local_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") || host.to_ascii_lowercase().ends_with(".localhost")
    {
        return true;
    }

    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => is_private_v4(ip),
        Ok(IpAddr::V6(ip)) => is_private_v6(ip),
        Err(_) => false,
    }
}

/// Replace a local `source_url` with the proxy URL built by `proxy_url`.
pub(crate) fn rewrite(mut asset: MediaAsset, proxy_url: impl Fn(&str) -> String) -> MediaAsset {
    if asset.source_url.as_deref().is_some_and(is_local_url) {
        asset.source_url = Some(proxy_url(&asset.id));
    }
    asset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_and_localhost_are_local() {
        assert!(is_local_url("http://127.0.0.1:9000/bucket/a.jpg"));
        assert!(is_local_url("http://localhost:9000/bucket/a.jpg"));
        assert!(is_local_url("http://LOCALHOST/a.jpg"));
        assert!(is_local_url("http://minio.localhost/a.jpg"));
        assert!(is_local_url("http://[::1]:9000/a.jpg"));
        assert!(is_local_url("http://0.0.0.0:9000/a.jpg"));
    }

    #[test]
    fn private_ranges_are_local() {
        assert!(is_local_url("http://10.1.2.3/a.jpg"));
        assert!(is_local_url("http://172.16.0.9/a.jpg"));
        assert!(is_local_url("http://192.168.1.20:9000/a.jpg"));
        assert!(is_local_url("http://169.254.10.10/a.jpg"));
        assert!(is_local_url("http://[fd12:3456::1]/a.jpg"));
        assert!(is_local_url("http://[fe80::1]/a.jpg"));
        assert!(is_local_url("http://[::ffff:192.168.0.1]/a.jpg"));
    }

    #[test]
    fn public_hosts_are_not_local() {
        assert!(!is_local_url("https://cdn.example.com/a.jpg"));
        assert!(!is_local_url("https://8.8.8.8/a.jpg"));
        assert!(!is_local_url("http://172.32.0.1/a.jpg"));
        assert!(!is_local_url("https://[2606:4700::1111]/a.jpg"));
        assert!(!is_local_url("https://localhost.example.com/a.jpg"));
    }

    #[test]
    fn unparsable_urls_are_left_alone() {
        assert!(!is_local_url("not a url"));
        assert!(!is_local_url(""));
        assert!(!is_local_url("/relative/path.jpg"));
    }

    #[test]
    fn rewrite_replaces_only_local_urls() {
        let proxy = |id: &str| format!("https://api.example.com/images/{id}/proxy");

        let mut asset = crate::fallback::mock_asset("img-1");
        asset.source_url = Some("http://127.0.0.1:9000/bucket/x.jpg".into());
        let rewritten = rewrite(asset, proxy);
        assert_eq!(
            rewritten.source_url.as_deref(),
            Some("https://api.example.com/images/img-1/proxy")
        );

        let asset = crate::fallback::mock_asset("img-2");
        let original = asset.source_url.clone();
        assert_eq!(rewrite(asset, proxy).source_url, original);

        let mut asset = crate::fallback::mock_asset("img-3");
        asset.source_url = None;
        assert_eq!(rewrite(asset, proxy).source_url, None);
    }
}
