use serde::{Deserialize, Serialize};

/// Page number used when a query does not specify one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when a query does not specify one.
pub const DEFAULT_LIMIT: u32 = 10;

/// One page of a paginated listing.
///
/// `items.len()` never exceeds `limit` and `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page. The image service names this field `images`.
    #[serde(alias = "images")]
    pub items: Vec<T>,
    /// Number of records across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Maximum number of records per page.
    pub limit: u32,
    /// Number of pages for `total` records at `limit` per page.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Returns `true` if another page follows this one.
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Number of pages needed to hold `total` records at `limit` per page.
    ///
    /// A zero `limit` yields zero pages.
    pub fn page_count(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
    }
}

/// Query parameters for `GET /images`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Case-insensitive substring matched against title and description.
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The requested page, or [`DEFAULT_PAGE`]. Never less than 1.
    pub fn effective_page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// The requested page size, or [`DEFAULT_LIMIT`].
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// The search term exactly as given, if present and non-empty.
    ///
    /// Whitespace is significant: `"7 "` only matches text containing `"7 "`.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Query-string pairs for the parameters that are set.
    ///
    /// Zero page/limit values and empty search terms are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search_term() {
            pairs.push(("search", search.to_owned()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_accepts_images_key() {
        let json = r#"{"images":[1,2,3],"total":3,"page":1,"limit":10,"totalPages":1}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page());
    }

    #[test]
    fn page_serializes_items_key() {
        let page = Page {
            items: vec!["a"],
            total: 11,
            page: 1,
            limit: 10,
            total_pages: 2,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["items"][0], "a");
        assert_eq!(value["totalPages"], 2);
        assert!(page.has_next_page());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(Page::<()>::page_count(0, 10), 0);
        assert_eq!(Page::<()>::page_count(10, 10), 1);
        assert_eq!(Page::<()>::page_count(11, 10), 2);
        assert_eq!(Page::<()>::page_count(30, 7), 5);
        assert_eq!(Page::<()>::page_count(30, 0), 0);
    }

    #[test]
    fn query_pairs_omit_absent_values() {
        assert!(ListQuery::new().to_pairs().is_empty());

        let pairs = ListQuery::new().page(2).limit(5).search("sunset").to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "2".to_string()),
                ("limit", "5".to_string()),
                ("search", "sunset".to_string()),
            ]
        );

        let pairs = ListQuery::new().page(0).limit(0).search("").to_pairs();
        assert!(pairs.is_empty());

        let pairs = ListQuery::new().search(" 7 ").to_pairs();
        assert_eq!(pairs, vec![("search", " 7 ".to_string())]);
    }

    #[test]
    fn effective_values() {
        let query = ListQuery::new();
        assert_eq!(query.effective_page(), DEFAULT_PAGE);
        assert_eq!(query.effective_limit(), DEFAULT_LIMIT);
        assert_eq!(query.search_term(), None);

        let query = ListQuery::new().page(0).limit(3).search("x");
        assert_eq!(query.effective_page(), 1);
        assert_eq!(query.effective_limit(), 3);
        assert_eq!(query.search_term(), Some("x"));

        assert_eq!(ListQuery::new().search("").search_term(), None);
        assert_eq!(ListQuery::new().search("   ").search_term(), Some("   "));
    }
}
