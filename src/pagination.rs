use serde::{Deserialize, Serialize};

/// Query parameters for paged listings. Zero-based page index,
/// matching the `?page=0&size=10` convention of the web client.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    10
}

impl PageParams {
    pub fn limit(&self) -> i64 {
        self.size.clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.page.max(0) * self.limit()
    }
}

/// Spring-style page envelope: `{ content: [...], page: {...} }`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub size: i64,
    pub number: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, params: &PageParams, total_elements: i64) -> Self {
        let size = params.limit();
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };
        Self {
            content,
            page: PageMeta {
                size,
                number: params.page.max(0),
                total_elements,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: i64, size: i64) -> PageParams {
        PageParams { page, size }
    }

    #[test]
    fn offset_is_page_times_size() {
        let p = params(3, 25);
        assert_eq!(p.limit(), 25);
        assert_eq!(p.offset(), 75);
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(params(0, 0).limit(), 1);
        assert_eq!(params(0, 5000).limit(), 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], &params(0, 10), 21);
        assert_eq!(page.page.total_pages, 3);
        assert_eq!(page.page.total_elements, 21);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], &params(0, 10), 0);
        assert_eq!(page.page.total_pages, 0);
    }

    #[test]
    fn envelope_serializes_with_camel_case_meta() {
        let page = Page::new(vec![1], &params(0, 10), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"]["totalElements"], 1);
        assert_eq!(json["page"]["totalPages"], 1);
        assert_eq!(json["content"][0], 1);
    }
}
