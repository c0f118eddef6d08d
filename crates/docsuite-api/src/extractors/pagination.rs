//! Pagination query parameters.

use serde::{Deserialize, Serialize};

use docsuite_core::types::pagination::PageRequest;

/// `?page=` and `?per_page=` on listing endpoints. Out-of-range values
/// are clamped rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "defaults::page")]
    pub page: u64,
    #[serde(default = "defaults::per_page")]
    pub per_page: u64,
}

mod defaults {
    pub fn page() -> u64 {
        1
    }
    pub fn per_page() -> u64 {
        25
    }
}

impl PaginationParams {
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        let page = PaginationParams {
            page: 0,
            per_page: 1000,
        }
        .into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
    }
}
