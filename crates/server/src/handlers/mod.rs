//! Page handlers

pub mod agency;
pub mod blog;
pub mod contact;
pub mod health;
pub mod home;
pub mod pages;
pub mod services;
pub mod stats;

use serde::{Deserialize, Serialize};

/// SEO metadata shared by every page payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Pagination block for list payloads
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(per_page.max(1))
        };
        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }
}

/// Articles per blog page
pub const ARTICLES_PER_PAGE: u64 = 9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(1, 9, 20);
        assert_eq!(p.total_pages, 3);

        let p = Pagination::new(1, 9, 9);
        assert_eq!(p.total_pages, 1);

        let p = Pagination::new(1, 9, 0);
        assert_eq!(p.total_pages, 1);
    }
}
