use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Number of records returned per list page.
pub const PAGE_SIZE: u64 = 10;

/// A 1-based page number request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Build a request for `page` with the fixed page size.
    pub fn new(page: u64) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::Validation(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        // Offsets travel to Postgres as a signed BIGINT.
        match (page - 1).checked_mul(PAGE_SIZE) {
            Some(offset) if offset <= i64::MAX as u64 => Ok(Self {
                page,
                page_size: PAGE_SIZE,
            }),
            _ => Err(DomainError::Validation("page is out of range".to_string())),
        }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// One page of results plus the total number of records across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
        }
    }
}

/// A record joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authored<T> {
    pub item: T,
    pub author: String,
}

impl<T> Authored<T> {
    pub fn new(item: T, author: impl Into<String>) -> Self {
        Self {
            item,
            author: author.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_zero_is_rejected() {
        assert!(matches!(
            PageRequest::new(0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_huge_page_is_rejected() {
        assert!(matches!(
            PageRequest::new(u64::MAX),
            Err(DomainError::Validation(_))
        ));
        assert!(PageRequest::new(i64::MAX as u64 / PAGE_SIZE).is_ok());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3).unwrap().offset(), 20);
        assert_eq!(PageRequest::default().page_size, PAGE_SIZE);
    }

    #[test]
    fn test_page_map_keeps_count() {
        let page = Page {
            items: vec![1, 2, 3],
            count: 42,
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.count, 42);
    }
}
