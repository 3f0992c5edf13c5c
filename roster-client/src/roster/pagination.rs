//! Page index and page size for the table window

use crate::config::PAGE_SIZE_OPTIONS;
use crate::{RosterError, RosterResult};

/// Page controls
///
/// The page index is zero-based and is not clamped: a page past the end
/// renders an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> RosterResult<Self> {
        Self::validate(page_size)?;
        Ok(Self { page: 0, page_size })
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change rows per page and return to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> RosterResult<()> {
        Self::validate(page_size)?;
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Number of pages needed for `total_rows`
    pub fn page_count(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size)
    }

    fn validate(page_size: usize) -> RosterResult<()> {
        if PAGE_SIZE_OPTIONS.contains(&page_size) {
            Ok(())
        } else {
            Err(RosterError::InvalidPageSize(page_size))
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZE_OPTIONS[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_change_resets_page() {
        let mut pagination = Pagination::default();
        pagination.set_page(3);
        pagination.set_page_size(10).unwrap();
        assert_eq!(pagination, Pagination { page: 0, page_size: 10 });
    }

    #[test]
    fn test_rejects_unlisted_page_size() {
        assert!(matches!(Pagination::new(7), Err(RosterError::InvalidPageSize(7))));
        let mut pagination = Pagination::new(25).unwrap();
        pagination.set_page(1);
        assert!(pagination.set_page_size(0).is_err());
        assert_eq!(pagination, Pagination { page: 1, page_size: 25 });
    }

    #[test]
    fn test_page_count() {
        let mut pagination = Pagination::new(5).unwrap();
        assert_eq!(pagination.page_count(0), 0);
        assert_eq!(pagination.page_count(5), 1);
        assert_eq!(pagination.page_count(11), 3);

        pagination.set_page(2);
        assert_eq!(pagination.page_count(11), 3);
    }
}
