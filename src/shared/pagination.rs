/// Default page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 50;

/// A 1-based page request.
///
/// Bounds (`page >= 1`, `page_size` in `1..=MAX_PAGE_SIZE`) are enforced at the
/// HTTP boundary; the arithmetic here saturates instead of panicking if an
/// out-of-range value slips through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Number of records skipped before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(PageRequest::new(1, 5).offset(), 0);
        assert_eq!(PageRequest::new(1, 5).limit(), 5);
    }

    #[test]
    fn later_pages_skip_previous_ones() {
        assert_eq!(PageRequest::new(3, 50).offset(), 100);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
    }

    #[test]
    fn large_pages_do_not_overflow() {
        let page = PageRequest::new(u32::MAX, MAX_PAGE_SIZE);
        assert_eq!(page.offset(), u64::from(u32::MAX - 1) * 50);
    }

    #[test]
    fn default_matches_transport_defaults() {
        assert_eq!(PageRequest::default(), PageRequest::new(1, DEFAULT_PAGE_SIZE));
    }
}
