// Page cursor for operator-driven listings.
//
// Navigation is clamped: `next` on the last page and `prev` on the first
// page leave the cursor where it is and report that nothing moved.

/// Position within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    page_size: u32,
    total: u64,
}

impl Pager {
    /// Start at page 0. A zero page size is bumped to 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Record the item total reported by the latest fetch.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// `false` iff `(page + 1) * page_size >= total`.
    pub fn has_next(&self) -> bool {
        (u64::from(self.page) + 1) * u64::from(self.page_size) < self.total
    }

    /// `false` iff on page 0.
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Advance one page. Returns `false` (and stays put) on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page. Returns `false` (and stays put) on the first page.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_disabled_iff_past_total() {
        for size in 1..=7u32 {
            for total in 0..=40u64 {
                for page in 0..6u32 {
                    let pager = Pager {
                        page,
                        page_size: size,
                        total,
                    };
                    let expected = (u64::from(page) + 1) * u64::from(size) >= total;
                    assert_eq!(
                        !pager.has_next(),
                        expected,
                        "page={page} size={size} total={total}"
                    );
                }
            }
        }
    }

    #[test]
    fn prev_disabled_only_on_first_page() {
        let mut pager = Pager::new(20);
        pager.set_total(100);
        assert!(!pager.has_prev());
        assert!(!pager.prev());
        assert_eq!(pager.page(), 0);

        assert!(pager.next());
        assert!(pager.has_prev());
        assert!(pager.prev());
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn next_is_clamped_on_last_page() {
        let mut pager = Pager::new(20);
        pager.set_total(40);
        assert!(pager.next());
        assert_eq!(pager.page(), 1);
        assert!(!pager.next());
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn single_partial_page_has_no_next() {
        let mut pager = Pager::new(20);
        pager.set_total(7);
        assert!(!pager.has_next());
    }

    #[test]
    fn zero_page_size_is_bumped() {
        assert_eq!(Pager::new(0).page_size(), 1);
    }
}
