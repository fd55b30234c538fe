use crate::page::PageRequest;

/// The row window a page request maps to: skip `offset` rows, return `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub offset: u64,
    pub size: u64,
}

impl RowWindow {
    /// Window for `request`.
    ///
    /// Without a count, one extra row is requested so the assembler can tell
    /// whether another page follows.
    pub fn for_request(request: &PageRequest) -> Self {
        let page_size = u64::from(request.page_size);
        let offset = u64::from(request.page_num.saturating_sub(1)) * page_size;
        let size = if request.need_count {
            page_size
        } else {
            page_size + 1
        };
        Self { offset, size }
    }

    /// Append the window clause (`LIMIT <offset>,<size>`) to `sql`.
    pub fn apply(&self, sql: &str) -> String {
        format!("{sql} LIMIT {},{}", self.offset, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_zero_based() {
        for page_num in 1..=5u32 {
            for page_size in 1..=7u32 {
                let window = RowWindow::for_request(&PageRequest::new(page_num, page_size));
                assert_eq!(window.offset, u64::from((page_num - 1) * page_size));
            }
        }
    }

    #[test]
    fn test_size_with_and_without_count() {
        let counted = RowWindow::for_request(&PageRequest::new(2, 25));
        assert_eq!(counted, RowWindow { offset: 25, size: 25 });

        let probed = RowWindow::for_request(&PageRequest::without_count(2, 25));
        assert_eq!(probed, RowWindow { offset: 25, size: 26 });
    }

    #[test]
    fn test_large_pages_do_not_overflow() {
        let window = RowWindow::for_request(&PageRequest::new(u32::MAX, u32::MAX));
        assert_eq!(window.offset, u64::from(u32::MAX - 1) * u64::from(u32::MAX));
    }

    #[test]
    fn test_apply_appends_offset_then_size() {
        let window = RowWindow { offset: 30, size: 11 };
        assert_eq!(
            window.apply("select id from users order by id"),
            "select id from users order by id LIMIT 30,11"
        );
    }
}
