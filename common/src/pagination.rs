//! Page strip for the result list: first, last, a window around the current
//! page, and single gap markers in between.

use crate::search_const::PAGINATION_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u64),
    Gap,
}

pub fn page_strip(current: u64, total_pages: u64) -> Vec<PageItem> {
    page_strip_with_window(current, total_pages, PAGINATION_WINDOW)
}

pub fn page_strip_with_window(current: u64, total_pages: u64, window: u64) -> Vec<PageItem> {
    if total_pages <= 1 {
        return vec![];
    }
    let low = current.saturating_sub(window);
    let high = current.saturating_add(window);
    let mut strip = Vec::new();
    for page in 1..=total_pages {
        if page == 1 || page == total_pages || (low..=high).contains(&page) {
            strip.push(PageItem::Page(page));
        } else if strip.last() != Some(&PageItem::Gap) {
            strip.push(PageItem::Gap);
        }
    }
    strip
}

pub fn has_previous(current: u64) -> bool {
    current > 1
}

pub fn has_next(current: u64, total_pages: u64) -> bool {
    current < total_pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use PageItem::{Gap, Page};

    #[test]
    fn single_page_has_no_strip() {
        assert!(page_strip(1, 1).is_empty());
        assert!(page_strip(1, 0).is_empty());
    }

    #[test]
    fn window_with_gaps_on_both_sides() {
        assert_eq!(
            page_strip_with_window(10, 20, 2),
            vec![Page(1), Gap, Page(8), Page(9), Page(10), Page(11), Page(12), Gap, Page(20)]
        );
    }

    #[test]
    fn window_touching_the_start() {
        assert_eq!(page_strip_with_window(2, 8, 2), vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(8)]);
    }

    #[test]
    fn out_of_range_current_page_still_links_the_last_page() {
        assert_eq!(page_strip_with_window(30, 4, 2), vec![Page(1), Gap, Page(4)]);
        assert!(!has_next(30, 4));
        assert!(has_previous(30));
    }
}
