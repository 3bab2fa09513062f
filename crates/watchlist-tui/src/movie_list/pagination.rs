//! Pagination control: page navigation and the visible page strip.

use std::num::NonZeroU32;

/// Pages shown on each side of the current page before eliding.
const NEIGHBOURS: u32 = 2;

/// Page counts up to this value are shown without gaps.
const SHOW_ALL_LIMIT: u32 = 9;

/// One slot in the rendered page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A selectable page number.
    Page(u32),
    /// Elided run of pages.
    Gap,
}

/// Page navigation for a (current page, total pages) pair.
///
/// Navigation methods return the chosen page, or `None` when the move
/// would leave `1..=total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PaginationControl {
    current: NonZeroU32,
    total: NonZeroU32,
}

impl PaginationControl {
    /// Creates a control for `current` of `total` pages.
    #[must_use]
    pub const fn new(current: NonZeroU32, total: NonZeroU32) -> Self {
        Self { current, total }
    }

    /// Current page.
    #[must_use]
    pub const fn current(&self) -> NonZeroU32 {
        self.current
    }

    /// Total pages.
    #[must_use]
    pub const fn total(&self) -> NonZeroU32 {
        self.total
    }

    /// Previous page.
    #[must_use]
    pub fn previous(&self) -> Option<NonZeroU32> {
        let page = NonZeroU32::new(self.current.get().saturating_sub(1))?;
        self.jump(page.get())
    }

    /// Next page.
    #[must_use]
    pub fn next(&self) -> Option<NonZeroU32> {
        self.jump(self.current.get().saturating_add(1))
    }

    /// First page.
    #[must_use]
    pub fn first(&self) -> Option<NonZeroU32> {
        self.jump(1)
    }

    /// Last page.
    #[must_use]
    pub fn last(&self) -> Option<NonZeroU32> {
        self.jump(self.total.get())
    }

    /// Page `page`, if it exists and differs from the current one.
    #[must_use]
    pub fn jump(&self, page: u32) -> Option<NonZeroU32> {
        let page = NonZeroU32::new(page)?;
        (page <= self.total && page != self.current).then_some(page)
    }

    /// Page numbers to render, with gaps for elided runs.
    ///
    /// The first and last pages and the current page's neighbours are
    /// always shown. A current page beyond the total is still shown.
    #[must_use]
    pub fn slots(&self) -> Vec<PageSlot> {
        let total = self.total.get().max(self.current.get());
        if total <= SHOW_ALL_LIMIT {
            return (1..=total).map(PageSlot::Page).collect();
        }

        let current = self.current.get();
        let low = current.saturating_sub(NEIGHBOURS).max(2);
        let high = current
            .saturating_add(NEIGHBOURS)
            .min(total.saturating_sub(1));

        let mut slots = vec![PageSlot::Page(1)];
        if low > 2 {
            slots.push(PageSlot::Gap);
        }
        slots.extend((low..=high).map(PageSlot::Page));
        if high < total.saturating_sub(1) {
            slots.push(PageSlot::Gap);
        }
        slots.push(PageSlot::Page(total));
        slots
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn control(current: u32, total: u32) -> PaginationControl {
        PaginationControl::new(
            NonZeroU32::new(current).unwrap(),
            NonZeroU32::new(total).unwrap(),
        )
    }

    #[test]
    fn test_previous_and_next() {
        // Arrange
        let middle = control(2, 3);

        // Act & Assert
        assert_eq!(middle.previous().unwrap().get(), 1);
        assert_eq!(middle.next().unwrap().get(), 3);
    }

    #[test]
    fn test_navigation_stops_at_bounds() {
        // Arrange
        let first = control(1, 3);
        let last = control(3, 3);

        // Act & Assert
        assert!(first.previous().is_none());
        assert!(first.first().is_none());
        assert!(last.next().is_none());
        assert!(last.last().is_none());
        assert_eq!(first.last().unwrap().get(), 3);
        assert_eq!(last.first().unwrap().get(), 1);
    }

    #[test]
    fn test_jump() {
        // Arrange
        let ctl = control(1, 5);

        // Act & Assert
        assert_eq!(ctl.jump(4).unwrap().get(), 4);
        assert!(ctl.jump(0).is_none());
        assert!(ctl.jump(1).is_none());
        assert!(ctl.jump(6).is_none());
    }

    #[test]
    fn test_previous_from_out_of_range_page() {
        // Arrange: current page beyond total (set_page is not bounds checked)
        let ctl = control(7, 3);

        // Act & Assert
        assert!(ctl.previous().is_none());
        assert_eq!(ctl.last().unwrap().get(), 3);
    }

    #[test]
    fn test_slots_small_total_shows_all() {
        // Arrange & Act
        let slots = control(2, 4).slots();

        // Assert
        assert_eq!(
            slots,
            vec![
                PageSlot::Page(1),
                PageSlot::Page(2),
                PageSlot::Page(3),
                PageSlot::Page(4),
            ]
        );
    }

    #[test]
    fn test_slots_large_total_elides_both_sides() {
        // Arrange & Act
        let slots = control(10, 20).slots();

        // Assert
        assert_eq!(
            slots,
            vec![
                PageSlot::Page(1),
                PageSlot::Gap,
                PageSlot::Page(8),
                PageSlot::Page(9),
                PageSlot::Page(10),
                PageSlot::Page(11),
                PageSlot::Page(12),
                PageSlot::Gap,
                PageSlot::Page(20),
            ]
        );
    }

    #[test]
    fn test_slots_near_start() {
        // Arrange & Act
        let slots = control(1, 20).slots();

        // Assert
        assert_eq!(
            slots,
            vec![
                PageSlot::Page(1),
                PageSlot::Page(2),
                PageSlot::Page(3),
                PageSlot::Gap,
                PageSlot::Page(20),
            ]
        );
    }

    #[test]
    fn test_slots_near_end() {
        // Arrange & Act
        let slots = control(19, 20).slots();

        // Assert
        assert_eq!(
            slots,
            vec![
                PageSlot::Page(1),
                PageSlot::Gap,
                PageSlot::Page(17),
                PageSlot::Page(18),
                PageSlot::Page(19),
                PageSlot::Page(20),
            ]
        );
    }
}
