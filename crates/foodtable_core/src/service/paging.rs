//! View pagination helpers.
//!
//! # Responsibility
//! - Turn a total row count and page length into a number of views.
//! - Clamp a requested view index into the valid range.
//!
//! # Invariants
//! - There is always at least one view, even for an empty table.
//! - A clamped view index is always `< view_count`.

use serde::Serialize;

/// One page of rows together with its position in the pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPage<T> {
    /// Rows shown in this view, in id order.
    pub items: Vec<T>,
    /// Zero-based index of this view.
    pub view_index: usize,
    /// Total number of views, at least 1.
    pub view_count: usize,
}

impl<T> ViewPage<T> {
    pub fn is_first(&self) -> bool {
        self.view_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.view_index + 1 >= self.view_count
    }
}

/// Returns how many views are needed to show `total` rows.
pub fn view_count(total: usize, page_length: usize) -> usize {
    if total == 0 {
        return 1;
    }
    total.div_ceil(page_length.max(1))
}

/// Clamps a requested view index into `[0, view_count)`.
pub fn clamp_view_index(index: i64, view_count: usize) -> usize {
    let last = view_count.saturating_sub(1);
    if index < 0 {
        return 0;
    }
    usize::try_from(index).map_or(last, |value| value.min(last))
}
