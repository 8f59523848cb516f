//! Chapter ordering rules.
//!
//! # Invariants
//! - `renumber` yields orders `0..n-1` and keeps the prior relative sequence.
//! - Display sorting never mutates `order` values.
//! - Ties on `order` keep working-copy position (stable sort).

use crate::model::project::Chapter;

/// Display direction for the chapter list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// Position assigned to a chapter appended to `chapters`.
pub fn next_order(chapters: &[Chapter]) -> u32 {
    u32::try_from(chapters.len()).unwrap_or(u32::MAX)
}

/// Re-sequences chapters by current `order` and rewrites them to `0..n-1`.
///
/// The slice is left sorted by the new order.
pub fn renumber(chapters: &mut [Chapter]) {
    chapters.sort_by_key(|chapter| chapter.order);
    for (index, chapter) in chapters.iter_mut().enumerate() {
        chapter.order = u32::try_from(index).unwrap_or(u32::MAX);
    }
}

/// Returns chapter references sorted by `order` in `direction`.
pub fn sorted_view(chapters: &[Chapter], direction: SortDirection) -> Vec<&Chapter> {
    let mut view: Vec<&Chapter> = chapters.iter().collect();
    match direction {
        SortDirection::Ascending => view.sort_by(|a, b| a.order.cmp(&b.order)),
        SortDirection::Descending => view.sort_by(|a, b| b.order.cmp(&a.order)),
    }
    view
}

/// First chapter by `order`, if any.
pub fn first_in_order(chapters: &[Chapter]) -> Option<&Chapter> {
    chapters.iter().min_by_key(|chapter| chapter.order)
}

/// Whether `order` values are exactly `0..n-1` (in any storage position).
pub fn is_dense(chapters: &[Chapter]) -> bool {
    let mut orders: Vec<u32> = chapters.iter().map(|chapter| chapter.order).collect();
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(index, order)| u32::try_from(index).map_or(false, |expected| expected == *order))
}
