//! The mutable table state store.
//!
//! [`TableState`] holds everything the user can change at runtime: column
//! order, visibility overrides, sort criteria, per-column filters, the
//! pagination cursor, live column widths, and the pending-reset flag.
//!
//! Every field has a plain setter and a functional `update_*` variant that
//! derives the next value from the latest prior value. All mutation goes
//! through these setters; nothing outside this module touches the fields
//! directly, so two quickly dispatched events can never clobber each
//! other's base state.

use std::collections::HashMap;

use tracing::debug;

use super::column::ColumnRegistry;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single sort criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    /// The column being sorted.
    pub column_id: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortEntry {
    /// Create a sort entry.
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }
}

/// The pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, always at least 1.
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Mutable, UI-visible state for one table instance.
#[derive(Debug, Clone)]
pub struct TableState {
    /// Current left-to-right permutation of column ids.
    column_order: Vec<String>,
    /// Visibility overrides; columns without an entry are visible.
    visibility: HashMap<String, bool>,
    /// Sort criteria. Single-column sort keeps this at 0 or 1 entries.
    sorting: Vec<SortEntry>,
    /// Per-column substring filters. Empty values are not stored.
    filters: HashMap<String, String>,
    /// Pagination cursor.
    pagination: Pagination,
    /// Live width overrides, keyed by column id.
    sizing: HashMap<String, u16>,
    /// Set while a reset has been requested but not yet applied.
    pending: bool,
}

impl TableState {
    /// Create state with the registry's natural order and all defaults.
    pub fn new(registry: &ColumnRegistry, page_size: usize) -> Self {
        Self {
            column_order: registry.natural_order(),
            visibility: HashMap::new(),
            sorting: Vec::new(),
            filters: HashMap::new(),
            pagination: Pagination {
                page_index: 0,
                page_size: page_size.max(1),
            },
            sizing: HashMap::new(),
            pending: false,
        }
    }

    // ========================================================================
    // Column order
    // ========================================================================

    /// The current column order.
    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    /// Replace the column order.
    pub fn set_column_order(&mut self, order: Vec<String>) {
        self.column_order = order;
    }

    /// Derive a new column order from the current one.
    pub fn update_column_order<F>(&mut self, f: F)
    where
        F: FnOnce(&[String]) -> Vec<String>,
    {
        self.column_order = f(&self.column_order);
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    /// Whether a column is currently visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(true)
    }

    /// Set a column's visibility.
    pub fn set_visibility(&mut self, id: impl Into<String>, visible: bool) {
        let id = id.into();
        if visible {
            // Visible is the default, so drop the override entirely.
            self.visibility.remove(&id);
        } else {
            self.visibility.insert(id, false);
        }
    }

    /// Flip a column's visibility. The column order is left untouched.
    pub fn toggle_visibility(&mut self, id: &str) {
        let visible = self.is_visible(id);
        self.set_visibility(id.to_string(), !visible);
    }

    /// Derive new visibility overrides from the current ones.
    pub fn update_visibility<F>(&mut self, f: F)
    where
        F: FnOnce(&HashMap<String, bool>) -> HashMap<String, bool>,
    {
        self.visibility = f(&self.visibility);
    }

    /// Number of hidden columns.
    pub fn hidden_count(&self) -> usize {
        self.visibility.values().filter(|v| !**v).count()
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// The current sort criteria.
    pub fn sorting(&self) -> &[SortEntry] {
        &self.sorting
    }

    /// The sort direction applied to a column, if any.
    pub fn sort_for(&self, id: &str) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|e| e.column_id == id)
            .map(|e| e.direction)
    }

    /// Replace the sort criteria.
    pub fn set_sorting(&mut self, sorting: Vec<SortEntry>) {
        self.sorting = sorting;
    }

    /// Derive new sort criteria from the current ones.
    pub fn update_sorting<F>(&mut self, f: F)
    where
        F: FnOnce(&[SortEntry]) -> Vec<SortEntry>,
    {
        self.sorting = f(&self.sorting);
    }

    /// Cycle the sort state of a column.
    ///
    /// Repeated toggles on the same column go ascending, then descending,
    /// then back to unsorted. Toggling a different column replaces the
    /// existing criterion with an ascending sort on that column.
    pub fn toggle_sort(&mut self, id: &str) {
        let next = match self.sorting.first() {
            Some(entry) if entry.column_id == id => match entry.direction {
                SortDirection::Ascending => {
                    vec![SortEntry::new(id, SortDirection::Descending)]
                }
                SortDirection::Descending => Vec::new(),
            },
            _ => vec![SortEntry::new(id, SortDirection::Ascending)],
        };
        debug!(column = id, sorting = ?next, "Sort toggled");
        self.sorting = next;
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// The filter value for a column, or `""` when unfiltered.
    pub fn filter(&self, id: &str) -> &str {
        self.filters.get(id).map(String::as_str).unwrap_or("")
    }

    /// All non-empty filters.
    pub fn filters(&self) -> &HashMap<String, String> {
        &self.filters
    }

    /// Set a column's filter value.
    ///
    /// An empty value clears the filter. Any filter change moves the
    /// pagination cursor back to the first page, since the filtered row
    /// set the cursor referred to no longer exists.
    pub fn set_filter(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&id);
        } else {
            self.filters.insert(id, value);
        }
        self.pagination.page_index = 0;
    }

    /// Derive new filters from the current ones. Resets the page index.
    pub fn update_filters<F>(&mut self, f: F)
    where
        F: FnOnce(&HashMap<String, String>) -> HashMap<String, String>,
    {
        self.filters = f(&self.filters);
        self.filters.retain(|_, v| !v.is_empty());
        self.pagination.page_index = 0;
    }

    /// Whether any filter is active.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// The pagination cursor.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Set the page index directly.
    pub fn set_page_index(&mut self, page_index: usize) {
        self.pagination.page_index = page_index;
    }

    /// Set the page size. Values below 1 are raised to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size.max(1);
    }

    /// Advance to the next page if one exists within `page_count`.
    pub fn next_page(&mut self, page_count: usize) {
        if self.pagination.page_index + 1 < page_count {
            self.pagination.page_index += 1;
        }
    }

    /// Go back one page if not already on the first.
    pub fn prev_page(&mut self) {
        self.pagination.page_index = self.pagination.page_index.saturating_sub(1);
    }

    // ========================================================================
    // Sizing
    // ========================================================================

    /// The live width override for a column, if the user resized it.
    pub fn size_override(&self, id: &str) -> Option<u16> {
        self.sizing.get(id).copied()
    }

    /// Set a column's live width. Callers clamp via the registry first.
    pub fn set_size(&mut self, id: impl Into<String>, width: u16) {
        self.sizing.insert(id.into(), width);
    }

    /// Drop a column's width override, returning it to the default size.
    pub fn clear_size(&mut self, id: &str) {
        self.sizing.remove(id);
    }

    /// Derive new width overrides from the current ones.
    pub fn update_sizing<F>(&mut self, f: F)
    where
        F: FnOnce(&HashMap<String, u16>) -> HashMap<String, u16>,
    {
        self.sizing = f(&self.sizing);
    }

    // ========================================================================
    // Reset
    // ========================================================================

    /// Whether a reset has been requested but not yet applied.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Mark or clear the pending-reset flag.
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Restore order, sorting, filters, and visibility to their initial
    /// values in one step.
    ///
    /// Width overrides survive a reset; the pagination cursor returns to
    /// the first page because the filters were cleared.
    pub fn reset(&mut self, registry: &ColumnRegistry) {
        self.column_order = registry.natural_order();
        self.sorting.clear();
        self.filters.clear();
        self.visibility.clear();
        self.pagination.page_index = 0;
        debug!("Table state reset to defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::ColumnSpec;

    fn test_registry() -> ColumnRegistry {
        ColumnRegistry::new(vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name").filterable(),
            ColumnSpec::new("email", "Email").filterable(),
            ColumnSpec::new("age", "Age"),
        ])
    }

    fn test_state() -> TableState {
        TableState::new(&test_registry(), DEFAULT_PAGE_SIZE)
    }

    #[test]
    fn test_new_uses_natural_order() {
        let state = test_state();
        assert_eq!(state.column_order(), ["id", "name", "email", "age"]);
        assert!(state.sorting().is_empty());
        assert!(!state.has_filters());
        assert_eq!(state.pagination().page_index, 0);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_page_size_floor() {
        let state = TableState::new(&test_registry(), 0);
        assert_eq!(state.pagination().page_size, 1);
    }

    #[test]
    fn test_functional_order_update() {
        let mut state = test_state();
        state.update_column_order(|prev| {
            let mut next = prev.to_vec();
            next.reverse();
            next
        });
        assert_eq!(state.column_order(), ["age", "email", "name", "id"]);
    }

    #[test]
    fn test_functional_update_sees_latest_value() {
        let mut state = test_state();
        state.update_column_order(|prev| {
            let mut next = prev.to_vec();
            next.swap(0, 1);
            next
        });
        // A second update must compose with the first, not the initial order.
        state.update_column_order(|prev| {
            assert_eq!(prev, ["name", "id", "email", "age"]);
            prev.to_vec()
        });
    }

    #[test]
    fn test_visibility_defaults_to_visible() {
        let state = test_state();
        assert!(state.is_visible("email"));
        assert_eq!(state.hidden_count(), 0);
    }

    #[test]
    fn test_toggle_visibility_preserves_order() {
        let mut state = test_state();
        let before = state.column_order().to_vec();

        state.toggle_visibility("email");
        assert!(!state.is_visible("email"));
        assert_eq!(state.column_order(), before);

        state.toggle_visibility("email");
        assert!(state.is_visible("email"));
        assert_eq!(state.column_order(), before);
    }

    #[test]
    fn test_set_visibility_true_drops_override() {
        let mut state = test_state();
        state.set_visibility("age", false);
        assert_eq!(state.hidden_count(), 1);
        state.set_visibility("age", true);
        assert_eq!(state.hidden_count(), 0);
    }

    #[test]
    fn test_sort_toggle_cycle() {
        let mut state = test_state();

        state.toggle_sort("age");
        assert_eq!(state.sort_for("age"), Some(SortDirection::Ascending));

        state.toggle_sort("age");
        assert_eq!(state.sort_for("age"), Some(SortDirection::Descending));

        state.toggle_sort("age");
        assert_eq!(state.sort_for("age"), None);
        assert!(state.sorting().is_empty());
    }

    #[test]
    fn test_sort_toggle_other_column_replaces() {
        let mut state = test_state();
        state.toggle_sort("age");
        state.toggle_sort("age");
        assert_eq!(state.sort_for("age"), Some(SortDirection::Descending));

        state.toggle_sort("name");
        assert_eq!(state.sort_for("age"), None);
        assert_eq!(state.sort_for("name"), Some(SortDirection::Ascending));
        assert_eq!(state.sorting().len(), 1);
    }

    #[test]
    fn test_set_filter_resets_page() {
        let mut state = test_state();
        state.set_page_index(3);
        state.set_filter("name", "an");
        assert_eq!(state.filter("name"), "an");
        assert_eq!(state.pagination().page_index, 0);
    }

    #[test]
    fn test_empty_filter_is_cleared() {
        let mut state = test_state();
        state.set_filter("name", "an");
        assert!(state.has_filters());
        state.set_filter("name", "");
        assert!(!state.has_filters());
        assert_eq!(state.filter("name"), "");
    }

    #[test]
    fn test_update_filters_drops_empty_values() {
        let mut state = test_state();
        state.update_filters(|prev| {
            let mut next = prev.clone();
            next.insert("name".to_string(), "a".to_string());
            next.insert("email".to_string(), String::new());
            next
        });
        assert_eq!(state.filter("name"), "a");
        assert!(!state.filters().contains_key("email"));
    }

    #[test]
    fn test_pagination_bounds() {
        let mut state = test_state();

        state.prev_page();
        assert_eq!(state.pagination().page_index, 0);

        state.next_page(3);
        state.next_page(3);
        assert_eq!(state.pagination().page_index, 2);

        // Already on the last page.
        state.next_page(3);
        assert_eq!(state.pagination().page_index, 2);

        state.prev_page();
        assert_eq!(state.pagination().page_index, 1);
    }

    #[test]
    fn test_sizing_override_and_clear() {
        let mut state = test_state();
        assert_eq!(state.size_override("name"), None);

        state.set_size("name", 22);
        assert_eq!(state.size_override("name"), Some(22));

        state.clear_size("name");
        assert_eq!(state.size_override("name"), None);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let registry = test_registry();
        let mut state = TableState::new(&registry, DEFAULT_PAGE_SIZE);

        state.set_column_order(vec![
            "age".to_string(),
            "id".to_string(),
            "name".to_string(),
            "email".to_string(),
        ]);
        state.toggle_sort("name");
        state.set_filter("email", "@example");
        state.toggle_visibility("id");
        state.set_page_index(2);
        state.set_size("name", 30);

        state.reset(&registry);

        assert_eq!(state.column_order(), ["id", "name", "email", "age"]);
        assert!(state.sorting().is_empty());
        assert!(!state.has_filters());
        assert!(state.is_visible("id"));
        assert_eq!(state.pagination().page_index, 0);
        // Sizing intentionally survives a reset.
        assert_eq!(state.size_override("name"), Some(30));
    }

    #[test]
    fn test_functional_sorting_visibility_and_sizing_updates() {
        let mut state = test_state();

        state.update_sorting(|prev| {
            assert!(prev.is_empty());
            vec![SortEntry::new("age", SortDirection::Descending)]
        });
        assert_eq!(state.sort_for("age"), Some(SortDirection::Descending));

        state.update_visibility(|prev| {
            let mut next = prev.clone();
            next.insert("id".to_string(), false);
            next
        });
        assert!(!state.is_visible("id"));

        state.update_sizing(|prev| {
            let mut next = prev.clone();
            next.insert("name".to_string(), 20);
            next
        });
        assert_eq!(state.size_override("name"), Some(20));
    }

    #[test]
    fn test_pending_flag() {
        let mut state = test_state();
        assert!(!state.is_pending());
        state.set_pending(true);
        assert!(state.is_pending());
        state.set_pending(false);
        assert!(!state.is_pending());
    }
}
