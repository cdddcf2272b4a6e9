//! The derived row model.
//!
//! [`build_row_model`] consumes the record collection plus the current
//! table state and produces exactly what the view renders: visible columns
//! in order with their live widths, and the page of rows that survives the
//! filter -> sort -> paginate pipeline. Filtering and sorting always run
//! over the full record set before the page slice is taken. Hidden columns
//! are excluded from the output entirely, not blanked.

use std::fmt;

use chrono::NaiveDate;

use super::column::{ColumnRegistry, ColumnSpec};
use super::state::{SortDirection, TableState};

/// A typed cell value, used for both sorting and display.
///
/// Columns are homogeneous, so comparisons only ever see matching
/// variants; the derived ordering across variants is irrelevant in
/// practice but keeps `Ord` total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Text(String),
    Int(i64),
    Date(NaiveDate),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Date(d) => write!(f, "{}", d.format("%m/%d/%Y")),
        }
    }
}

/// A row the pipeline can read cells from.
pub trait Record {
    /// The value of the cell in the given column, if the column exists.
    fn value(&self, column_id: &str) -> Option<Value>;
}

/// A visible column as the view should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    /// Column id.
    pub id: String,
    /// Header label.
    pub label: String,
    /// Live width in terminal cells.
    pub width: u16,
    /// Whether the sort toggle applies.
    pub sortable: bool,
    /// Whether the width can be changed.
    pub resizable: bool,
    /// Whether a text filter can be attached.
    pub filterable: bool,
    /// The sort currently applied to this column, if any.
    pub sort: Option<SortDirection>,
}

/// One rendered cell: the column it belongs to and its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub column_id: String,
    pub text: String,
}

/// One rendered row, cells ordered to match the visible columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowView {
    pub cells: Vec<CellView>,
}

/// The computed, render-ready table content.
#[derive(Debug, Clone, Default)]
pub struct RowModel {
    /// Visible columns in current order.
    pub columns: Vec<ColumnView>,
    /// The rows of the current page.
    pub rows: Vec<RowView>,
    /// Rows that survive filtering, before pagination.
    pub total_rows: usize,
    /// Effective page index, clamped to the available pages.
    pub page_index: usize,
    /// Number of pages for the filtered row set.
    pub page_count: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl RowModel {
    /// Whether a previous page exists.
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// Whether a next page exists.
    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// Sum of the visible column widths.
    pub fn total_width(&self) -> u16 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Whether the current page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Effective width of a column: the live override, or the default size.
fn column_width(state: &TableState, spec: &ColumnSpec) -> u16 {
    state.size_override(&spec.id).unwrap_or(spec.default_size)
}

/// Whether a record passes every active filter.
///
/// Filters are case-sensitive substring matches against the cell's
/// display text. A filter on a column the record does not have never
/// matches.
fn matches_filters<R: Record>(record: &R, state: &TableState) -> bool {
    state.filters().iter().all(|(column_id, needle)| {
        record
            .value(column_id)
            .map(|v| v.to_string().contains(needle.as_str()))
            .unwrap_or(false)
    })
}

/// Build the row model for the current state.
pub fn build_row_model<R: Record>(
    records: &[R],
    registry: &ColumnRegistry,
    state: &TableState,
) -> RowModel {
    // Filter over the full record set.
    let mut indices: Vec<usize> = (0..records.len())
        .filter(|&i| matches_filters(&records[i], state))
        .collect();

    // Sort the filtered set. The sort is stable, so ties keep their
    // original relative order.
    if let Some(entry) = state.sorting().first() {
        let column_id = entry.column_id.clone();
        indices.sort_by(|&a, &b| {
            let ordering = records[a]
                .value(&column_id)
                .cmp(&records[b].value(&column_id));
            match entry.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    // Slice the current page out of the filtered, sorted set.
    let total_rows = indices.len();
    let page_size = state.pagination().page_size.max(1);
    let page_count = (total_rows + page_size - 1) / page_size;
    let page_index = state
        .pagination()
        .page_index
        .min(page_count.saturating_sub(1));
    let start = page_index * page_size;
    let end = (start + page_size).min(total_rows);

    // Materialize the visible columns in current order.
    let columns: Vec<ColumnView> = state
        .column_order()
        .iter()
        .filter(|id| state.is_visible(id))
        .filter_map(|id| registry.get(id))
        .map(|spec| ColumnView {
            id: spec.id.clone(),
            label: spec.label.clone(),
            width: column_width(state, spec),
            sortable: spec.sortable,
            resizable: spec.resizable,
            filterable: spec.filterable,
            sort: state.sort_for(&spec.id),
        })
        .collect();

    // Materialize cells for the page, matching the visible column order.
    let rows: Vec<RowView> = indices[start..end]
        .iter()
        .map(|&i| RowView {
            cells: columns
                .iter()
                .map(|col| CellView {
                    column_id: col.id.clone(),
                    text: records[i]
                        .value(&col.id)
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    RowModel {
        columns,
        rows,
        total_rows,
        page_index,
        page_count,
        page_size,
    }
}
