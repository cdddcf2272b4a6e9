//! Table core: column registry, state store, reorder controller, and the
//! derived row model.
//!
//! The state store is exclusively owned by the table view; all mutation
//! goes through its setters, and the row model is recomputed from state
//! before every draw.

pub mod column;
pub mod reorder;
pub mod rows;
pub mod state;

pub use column::{ColumnRegistry, ColumnSpec};
pub use reorder::{apply_reorder, reorder};
pub use rows::{build_row_model, CellView, ColumnView, Record, RowModel, RowView, Value};
pub use state::{Pagination, SortDirection, SortEntry, TableState, DEFAULT_PAGE_SIZE};
