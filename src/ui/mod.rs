//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including the table view
//! and reusable UI components.

mod components;
pub mod theme;
mod views;

pub use components::{
    ColumnMenu, ColumnMenuAction, ColumnMenuItem, LoadingIndicator, Notification,
    NotificationManager, NotificationType, TextInput,
};
pub use theme::{init_theme, load_theme};
pub use views::{TableAction, TableView};
