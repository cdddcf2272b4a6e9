//! Reusable UI components.

mod column_menu;
mod input;
mod loading;
mod notification;

pub use column_menu::{ColumnMenu, ColumnMenuAction, ColumnMenuItem};
pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use notification::{Notification, NotificationManager, NotificationType};
