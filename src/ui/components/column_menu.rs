//! Column visibility menu.
//!
//! A centered popup listing every hideable column with a checkbox.
//! Toggling a checkbox takes effect immediately; closing the menu never
//! discards anything.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::ui::theme::theme;

/// One toggleable entry in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMenuItem {
    /// Column id.
    pub id: String,
    /// Display label.
    pub label: String,
}

impl ColumnMenuItem {
    /// Create a menu item.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Action returned from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMenuAction {
    /// The user toggled a column's visibility.
    Toggle(String),
    /// The user closed the menu.
    Close,
}

/// Checkbox popup for column visibility.
#[derive(Debug, Default)]
pub struct ColumnMenu {
    /// Hideable columns in table order.
    items: Vec<ColumnMenuItem>,
    /// Ids currently checked (visible).
    checked: HashSet<String>,
    /// Focused item index.
    cursor: usize,
    /// Whether the popup is open.
    visible: bool,
    /// List state for ratatui.
    list_state: ListState,
}

impl ColumnMenu {
    /// Create a closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the menu with the given items and checked set.
    pub fn open(&mut self, items: Vec<ColumnMenuItem>, checked: HashSet<String>) {
        self.items = items;
        self.checked = checked;
        self.cursor = 0;
        self.list_state.select(if self.items.is_empty() {
            None
        } else {
            Some(0)
        });
        self.visible = true;
    }

    /// Close the menu.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Whether the popup is open.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether an item is currently checked.
    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    /// Update the checked set after the caller applied a toggle.
    pub fn set_checked(&mut self, checked: HashSet<String>) {
        self.checked = checked;
    }

    /// The focused item, if any.
    fn current(&self) -> Option<&ColumnMenuItem> {
        self.items.get(self.cursor)
    }

    fn move_down(&mut self) {
        if !self.items.is_empty() && self.cursor < self.items.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Handle keyboard input while the menu is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ColumnMenuAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) | (KeyCode::Enter, KeyModifiers::NONE) => {
                self.current()
                    .map(|item| ColumnMenuAction::Toggle(item.id.clone()))
            }
            (KeyCode::Esc, _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::NONE) => {
                self.close();
                Some(ColumnMenuAction::Close)
            }
            _ => None,
        }
    }

    /// Render the popup centered in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        let theme = theme();

        let height = (self.items.len() as u16 + 2).min(area.height);
        let width = 30.min(area.width);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let mark = if self.checked.contains(&item.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", mark), Style::default().fg(theme.accent)),
                    Span::styled(item.label.clone(), Style::default().fg(theme.fg)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Columns ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            )
            .highlight_style(
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(list, popup, &mut self.list_state);
    }
}
