//! The interactive table view.
//!
//! Owns the table state store and translates key presses into state
//! mutations: column focus, sort toggling, filter editing, grab-and-drop
//! reordering, resizing, and pagination. The row model is rebuilt from
//! state on every draw, so the rendered table always reflects the latest
//! mutation.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use tracing::debug;

use crate::data::Person;
use crate::events::KeyBindings;
use crate::table::{
    apply_reorder, build_row_model, ColumnRegistry, RowModel, SortDirection, TableState,
};
use crate::ui::components::TextInput;
use crate::ui::theme::theme;

/// Actions the table view hands back to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Open the column visibility menu.
    OpenColumnMenu,
    /// The user asked for a reset.
    RequestReset,
    /// Quit the application.
    Quit,
}

/// The interactive data table.
pub struct TableView {
    /// Immutable column registry.
    registry: ColumnRegistry,
    /// The record collection, immutable per session.
    records: Vec<Person>,
    /// Mutable table state store.
    state: TableState,
    /// Focused position among the visible columns.
    focused: usize,
    /// Id of the column currently grabbed for reordering.
    grabbed: Option<String>,
    /// Column whose filter is being edited, if any.
    filter_column: Option<String>,
    /// Editor for the active filter.
    filter_input: TextInput,
    /// Key binding configuration.
    keys: KeyBindings,
}

impl TableView {
    /// Create the view around a registry and record collection.
    pub fn new(
        registry: ColumnRegistry,
        records: Vec<Person>,
        page_size: usize,
        keys: KeyBindings,
    ) -> Self {
        let state = TableState::new(&registry, page_size);
        Self {
            registry,
            records,
            state,
            focused: 0,
            grabbed: None,
            filter_column: None,
            filter_input: TextInput::new(),
            keys,
        }
    }

    /// The table state store.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Mutable access to the table state store.
    pub fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }

    /// The column registry.
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Number of records behind the table.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Ids of the visible columns in current order.
    pub fn visible_columns(&self) -> Vec<String> {
        self.state
            .column_order()
            .iter()
            .filter(|id| self.state.is_visible(id))
            .cloned()
            .collect()
    }

    /// The id of the focused column, if any column is visible.
    pub fn focused_id(&self) -> Option<String> {
        self.visible_columns().get(self.focused).cloned()
    }

    /// Whether a column is currently grabbed.
    pub fn is_grabbing(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Whether a filter editor is open.
    pub fn is_filtering(&self) -> bool {
        self.filter_column.is_some()
    }

    /// Build the row model for the current state.
    pub fn row_model(&self) -> RowModel {
        build_row_model(&self.records, &self.registry, &self.state)
    }

    /// Clamp the focus to the visible column range.
    fn clamp_focus(&mut self) {
        let count = self.visible_columns().len();
        if count == 0 {
            self.focused = 0;
        } else if self.focused >= count {
            self.focused = count - 1;
        }
    }

    fn focus_left(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    fn focus_right(&mut self) {
        let count = self.visible_columns().len();
        if count > 0 && self.focused + 1 < count {
            self.focused += 1;
        }
    }

    /// Apply a visibility toggle coming from the column menu.
    pub fn apply_column_toggle(&mut self, id: &str) {
        self.state.toggle_visibility(id);
        self.clamp_focus();
    }

    /// Apply a pending reset: one atomic restore of order, sorting,
    /// filters, and visibility. Any grab or filter editing session in
    /// progress is abandoned, since the columns it referred to may have
    /// moved.
    pub fn apply_reset(&mut self) {
        self.state.reset(&self.registry);
        self.state.set_pending(false);
        self.grabbed = None;
        self.filter_column = None;
        self.filter_input.clear();
        self.focused = 0;
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TableAction> {
        if self.filter_column.is_some() {
            self.handle_filter_input(key);
            return None;
        }
        if self.grabbed.is_some() {
            self.handle_grab_input(key);
            return None;
        }
        self.handle_normal_input(key)
    }

    /// Keys while the filter editor is open.
    fn handle_filter_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.filter_column = None;
                self.filter_input.clear();
            }
            _ => {
                if self.filter_input.handle_input(key) {
                    if let Some(column) = self.filter_column.clone() {
                        // Live update on every keystroke.
                        self.state.set_filter(column, self.filter_input.value());
                    }
                }
            }
        }
    }

    /// Keys while a column is grabbed: move the drop target, then drop.
    fn handle_grab_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.focus_left(),
            KeyCode::Right => self.focus_right(),
            KeyCode::Char('h') if self.keys.vim_mode => self.focus_left(),
            KeyCode::Char('l') if self.keys.vim_mode => self.focus_right(),
            KeyCode::Char(' ') | KeyCode::Enter => self.drop_grabbed(),
            KeyCode::Esc => {
                debug!("Column grab cancelled");
                self.grabbed = None;
            }
            _ => {}
        }
    }

    /// Complete the grab: emit the reorder signal and follow the column.
    fn drop_grabbed(&mut self) {
        let Some(dragged) = self.grabbed.take() else {
            return;
        };
        let Some(target) = self.focused_id() else {
            return;
        };
        if apply_reorder(&mut self.state, &dragged, &target) {
            // Keep focus on the column that was just moved.
            if let Some(index) = self.visible_columns().iter().position(|id| *id == dragged) {
                self.focused = index;
            }
        }
    }

    /// Keys in normal navigation mode.
    fn handle_normal_input(&mut self, key: KeyEvent) -> Option<TableAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.focus_left();
                None
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.focus_right();
                None
            }
            (KeyCode::Char('h'), KeyModifiers::NONE) if self.keys.vim_mode => {
                self.focus_left();
                None
            }
            (KeyCode::Char('l'), KeyModifiers::NONE) if self.keys.vim_mode => {
                self.focus_right();
                None
            }
            (KeyCode::Char('s'), KeyModifiers::NONE) => {
                self.toggle_sort_on_focused();
                None
            }
            (KeyCode::Char('/'), KeyModifiers::NONE) => {
                self.open_filter_editor();
                None
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) => {
                if let Some(id) = self.focused_id() {
                    debug!(column = %id, "Column grabbed");
                    self.grabbed = Some(id);
                }
                None
            }
            (KeyCode::Char('<'), _) => {
                self.resize_focused(-1);
                None
            }
            (KeyCode::Char('>'), _) => {
                self.resize_focused(1);
                None
            }
            (KeyCode::Char('='), _) => {
                self.reset_focused_size();
                None
            }
            (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => {
                self.state.prev_page();
                None
            }
            (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => {
                let page_count = self.row_model().page_count;
                self.state.next_page(page_count);
                None
            }
            (KeyCode::Char('c'), KeyModifiers::NONE) => Some(TableAction::OpenColumnMenu),
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(TableAction::RequestReset),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(TableAction::Quit),
            _ => None,
        }
    }

    /// Cycle the sort on the focused column, if it is sortable.
    fn toggle_sort_on_focused(&mut self) {
        let Some(id) = self.focused_id() else {
            return;
        };
        let sortable = self.registry.get(&id).map(|c| c.sortable).unwrap_or(false);
        if sortable {
            self.state.toggle_sort(&id);
        }
    }

    /// Open the filter editor for the focused column, preloaded with the
    /// current value.
    fn open_filter_editor(&mut self) {
        let Some(id) = self.focused_id() else {
            return;
        };
        let filterable = self
            .registry
            .get(&id)
            .map(|c| c.filterable)
            .unwrap_or(false);
        if !filterable {
            return;
        }
        self.filter_input.set_value(self.state.filter(&id));
        self.filter_input.set_placeholder("type to filter");
        self.filter_column = Some(id);
    }

    /// Change the focused column's width by `delta`, clamped to the
    /// column's bounds.
    fn resize_focused(&mut self, delta: i32) {
        let Some(id) = self.focused_id() else {
            return;
        };
        let Some(spec) = self.registry.get(&id) else {
            return;
        };
        if !spec.resizable {
            return;
        }
        let current = self.state.size_override(&id).unwrap_or(spec.default_size);
        let requested = (i32::from(current) + delta).max(0) as u16;
        self.state.set_size(id.clone(), spec.clamp(requested));
    }

    /// Return the focused column to its default width.
    fn reset_focused_size(&mut self) {
        let Some(id) = self.focused_id() else {
            return;
        };
        if self.registry.get(&id).map(|c| c.resizable).unwrap_or(false) {
            self.state.clear_size(&id);
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the filter bar, the table itself, and the empty placeholder.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        self.render_filter_bar(frame, chunks[0]);
        self.render_table(frame, chunks[1]);
    }

    /// One line above the table: the filter editor when open, otherwise
    /// the active filter values.
    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let theme = theme();

        if let Some(column) = &self.filter_column {
            let label = self
                .registry
                .get(column)
                .map(|c| c.label.clone())
                .unwrap_or_else(|| column.clone());
            self.filter_input
                .render(frame, area, &format!("Filter {}", label), true);
            return;
        }

        let mut spans = Vec::new();
        for spec in self.registry.iter().filter(|c| c.filterable) {
            let value = self.state.filter(&spec.id);
            let style = if value.is_empty() {
                Style::default().fg(theme.muted)
            } else {
                Style::default().fg(theme.fg)
            };
            spans.push(Span::styled(
                format!("{}: ", spec.label),
                Style::default().fg(theme.muted),
            ));
            spans.push(Span::styled(
                if value.is_empty() { "—" } else { value }.to_string(),
                style,
            ));
            spans.push(Span::raw("   "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// The table itself: header, rows, and the empty placeholder.
    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let theme = theme();
        let model = self.row_model();

        if model.columns.is_empty() {
            let paragraph = Paragraph::new("No columns visible. Press 'c' to show columns.")
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let focused_id = self.focused_id();
        let header_cells: Vec<Cell> = model
            .columns
            .iter()
            .map(|column| {
                let indicator = match column.sort {
                    Some(SortDirection::Ascending) => " ↑",
                    Some(SortDirection::Descending) => " ↓",
                    None if column.sortable => " ↕",
                    None => "",
                };

                let mut style = Style::default().fg(theme.header);
                if self.grabbed.as_deref() == Some(column.id.as_str()) {
                    style = Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD);
                } else if focused_id.as_deref() == Some(column.id.as_str()) {
                    style = Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }

                Cell::from(Line::from(vec![
                    Span::raw("≡ "),
                    Span::raw(column.label.clone()),
                    Span::raw(indicator),
                ]))
                .style(style)
            })
            .collect();

        let rows: Vec<Row> = model
            .rows
            .iter()
            .map(|row| {
                Row::new(
                    row.cells
                        .iter()
                        .map(|cell| Cell::from(cell.text.clone()))
                        .collect::<Vec<_>>(),
                )
                .style(Style::default().fg(theme.fg))
            })
            .collect();

        let widths: Vec<Constraint> = model
            .columns
            .iter()
            .map(|c| Constraint::Length(c.width))
            .collect();

        let empty = rows.is_empty();
        let table = Table::new(rows, widths)
            .header(Row::new(header_cells).height(1))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            )
            .column_spacing(1);

        frame.render_widget(table, area);

        if empty {
            // Placeholder row spanning the visible columns.
            let placeholder = Rect {
                x: area.x + 1,
                y: (area.y + 2).min(area.bottom().saturating_sub(1)),
                width: area.width.saturating_sub(2),
                height: 1,
            };
            let paragraph = Paragraph::new("No results.")
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, placeholder);
        }
    }

    /// Render the bottom status bar: counts, pagination, key hints.
    pub fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let theme = theme();
        let model = self.row_model();

        let page_display = format!(
            "Page {}/{}",
            model.page_index + 1,
            model.page_count.max(1)
        );

        let control = |label: &str, enabled: bool| {
            Span::styled(
                format!(" {} ", label),
                if enabled {
                    Style::default().fg(theme.fg)
                } else {
                    Style::default().fg(theme.muted)
                },
            )
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} of {} rows ", model.total_rows, self.records.len()),
                Style::default().fg(theme.muted),
            ),
            Span::styled(
                format!(" {} ", page_display),
                Style::default().fg(theme.fg),
            ),
            control("[ prev", model.can_previous_page()),
            control("] next", model.can_next_page()),
        ];

        if self.state.is_pending() {
            spans.push(Span::styled(
                " resetting… ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else if self.grabbed.is_some() {
            spans.push(Span::styled(
                " move: h/l place, Space drop, Esc cancel ",
                Style::default().fg(theme.accent),
            ));
        } else {
            spans.push(Span::styled(
                " s sort  / filter  Space move  < > resize  c columns  r reset  ? help",
                Style::default().fg(theme.muted),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Checked set for the column menu: ids of currently visible columns.
    pub fn visible_id_set(&self) -> HashSet<String> {
        self.registry
            .iter()
            .filter(|c| self.state.is_visible(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{make_data, person_columns};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_view() -> TableView {
        let mut rng = StdRng::seed_from_u64(9);
        TableView::new(
            person_columns(),
            make_data(20, &mut rng),
            10,
            KeyBindings::default(),
        )
    }

    #[test]
    fn test_initial_focus_is_first_column() {
        let view = test_view();
        assert_eq!(view.focused_id().as_deref(), Some("id"));
    }

    #[test]
    fn test_focus_movement_clamps() {
        let mut view = test_view();

        view.handle_input(key(KeyCode::Char('h')));
        assert_eq!(view.focused_id().as_deref(), Some("id"));

        for _ in 0..10 {
            view.handle_input(key(KeyCode::Char('l')));
        }
        assert_eq!(view.focused_id().as_deref(), Some("registration_date"));
    }

    #[test]
    fn test_arrow_keys_move_focus() {
        let mut view = test_view();
        view.handle_input(key(KeyCode::Right));
        assert_eq!(view.focused_id().as_deref(), Some("name"));
        view.handle_input(key(KeyCode::Left));
        assert_eq!(view.focused_id().as_deref(), Some("id"));
    }

    #[test]
    fn test_vim_mode_off_disables_letters() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut view = TableView::new(
            person_columns(),
            make_data(5, &mut rng),
            10,
            KeyBindings::new(false),
        );

        view.handle_input(key(KeyCode::Char('l')));
        assert_eq!(view.focused_id().as_deref(), Some("id"));

        view.handle_input(key(KeyCode::Right));
        assert_eq!(view.focused_id().as_deref(), Some("name"));
    }

    #[test]
    fn test_sort_key_cycles_focused_column() {
        let mut view = test_view();

        view.handle_input(key(KeyCode::Char('s')));
        assert_eq!(
            view.state().sort_for("id"),
            Some(SortDirection::Ascending)
        );

        view.handle_input(key(KeyCode::Char('s')));
        assert_eq!(
            view.state().sort_for("id"),
            Some(SortDirection::Descending)
        );

        view.handle_input(key(KeyCode::Char('s')));
        assert_eq!(view.state().sort_for("id"), None);
    }

    #[test]
    fn test_filter_editor_lifecycle() {
        let mut view = test_view();
        view.handle_input(key(KeyCode::Right)); // focus "name"

        view.handle_input(key(KeyCode::Char('/')));
        assert!(view.is_filtering());

        view.handle_input(key(KeyCode::Char('a')));
        view.handle_input(key(KeyCode::Char('n')));
        assert_eq!(view.state().filter("name"), "an");

        view.handle_input(key(KeyCode::Enter));
        assert!(!view.is_filtering());
        // Closing the editor keeps the filter.
        assert_eq!(view.state().filter("name"), "an");
    }

    #[test]
    fn test_filter_editor_preloads_current_value() {
        let mut view = test_view();
        view.state_mut().set_filter("name", "ab");
        view.handle_input(key(KeyCode::Right));

        view.handle_input(key(KeyCode::Char('/')));
        view.handle_input(key(KeyCode::Backspace));
        assert_eq!(view.state().filter("name"), "a");
    }

    #[test]
    fn test_filter_ignored_on_unfilterable_column() {
        let mut view = test_view();
        // "id" is not filterable.
        view.handle_input(key(KeyCode::Char('/')));
        assert!(!view.is_filtering());
    }

    #[test]
    fn test_grab_and_drop_reorders() {
        let mut view = test_view();

        // Focus "age" (index 3) and grab it.
        for _ in 0..3 {
            view.handle_input(key(KeyCode::Char('l')));
        }
        view.handle_input(key(KeyCode::Char(' ')));
        assert!(view.is_grabbing());

        // Move the drop target to "id" and drop.
        for _ in 0..3 {
            view.handle_input(key(KeyCode::Char('h')));
        }
        view.handle_input(key(KeyCode::Char(' ')));

        assert!(!view.is_grabbing());
        assert_eq!(
            view.state().column_order(),
            ["age", "id", "name", "email", "registration_date"]
        );
        // Focus follows the dragged column.
        assert_eq!(view.focused_id().as_deref(), Some("age"));
    }

    #[test]
    fn test_grab_cancel_keeps_order() {
        let mut view = test_view();
        let before = view.state().column_order().to_vec();

        view.handle_input(key(KeyCode::Char(' ')));
        view.handle_input(key(KeyCode::Char('l')));
        view.handle_input(key(KeyCode::Esc));

        assert!(!view.is_grabbing());
        assert_eq!(view.state().column_order(), before);
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut view = test_view();
        let before = view.state().column_order().to_vec();

        view.handle_input(key(KeyCode::Char(' ')));
        view.handle_input(key(KeyCode::Enter));

        assert_eq!(view.state().column_order(), before);
    }

    #[test]
    fn test_resize_clamps_to_bounds() {
        let mut view = test_view();
        let spec = view.registry().get("id").unwrap().clone();

        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('>')));
        }
        assert_eq!(view.state().size_override("id"), Some(spec.max_size));

        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('<')));
        }
        assert_eq!(view.state().size_override("id"), Some(spec.min_size));

        view.handle_input(key(KeyCode::Char('=')));
        assert_eq!(view.state().size_override("id"), None);
    }

    #[test]
    fn test_resize_ignored_on_fixed_column() {
        let mut view = test_view();
        for _ in 0..4 {
            view.handle_input(key(KeyCode::Char('l')));
        }
        assert_eq!(view.focused_id().as_deref(), Some("registration_date"));

        view.handle_input(key(KeyCode::Char('>')));
        assert_eq!(view.state().size_override("registration_date"), None);
    }

    #[test]
    fn test_pagination_keys() {
        let mut view = test_view();
        assert_eq!(view.row_model().page_count, 2);

        view.handle_input(key(KeyCode::Char(']')));
        assert_eq!(view.state().pagination().page_index, 1);

        // Last page: next is disabled.
        view.handle_input(key(KeyCode::Char(']')));
        assert_eq!(view.state().pagination().page_index, 1);

        view.handle_input(key(KeyCode::Char('[')));
        assert_eq!(view.state().pagination().page_index, 0);

        // First page: prev is disabled.
        view.handle_input(key(KeyCode::Char('[')));
        assert_eq!(view.state().pagination().page_index, 0);
    }

    #[test]
    fn test_actions_bubble_up() {
        let mut view = test_view();
        assert_eq!(
            view.handle_input(key(KeyCode::Char('c'))),
            Some(TableAction::OpenColumnMenu)
        );
        assert_eq!(
            view.handle_input(key(KeyCode::Char('r'))),
            Some(TableAction::RequestReset)
        );
        assert_eq!(
            view.handle_input(key(KeyCode::Char('q'))),
            Some(TableAction::Quit)
        );
    }

    #[test]
    fn test_visibility_toggle_clamps_focus() {
        let mut view = test_view();
        for _ in 0..4 {
            view.handle_input(key(KeyCode::Char('l')));
        }
        assert_eq!(view.focused_id().as_deref(), Some("registration_date"));

        view.apply_column_toggle("registration_date");
        assert_eq!(view.visible_columns().len(), 4);
        assert_eq!(view.focused_id().as_deref(), Some("age"));
    }

    #[test]
    fn test_apply_reset_restores_everything() {
        let mut view = test_view();

        // Scramble: reorder, sort, filter, hide.
        for _ in 0..3 {
            view.handle_input(key(KeyCode::Char('l')));
        }
        view.handle_input(key(KeyCode::Char(' ')));
        for _ in 0..3 {
            view.handle_input(key(KeyCode::Char('h')));
        }
        view.handle_input(key(KeyCode::Char(' ')));
        view.handle_input(key(KeyCode::Char('s')));
        view.state_mut().set_filter("email", "@");
        view.apply_column_toggle("name");

        view.state_mut().set_pending(true);
        view.apply_reset();

        assert_eq!(
            view.state().column_order(),
            ["id", "name", "email", "age", "registration_date"]
        );
        assert!(view.state().sorting().is_empty());
        assert!(!view.state().has_filters());
        assert!(view.state().is_visible("name"));
        assert!(!view.state().is_pending());
        assert_eq!(view.focused_id().as_deref(), Some("id"));
    }

    #[test]
    fn test_visible_id_set() {
        let mut view = test_view();
        view.apply_column_toggle("email");

        let set = view.visible_id_set();
        assert!(!set.contains("email"));
        assert!(set.contains("id"));
        assert_eq!(set.len(), 4);
    }
}
