//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for
//! predictable state management in the TUI application.

use tracing::{debug, info, trace};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::config::Config;
use crate::data::Person;
use crate::events::{Event, KeyBindings};
use crate::ui::{
    theme::theme, ColumnMenu, ColumnMenuAction, ColumnMenuItem, LoadingIndicator,
    NotificationManager, TableAction, TableView,
};

/// The current view/screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Application is preparing the data set.
    #[default]
    Loading,
    /// Displaying the interactive table.
    Table,
    /// Help screen is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// The interactive table view.
    table_view: TableView,
    /// Column visibility popup.
    column_menu: ColumnMenu,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    /// Startup loading indicator.
    loading: LoadingIndicator,
}

impl App {
    /// Create a new application instance around the generated records.
    pub fn new(config: Config, records: Vec<Person>) -> Self {
        debug!(records = records.len(), "Creating application instance");

        let keys = KeyBindings::new(config.settings.vim_mode);
        let table_view = TableView::new(
            crate::data::person_columns(),
            records,
            config.settings.page_size,
            keys,
        );

        let mut loading = LoadingIndicator::with_message("Preparing records...");
        loading.start();

        Self {
            state: AppState::Loading,
            should_quit: false,
            table_view,
            column_menu: ColumnMenu::new(),
            notifications: NotificationManager::new(),
            loading,
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Get a reference to the table view.
    pub fn table_view(&self) -> &TableView {
        &self.table_view
    }

    /// Get a mutable reference to the table view.
    pub fn table_view_mut(&mut self) -> &mut TableView {
        &mut self.table_view
    }

    /// Get a reference to the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Check if the column menu is open.
    pub fn is_column_menu_open(&self) -> bool {
        self.column_menu.is_visible()
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    /// All state changes flow through this method for predictable behavior.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
                self.state = AppState::Exiting;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => {
                self.handle_tick();
            }
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        // The column menu blocks other input while visible.
        if self.column_menu.is_visible() {
            if let Some(action) = self.column_menu.handle_input(key_event) {
                match action {
                    ColumnMenuAction::Toggle(id) => {
                        debug!(column = %id, "Visibility toggled");
                        self.table_view.apply_column_toggle(&id);
                        self.column_menu
                            .set_checked(self.table_view.visible_id_set());
                    }
                    ColumnMenuAction::Close => {
                        debug!("Column menu closed");
                    }
                }
            }
            return;
        }

        // Global key bindings (always available)
        match (key_event.code, key_event.modifiers) {
            // Quit on Ctrl+C (always works)
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                self.state = AppState::Exiting;
                return;
            }
            // Help on '?' unless the filter editor is consuming keys
            (KeyCode::Char('?'), KeyModifiers::NONE)
                if self.state != AppState::Help && !self.table_view.is_filtering() =>
            {
                self.state = AppState::Help;
                return;
            }
            _ => {}
        }

        // State-specific key handling
        match self.state {
            AppState::Loading | AppState::Table => {
                if let Some(action) = self.table_view.handle_input(key_event) {
                    match action {
                        TableAction::OpenColumnMenu => self.open_column_menu(),
                        TableAction::RequestReset => self.request_reset(),
                        TableAction::Quit => {
                            self.should_quit = true;
                            self.state = AppState::Exiting;
                        }
                    }
                }
            }
            AppState::Help => {
                if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('q'))
                    || key_event.code == KeyCode::Char('?')
                {
                    self.state = AppState::Table;
                }
            }
            AppState::Exiting => {
                // No input handling while exiting
            }
        }
    }

    /// Open the column visibility menu over the table.
    fn open_column_menu(&mut self) {
        let items: Vec<ColumnMenuItem> = self
            .table_view
            .registry()
            .iter()
            .filter(|spec| spec.hideable)
            .map(|spec| ColumnMenuItem::new(spec.id.clone(), spec.label.clone()))
            .collect();

        if items.is_empty() {
            self.notifications.warning("No hideable columns");
            return;
        }

        debug!("Opening column menu");
        self.column_menu
            .open(items, self.table_view.visible_id_set());
    }

    /// Ask for a reset of order, sorting, filters, and visibility.
    ///
    /// The actual restore is deferred to the next tick so already-queued
    /// input renders first; the pending flag suppresses re-entrant
    /// requests until the restore has been applied.
    fn request_reset(&mut self) {
        if self.table_view.state().is_pending() {
            debug!("Reset already pending, request suppressed");
            return;
        }
        info!("Reset requested");
        self.table_view.state_mut().set_pending(true);
    }

    /// Handle periodic tick events.
    fn handle_tick(&mut self) {
        self.loading.tick();
        self.notifications.tick();

        // Apply a deferred reset in one step.
        if self.table_view.state().is_pending() {
            self.table_view.apply_reset();
            self.notifications.success("Table reset to defaults");
        }

        // The data set is ready by the first tick.
        if self.state == AppState::Loading {
            debug!("Transitioning from Loading to Table");
            self.state = AppState::Table;
            self.loading.stop();
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    /// The view is a pure function of the current state.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer/Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);

        // Popups render on top of everything.
        self.notifications.render(frame, area);
        self.column_menu.render(frame, area);
    }

    /// Render the application header.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = theme();
        let title = Paragraph::new("Tabula")
            .style(Style::default().fg(theme.header))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(theme.border)),
            );
        frame.render_widget(title, area);
    }

    /// Render the main content area based on current state.
    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        match self.state {
            AppState::Loading => {
                self.loading.render(frame, area);
            }
            AppState::Table => {
                self.table_view.render(frame, area);
            }
            AppState::Help => {
                let paragraph = Paragraph::new(self.render_help_view())
                    .alignment(Alignment::Center);
                frame.render_widget(paragraph, area);
            }
            AppState::Exiting => {
                let paragraph = Paragraph::new(self.render_exiting_view())
                    .alignment(Alignment::Center);
                frame.render_widget(paragraph, area);
            }
        }
    }

    /// Render the footer/status bar.
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        match self.state {
            AppState::Table => {
                self.table_view.render_status_bar(frame, area);
            }
            _ => {
                let theme = theme();
                let hint = match self.state {
                    AppState::Loading => "Loading...",
                    AppState::Help => "Press Esc or q to close help",
                    AppState::Exiting => "Exiting...",
                    AppState::Table => "",
                };
                let footer = Paragraph::new(hint).style(Style::default().fg(theme.muted));
                frame.render_widget(footer, area);
            }
        }
    }

    /// Render help view content.
    fn render_help_view(&self) -> Vec<Line<'static>> {
        let theme = theme();
        vec![
            Line::raw(""),
            Line::styled("Help", Style::default().fg(theme.header)),
            Line::raw(""),
            Line::styled("Global:", Style::default().fg(Color::Yellow)),
            Line::raw("  Ctrl+C  - Quit application"),
            Line::raw("  ?       - Show this help"),
            Line::raw("  q       - Quit application"),
            Line::raw(""),
            Line::styled("Table:", Style::default().fg(Color::Yellow)),
            Line::raw("  h / ←   - Focus column to the left"),
            Line::raw("  l / →   - Focus column to the right"),
            Line::raw("  s       - Cycle sort on focused column"),
            Line::raw("  /       - Edit filter for focused column"),
            Line::raw("  Space   - Grab focused column to move it"),
            Line::raw("  < / >   - Shrink / grow focused column"),
            Line::raw("  =       - Reset focused column width"),
            Line::raw("  c       - Toggle column visibility"),
            Line::raw("  r       - Reset order, sort, filters, visibility"),
            Line::raw("  [ / ]   - Previous / next page"),
            Line::raw(""),
            Line::styled("While moving a column:", Style::default().fg(Color::Yellow)),
            Line::raw("  h / l   - Choose the drop position"),
            Line::raw("  Space   - Drop the column"),
            Line::raw("  Esc     - Cancel the move"),
            Line::raw(""),
            Line::styled(
                "Press Esc or q to close this help screen",
                Style::default().fg(theme.muted),
            ),
        ]
    }

    /// Render exiting view content.
    fn render_exiting_view(&self) -> Vec<Line<'static>> {
        vec![
            Line::raw(""),
            Line::styled("Goodbye!", Style::default().fg(Color::Green)),
        ]
    }
}
