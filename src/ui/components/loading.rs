//! Loading indicator component.
//!
//! A small animated spinner shown while the synthetic data set is being
//! prepared on startup.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    frame: usize,
    /// Whether the loading indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    /// Create a new loading indicator.
    pub fn new() -> Self {
        Self {
            message: "Loading...".to_string(),
            frame: 0,
            active: false,
        }
    }

    /// Create a loading indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frame: 0,
            active: false,
        }
    }

    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Start the animation.
    pub fn start(&mut self) {
        self.active = true;
        self.frame = 0;
    }

    /// Stop the animation.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Whether the indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Render the spinner centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }
        let text = format!("{} {}", SPINNER_FRAMES[self.frame], self.message);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(theme().highlight))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
