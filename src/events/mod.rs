//! Event handling for the application.
//!
//! All state mutation happens as a synchronous reaction to one of these
//! events on the main thread; ordering between events is the order they
//! are dispatched.

mod handler;
mod keys;

pub use handler::EventHandler;
pub use keys::KeyBindings;

use crossterm::event::KeyEvent;

/// An application-level event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized to (width, height).
    Resize(u16, u16),
    /// Periodic tick for animations and deferred work.
    Tick,
    /// The application was asked to quit.
    Quit,
}
