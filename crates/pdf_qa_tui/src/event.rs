//! Key polling: reads crossterm events, maps Ctrl+Q to Quit, passes the rest
//! through for the active view to interpret.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One application event per poll.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Quit,
    Key(KeyEvent),
}

pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Poll the terminal for up to 100ms; returns None when nothing happened.
    pub fn poll(&self) -> anyhow::Result<Option<AppEvent>> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('q')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(Some(AppEvent::Quit));
                    }
                    return Ok(Some(AppEvent::Key(key)));
                }
            }
        }
        Ok(None)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
