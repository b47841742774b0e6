use crossterm::event::{KeyCode, KeyEvent};

use crate::input::{is_escape, KeyResult};

/// Line editor for the filter query. Every edit is reported so the filter runs per keystroke.
pub struct FilterHandler {
    pub buffer: String,
    /// Query in effect before the current edit session, restored on escape
    previous: String,
}

impl FilterHandler {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            previous: String::new(),
        }
    }

    pub fn start(&mut self, current_query: &str) {
        self.previous = current_query.to_string();
        self.buffer = current_query.to_string();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if is_escape(key) {
            self.buffer = std::mem::take(&mut self.previous);
            return KeyResult::Finish(Some(self.buffer.clone()));
        }

        match key.code {
            KeyCode::Enter => KeyResult::Finish(None),
            KeyCode::Backspace => {
                if self.buffer.pop().is_some() {
                    KeyResult::Changed(self.buffer.clone())
                } else {
                    KeyResult::Continue
                }
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                KeyResult::Changed(self.buffer.clone())
            }
            _ => KeyResult::Continue,
        }
    }
}
