use std::io;
use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::config::{AppConfig, KeyBindings};
use crate::input::{normal_action, Action, KeyResult};
use crate::mode::filter::FilterHandler;
use crate::mode::Mode;
use crate::style::Style;
use crate::table::{SortDirection, Table, TableView};
use crate::theme::{ColorSchemeProbe, PreferenceStore, ThemeControl};
use crate::ui;

/// Line shown under the status bar until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Warning(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Message::Info(s) | Message::Warning(s) => s,
        }
    }
}

pub struct App {
    pub view: TableView,
    pub style: Style,
    pub theme: ThemeControl,
    pub mode: Mode,
    pub message: Option<Message>,
    pub file_name: String,
    pub should_quit: bool,
    store: Box<dyn PreferenceStore>,
    keys: KeyBindings,
    filter_handler: FilterHandler,
}

impl App {
    pub fn new(
        table: Table,
        file_name: String,
        config: &AppConfig,
        store: Box<dyn PreferenceStore>,
        probe: &dyn ColorSchemeProbe,
    ) -> Self {
        let theme = ThemeControl::init_theme(&*store, probe);
        let style = Style::new(theme.mode(), &config.palette);

        Self {
            view: TableView::new(table),
            style,
            theme,
            mode: Mode::Normal,
            message: None,
            file_name,
            should_quit: false,
            store,
            keys: config.keys.clone(),
            filter_handler: FilterHandler::new(),
        }
    }

    pub fn filter_buffer(&self) -> &str {
        &self.filter_handler.buffer
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| ui::render(f, self))?;

            if poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.message = None;
                        self.handle_key(key);
                    }
                }
            }
        }
        info!("quitting");
        Ok(())
    }

    // === Key handling ===

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => {
                if let Some(action) = normal_action(key, &self.keys) {
                    self.execute(action);
                }
            }
            Mode::Filter => self.handle_filter_mode(key),
        }
    }

    fn handle_filter_mode(&mut self, key: KeyEvent) {
        match self.filter_handler.handle_key(key) {
            KeyResult::Continue => {}
            KeyResult::Changed(query) => self.filter(&query),
            KeyResult::Finish(restore) => {
                if let Some(query) = restore {
                    self.filter(&query);
                }
                self.mode = Mode::Normal;
            }
        }
    }

    fn filter(&mut self, query: &str) {
        let shown = self.view.apply_filter(query);
        if shown == 0 && !query.is_empty() {
            self.message = Some(Message::Warning(format!("No rows match: {}", query)));
        }
    }

    pub fn execute(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::StartFilter => {
                self.filter_handler.start(&self.view.query);
                self.mode = Mode::Filter;
            }
            Action::ClearFilter => {
                if !self.view.query.is_empty() {
                    self.filter_handler.buffer.clear();
                    self.filter("");
                }
            }
            Action::SortColumn => match self.view.sort_cursor_column() {
                Ok(direction) => {
                    let label = self.column_label(self.view.cursor_col);
                    let dir = match direction {
                        SortDirection::Ascending => "ascending",
                        SortDirection::Descending => "descending",
                    };
                    self.message = Some(Message::Info(format!("Sorted by {} ({})", label, dir)));
                }
                Err(e) => self.report(e),
            },
            Action::ToggleColumn => match self.view.toggle_cursor_column() {
                Ok(hidden) => {
                    let label = self.column_label(self.view.cursor_col);
                    let state = if hidden { "hidden" } else { "shown" };
                    self.message = Some(Message::Info(format!("Column {} {}", label, state)));
                }
                Err(e) => self.report(e),
            },
            Action::ToggleTheme => {
                let mode = self.theme.toggle_theme(&mut *self.store);
                self.style.set_mode(mode);
            }
            Action::MoveLeft => self.view.move_left(),
            Action::MoveRight => self.view.move_right(),
            Action::MoveUp => self.view.move_up(),
            Action::MoveDown => self.view.move_down(),
        }
    }

    fn column_label(&self, col: usize) -> String {
        self.view.table.header.get(col).map(|h| h.label.clone()).unwrap_or_default()
    }

    fn report(&mut self, e: impl std::error::Error) {
        warn!(error = %e, "table operation rejected");
        self.message = Some(Message::Warning(e.to_string()));
    }
}
