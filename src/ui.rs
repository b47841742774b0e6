use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style as RatStyle,
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table as RatatuiTable},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Message};
use crate::mode::Mode;
use crate::table::{ColumnHeader, Table};

const MAX_COL_WIDTH: usize = 40;

fn header_text(header: &ColumnHeader) -> String {
    format!("{} {}", header.label, header.indicator.glyph())
}

/// Display width for each visible column, capped at MAX_COL_WIDTH
fn column_widths(table: &Table, visible: &[usize]) -> Vec<u16> {
    visible
        .iter()
        .map(|&col| {
            let header = UnicodeWidthStr::width(header_text(&table.header[col]).as_str());
            let content = table
                .displayed_rows()
                .filter_map(|row| row.text(col))
                .map(UnicodeWidthStr::width)
                .max()
                .unwrap_or(0);
            header.max(content).clamp(3, MAX_COL_WIDTH) as u16
        })
        .collect()
}

pub fn render(frame: &mut Frame, app: &mut App) {
    if let Some(bg) = app.style.background() {
        frame.render_widget(Block::default().style(RatStyle::default().bg(bg)), frame.size());
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_column_bar(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
    render_command_line(frame, app, chunks[3]);
}

/// One entry per column, including hidden ones, so hidden columns can be brought back
fn render_column_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::with_capacity(app.view.table.col_count() * 2);
    for (col, header) in app.view.table.header.iter().enumerate() {
        let hidden = app.view.table.is_column_hidden(col);
        let mark = if hidden { " " } else { "x" };
        let style = if col == app.view.cursor_col {
            app.style.header(header.active, true)
        } else if hidden {
            app.style.column_hidden()
        } else {
            app.style.header(header.active, false)
        };
        spans.push(Span::styled(format!("[{}] {}", mark, header_text(header)), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    // header row takes one line
    app.view.viewport_height = area.height.saturating_sub(1).max(1) as usize;
    app.view.scroll_to_cursor();

    let table = &app.view.table;
    let visible = table.visible_columns();
    if visible.is_empty() {
        let msg = Paragraph::new("All columns hidden").style(app.style.column_hidden());
        frame.render_widget(msg, area);
        return;
    }

    let widths = column_widths(table, &visible);

    let header_cells: Vec<Cell> = visible
        .iter()
        .map(|&col| {
            let header = &table.header[col];
            Cell::from(header_text(header))
                .style(app.style.header(header.active, col == app.view.cursor_col))
        })
        .collect();

    let rows: Vec<Row> = table
        .displayed_rows()
        .enumerate()
        .skip(app.view.viewport_row)
        .take(app.view.viewport_height)
        .map(|(idx, row)| {
            let cells: Vec<Cell> = visible
                .iter()
                .map(|&col| {
                    let style = if idx == app.view.cursor_row && col == app.view.cursor_col {
                        app.style.cell_cursor()
                    } else {
                        app.style.cell()
                    };
                    Cell::from(row.text(col).unwrap_or("").to_string()).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let constraints: Vec<Constraint> = widths.iter().map(|&w| Constraint::Length(w)).collect();
    let widget = RatatuiTable::new(rows, constraints)
        .header(Row::new(header_cells))
        .column_spacing(2);

    frame.render_widget(widget, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.view.table;
    let mut spans = vec![
        Span::styled(format!(" {} ", app.mode.display_name()), app.style.status_mode(app.mode)),
        Span::styled(format!(" {} ", app.file_name), app.style.status_bar()),
        Span::styled(
            format!(" {}/{} rows ", table.displayed_count(), table.row_count()),
            app.style.status_bar(),
        ),
    ];

    if !app.view.query.is_empty() {
        spans.push(Span::styled(
            format!(" Filtered ({}) ", app.view.query),
            app.style.filter_status(),
        ));
    }

    let used: usize = spans.iter().map(|s| s.width()).sum();
    let glyph = format!(" {} ", app.theme.glyph());
    let pad = (area.width as usize).saturating_sub(used + UnicodeWidthStr::width(glyph.as_str()));
    spans.push(Span::styled(" ".repeat(pad), app.style.status_bar()));
    spans.push(Span::styled(glyph, app.style.status_bar()));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(app.style.status_bar()), area);
}

fn render_command_line(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.mode {
        Mode::Filter => {
            let text = format!("/{}", app.filter_buffer());
            frame.set_cursor(area.x + UnicodeWidthStr::width(text.as_str()) as u16, area.y);
            Line::from(Span::styled(text, app.style.command_line()))
        }
        Mode::Normal => match &app.message {
            Some(msg) => {
                let style = match msg {
                    Message::Warning(_) => app.style.message_warning(),
                    Message::Info(_) => app.style.message_info(),
                };
                Line::from(Span::styled(msg.text().to_string(), style))
            }
            None => {
                let k = app.keys();
                Line::from(Span::styled(
                    format!(
                        "{} filter  {} sort  {} hide/show column  {} theme  {} quit",
                        k.filter, k.sort, k.toggle_column, k.toggle_theme, k.quit
                    ),
                    app.style.message_info(),
                ))
            }
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}
