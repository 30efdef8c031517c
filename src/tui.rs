use anyhow::Result;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use ratatui::{DefaultTerminal, Frame};
use tracing::debug;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::config::config::Config;
use crate::config::key_bindings::{Action, KeyBindings};
use crate::data::datatable::{DataRow, DataValue};
use crate::notifications::NotificationKind;
use crate::status::{ItemStatus, StatusThresholds};
use crate::view_controller::{ConfirmPrompt, TableViewController};

const EVENT_POLL_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Navigating the table
    Table,
    /// Typing in the search box
    Search,
    /// Typing a new item as comma-separated fields
    AddItem,
}

/// Terminal front end. Owns the controller and translates key events into
/// controller operations; all filter/sort/export logic lives below this
/// layer.
pub struct App {
    controller: TableViewController,
    bindings: KeyBindings,
    config: Config,
    search_input: Input,
    add_input: Input,
    mode: Mode,
    selected_row: usize,
    selected_column: usize,
    sort_ascending: bool,
    should_quit: bool,
}

impl App {
    pub fn new(controller: TableViewController, config: Config) -> Self {
        let bindings = KeyBindings::from_config(&config.keybindings);
        Self {
            controller,
            bindings,
            config,
            search_input: Input::default(),
            add_input: Input::default(),
            mode: Mode::Table,
            selected_row: 0,
            selected_column: 0,
            sort_ascending: true,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            if self.controller.tick() {
                self.clamp_selection();
            }

            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(terminal, key)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, terminal: &mut DefaultTerminal, key: KeyEvent) -> Result<()> {
        // The two page-wide shortcuts work in every mode
        if let Some(action) = self.bindings.action_for(&key) {
            if matches!(action, Action::FocusSearch) {
                self.mode = Mode::Search;
                return Ok(());
            }
            if matches!(action, Action::AddItem) {
                self.mode = Mode::AddItem;
                self.add_input = Input::default();
                return Ok(());
            }
        }

        match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::AddItem => self.handle_add_key(key),
            Mode::Table => self.handle_table_key(terminal, key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = Mode::Table;
            }
            _ => {
                let before = self.search_input.value().to_string();
                self.search_input.handle_event(&Event::Key(key));
                if self.search_input.value() != before {
                    // Keyup-equivalent: every edit re-arms the debouncer
                    self.controller
                        .search_input_changed(self.search_input.value());
                }
            }
        }
        Ok(())
    }

    fn handle_add_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Table;
            }
            KeyCode::Enter => {
                self.submit_new_item();
                self.mode = Mode::Table;
            }
            _ => {
                self.add_input.handle_event(&Event::Key(key));
            }
        }
        Ok(())
    }

    fn handle_table_key(&mut self, terminal: &mut DefaultTerminal, key: KeyEvent) -> Result<()> {
        let Some(action) = self.bindings.action_for(&key) else {
            return Ok(());
        };
        debug!("Action: {:?}", action);

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextRow => {
                if self.selected_row + 1 < self.controller.view().row_count() {
                    self.selected_row += 1;
                }
            }
            Action::PreviousRow => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            Action::NextColumn => {
                if self.selected_column + 1 < self.controller.view().column_count() {
                    self.selected_column += 1;
                }
            }
            Action::PreviousColumn => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            Action::SortByColumn => {
                self.sort_ascending = true;
                self.apply_sort();
            }
            Action::ReverseSort => {
                self.sort_ascending = !self.sort_ascending;
                self.apply_sort();
            }
            Action::ExportCsv => {
                let filename = self.config.behavior.default_export_filename.clone();
                let _ = self.controller.export_csv(&filename);
            }
            Action::Print => {
                self.print_inventory(terminal)?;
            }
            Action::DeleteItem => {
                let mut prompt = ModalConfirm { terminal };
                match self.controller.delete_item(&mut prompt, self.selected_row) {
                    Ok(_) => self.clamp_selection(),
                    Err(e) => self
                        .controller
                        .notifications_mut()
                        .error(format!("Delete failed: {}", e)),
                }
            }
            Action::DismissNotifications => {
                self.controller.notifications_mut().dismiss_all();
            }
            Action::FocusSearch | Action::AddItem => {} // handled above
        }
        Ok(())
    }

    fn apply_sort(&mut self) {
        if let Err(e) = self
            .controller
            .sort(self.selected_column, self.sort_ascending)
        {
            self.controller
                .notifications_mut()
                .error(format!("Sort failed: {}", e));
        }
    }

    /// Parse the add-item line as comma-separated fields, pad to the data
    /// columns and derive the trailing Status badge
    fn submit_new_item(&mut self) {
        let line = self.add_input.value().trim().to_string();
        if line.is_empty() {
            return;
        }

        let column_count = self.controller.view().column_count();
        if column_count == 0 {
            return;
        }
        let data_columns = column_count - 1; // trailing Status column

        let mut values: Vec<DataValue> = line
            .split(',')
            .map(|f| DataValue::infer_from_string(f.trim()))
            .collect();
        values.truncate(data_columns);
        while values.len() < data_columns {
            values.push(DataValue::Null);
        }

        let thresholds = StatusThresholds {
            low_stock: self.config.behavior.low_stock_threshold,
            expiry_warning_days: self.config.behavior.expiry_warning_days,
        };
        let view = self.controller.view();
        let expiry_col = view.source().get_column_index("Expiry");
        let qty_col = view.source().get_column_index("Quantity");
        let status = ItemStatus::evaluate(
            expiry_col.and_then(|c| values.get(c)),
            qty_col.and_then(|c| values.get(c)),
            &thresholds,
        );
        values.push(DataValue::String(status.label().to_string()));

        if let Err(e) = self.controller.append_row(DataRow::new(values)) {
            self.controller
                .notifications_mut()
                .error(format!("Add failed: {}", e));
        }
    }

    /// Leave the alternate screen, dump the plain-text inventory to the
    /// terminal's native print path, wait for a key, come back
    fn print_inventory(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let text = self.controller.print_text();

        crossterm::execute!(io::stdout(), LeaveAlternateScreen)?;
        crossterm::terminal::disable_raw_mode()?;
        let mut stdout = io::stdout();
        write!(stdout, "{}\n[press any key to return]\n", text)?;
        stdout.flush()?;
        crossterm::terminal::enable_raw_mode()?;
        let _ = event::read();
        crossterm::execute!(io::stdout(), EnterAlternateScreen)?;
        terminal.clear()?;
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let rows = self.controller.view().row_count();
        if rows == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= rows {
            self.selected_row = rows - 1;
        }
    }

    fn draw(&self, f: &mut Frame) {
        let banner_count = self.controller.notifications().active().len() as u16;
        let layout = Layout::vertical([
            Constraint::Length(banner_count),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

        self.render_notifications(f, layout[0]);
        self.render_input_bar(f, layout[1]);
        self.render_table(f, layout[2]);
        self.render_status_line(f, layout[3]);
    }

    fn render_notifications(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .controller
            .notifications()
            .active()
            .iter()
            .map(|n| {
                let color = match n.kind {
                    NotificationKind::Info => Color::Cyan,
                    NotificationKind::Success => Color::Green,
                    NotificationKind::Warning => Color::Yellow,
                    NotificationKind::Error => Color::Red,
                };
                Line::from(Span::styled(
                    format!(" {} (x to dismiss)", n.message),
                    Style::default().fg(color),
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_input_bar(&self, f: &mut Frame, area: Rect) {
        let (title, input, active) = match self.mode {
            Mode::AddItem => ("Add item (Name, Category, Quantity, Unit, Expiry)", &self.add_input, true),
            Mode::Search => ("Search (Esc to table)", &self.search_input, true),
            Mode::Table => ("Search (Ctrl+S to focus)", &self.search_input, false),
        };

        let style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(input.value())
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(widget, area);

        if active {
            let cursor_x = area.x + 1 + input.visual_cursor() as u16;
            f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_table(&self, f: &mut Frame, area: Rect) {
        let view = self.controller.view();
        let headers = view.column_names();

        let mut header_cells: Vec<Cell> = Vec::new();
        if self.config.display.show_row_numbers {
            header_cells.push(Cell::from("#"));
        }
        for (i, h) in headers.iter().enumerate() {
            let mut text = h.clone();
            if let Some(sort) = view.sort_key() {
                if sort.column == i {
                    text.push_str(if sort.ascending { " ^" } else { " v" });
                }
            }
            let style = if i == self.selected_column {
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            header_cells.push(Cell::from(text).style(style));
        }

        let status_col = headers.len().saturating_sub(1);
        let rows: Vec<Row> = if view.empty_state() {
            vec![Row::new(vec![Cell::from("No items found")
                .style(Style::default().fg(Color::DarkGray))])]
        } else {
            (0..view.row_count())
                .filter_map(|i| view.get_row(i).map(|r| (i, r)))
                .map(|(i, row)| {
                    let mut cells: Vec<Cell> = Vec::new();
                    if self.config.display.show_row_numbers {
                        cells.push(Cell::from(format!("{}", i + 1)));
                    }
                    for (c, value) in row.values.iter().enumerate() {
                        let text = value.to_string();
                        let style = if c == status_col && self.config.display.badge_colors {
                            Style::default().fg(badge_color(&text))
                        } else {
                            Style::default()
                        };
                        cells.push(Cell::from(text).style(style));
                    }
                    Row::new(cells)
                })
                .collect()
        };

        let mut constraints: Vec<Constraint> = Vec::new();
        if self.config.display.show_row_numbers {
            constraints.push(Constraint::Length(5));
        }
        constraints.extend(headers.iter().map(|_| Constraint::Min(10)));

        let table = Table::new(rows, constraints)
            .header(Row::new(header_cells).height(1))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Inventory - {}", self.controller.item_count_label())),
            );

        let mut state = TableState::default();
        if !view.empty_state() && view.row_count() > 0 {
            state.select(Some(self.selected_row));
        }
        f.render_stateful_widget(table, area, &mut state);
    }

    fn render_status_line(&self, f: &mut Frame, area: Rect) {
        let hint = match self.mode {
            Mode::Table => "q quit | Ctrl+S search | Ctrl+A add | s/r sort | e export | p print | d delete",
            Mode::Search => "typing filters after a short pause | Esc back",
            Mode::AddItem => "Enter to add | Esc to cancel",
        };
        let status = Paragraph::new(format!(
            " {} | {}",
            self.controller.item_count_label(),
            hint
        ))
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(status, area);
    }
}

fn badge_color(label: &str) -> Color {
    match label {
        "Expired" => Color::Red,
        "Expiring" => Color::Yellow,
        "Low Stock" => Color::Cyan,
        _ => Color::Green,
    }
}

/// Blocking confirm dialog. Suspends all other event handling until the
/// user answers, which is acceptable in this single-threaded event loop.
struct ModalConfirm<'a> {
    terminal: &'a mut DefaultTerminal,
}

impl ConfirmPrompt for ModalConfirm<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        loop {
            let draw = self.terminal.draw(|f| render_confirm_dialog(f, message));
            if draw.is_err() {
                return false;
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return false
                    }
                    _ => {}
                },
                Err(_) => return false,
                _ => {}
            }
        }
    }
}

fn render_confirm_dialog(f: &mut Frame, message: &str) {
    let area = f.area();
    let width = (message.len() as u16 + 6).min(area.width).max(20);
    let dialog = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(5) / 2,
        width,
        height: 5.min(area.height),
    };

    f.render_widget(Clear, dialog);
    let body = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "y/Enter confirm - n/Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm delete"),
    );
    f.render_widget(body, dialog);
}
