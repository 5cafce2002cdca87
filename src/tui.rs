//! Full-screen task list for Ticklist
//!
//! Provides the interactive view of the board:
//! - Add, toggle and delete tasks
//! - Switch between All / Active / Completed
//! - Clear completed tasks
//! - Browse and clear the deletion history
//!
//! The UI holds no task state of its own. After every action it re-queries
//! the board and redraws from scratch.

use crate::board::TaskBoard;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::history::HistoryEntry;
use crate::task::{Task, TaskFilter};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

/// What the keyboard currently drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Moving through the task list
    Browse,
    /// Typing a new task
    Input,
    /// Looking at deleted tasks
    History,
    /// Waiting for y/n before clearing history
    ConfirmClearHistory,
}

/// Board UI state
pub struct BoardUI<'a> {
    board: &'a TaskBoard,
    filter: TaskFilter,
    /// Tasks visible under the current filter
    tasks: Vec<Task>,
    /// History snapshot, loaded when the history view opens
    history: Vec<HistoryEntry>,
    selected: usize,
    list_state: ListState,
    history_state: ListState,
    input: String,
    mode: Mode,
    status: Option<String>,
    running: bool,
    show_help: bool,
    date_format: String,
    confirm_clear_history: bool,
}

impl<'a> BoardUI<'a> {
    pub fn new(board: &'a TaskBoard, config: &Config) -> Self {
        let mut ui = Self {
            board,
            filter: config.ui.default_filter,
            tasks: Vec::new(),
            history: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            history_state: ListState::default(),
            input: String::new(),
            mode: Mode::Browse,
            status: None,
            running: true,
            show_help: false,
            date_format: config.history.date_format.clone(),
            confirm_clear_history: config.ui.confirm_clear_history,
        };
        ui.refresh();
        ui
    }

    /// Re-read the board and keep the selection in range
    fn refresh(&mut self) {
        self.tasks = self.board.tasks(self.filter);
        if self.tasks.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.tasks.len() - 1);
            self.list_state.select(Some(self.selected));
        }

        if matches!(self.mode, Mode::History | Mode::ConfirmClearHistory) {
            self.history = self.board.history();
            self.history_state
                .select(if self.history.is_empty() { None } else { Some(0) });
        }
    }

    /// Show the outcome of an action in the status line
    fn report(&mut self, outcome: Result<String>) {
        self.status = Some(match outcome {
            Ok(message) => message,
            Err(e) => format!("{}", e),
        });
        self.refresh();
    }

    fn current_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.selected = 0;
        self.refresh();
    }

    fn select_previous(&mut self) {
        if !self.tasks.is_empty() {
            self.selected = self.selected.saturating_sub(1);
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_next(&mut self) {
        if !self.tasks.is_empty() {
            self.selected = (self.selected + 1).min(self.tasks.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        let outcome = self.board.add_task(&text).map(|task| format!("Added \"{}\"", task.text));
        // Stay in input mode when the text was rejected so it can be retyped
        if !matches!(outcome, Err(Error::Validation { .. })) {
            self.mode = Mode::Browse;
        }
        self.report(outcome);
    }

    fn toggle_current(&mut self) {
        if let Some(id) = self.current_task().map(|task| task.id) {
            let outcome = self.board.toggle_task(id).map(|task| {
                if task.completed {
                    format!("Completed \"{}\"", task.text)
                } else {
                    format!("Reopened \"{}\"", task.text)
                }
            });
            self.report(outcome);
        }
    }

    fn delete_current(&mut self) {
        if let Some(id) = self.current_task().map(|task| task.id) {
            let outcome = self
                .board
                .delete_task(id)
                .map(|(task, _)| format!("Deleted \"{}\"", task.text));
            self.report(outcome);
        }
    }

    fn clear_completed(&mut self) {
        let outcome = self
            .board
            .clear_completed()
            .map(|removed| format!("Cleared {} completed task(s)", removed.len()));
        self.report(outcome);
    }

    fn open_history(&mut self) {
        self.mode = Mode::History;
        self.status = None;
        self.refresh();
    }

    fn clear_history(&mut self) {
        self.mode = Mode::History;
        let outcome = self.board.clear_history().map(|_| "History cleared".to_string());
        self.report(outcome);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        match self.mode {
            Mode::Input => match key.code {
                KeyCode::Enter => self.submit_input(),
                KeyCode::Esc => {
                    self.input.clear();
                    self.mode = Mode::Browse;
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            },
            Mode::History => match key.code {
                KeyCode::Char('x') => {
                    if self.confirm_clear_history {
                        self.mode = Mode::ConfirmClearHistory;
                    } else {
                        self.clear_history();
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    let current = self.history_state.selected().unwrap_or(0);
                    self.history_state.select(Some(current.saturating_sub(1)));
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if !self.history.is_empty() {
                        let current = self.history_state.selected().unwrap_or(0);
                        self.history_state
                            .select(Some((current + 1).min(self.history.len() - 1)));
                    }
                }
                KeyCode::Char('h') | KeyCode::Char('q') | KeyCode::Esc => {
                    self.mode = Mode::Browse;
                }
                _ => {}
            },
            Mode::ConfirmClearHistory => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.clear_history(),
                _ => {
                    self.mode = Mode::History;
                    self.status = Some("History kept".to_string());
                }
            },
            Mode::Browse => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('?') | KeyCode::F(1) => {
                    self.show_help = !self.show_help;
                }
                KeyCode::Char('a') | KeyCode::Char('i') => {
                    self.mode = Mode::Input;
                    self.status = None;
                }
                KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current(),
                KeyCode::Char('d') | KeyCode::Delete => self.delete_current(),
                KeyCode::Char('c') => self.clear_completed(),
                KeyCode::Tab => self.set_filter(self.filter.cycle()),
                KeyCode::Char('1') => self.set_filter(TaskFilter::All),
                KeyCode::Char('2') => self.set_filter(TaskFilter::Active),
                KeyCode::Char('3') => self.set_filter(TaskFilter::Completed),
                KeyCode::Char('h') => self.open_history(),
                _ => {}
            },
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Filters or input
                Constraint::Min(5),    // List
                Constraint::Length(if self.show_help { 12 } else { 3 }), // Status or help
            ])
            .split(frame.area());

        // Header
        let active = self.board.count(TaskFilter::Active);
        let header = Paragraph::new(format!(
            "{}    {} tasks",
            Local::now().format("%A, %B %-d, %Y"),
            active
        ))
        .block(Block::default().borders(Borders::ALL).title("Ticklist"))
        .style(Style::default().fg(Color::Cyan));
        frame.render_widget(header, chunks[0]);

        // Filter tabs, or the text box while typing
        if self.mode == Mode::Input {
            let input = Paragraph::new(self.input.as_str())
                .block(Block::default().borders(Borders::ALL).title("New task (Enter to add, Esc to cancel)"))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(input, chunks[1]);
        } else {
            let spans: Vec<Span> = TaskFilter::ALL
                .iter()
                .enumerate()
                .flat_map(|(i, filter)| {
                    let style = if *filter == self.filter {
                        Style::default().fg(Color::Black).bg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    [
                        Span::styled(format!(" {} {} ", i + 1, filter), style),
                        Span::raw(" "),
                    ]
                })
                .collect();
            let filters = Paragraph::new(Line::from(spans))
                .block(Block::default().borders(Borders::ALL).title("Filter"));
            frame.render_widget(filters, chunks[1]);
        }

        if matches!(self.mode, Mode::History | Mode::ConfirmClearHistory) {
            self.render_history(frame, chunks[2]);
        } else {
            self.render_tasks(frame, chunks[2]);
        }

        // Status or help
        if self.show_help {
            let help_text = vec![
                "Keybindings:",
                "",
                "  a/i         - Add a task",
                "  ↑/k ↓/j     - Move",
                "  Space/Enter - Toggle completed",
                "  d/Delete    - Delete (kept in history)",
                "  c           - Clear completed",
                "  Tab/1/2/3   - Switch filter",
                "  h           - History (x clears)",
                "  q/Esc       - Quit",
            ];
            let help = Paragraph::new(help_text.join("\n"))
                .block(Block::default().borders(Borders::ALL).title("Help"))
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: false });
            frame.render_widget(help, chunks[3]);
        } else {
            let line = match self.mode {
                Mode::ConfirmClearHistory => "Clear the whole history? (y/N)".to_string(),
                _ => self
                    .status
                    .clone()
                    .unwrap_or_else(|| "Press ? for help".to_string()),
            };
            let status = Paragraph::new(line)
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::Green));
            frame.render_widget(status, chunks[3]);
        }
    }

    fn render_tasks(&mut self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let items: Vec<ListItem> = self
            .tasks
            .iter()
            .map(|task| {
                let style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", task.marker()), Style::default().fg(Color::Green)),
                    Span::styled(task.text.as_str(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Tasks"))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_history(&mut self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("History (x to clear, h to go back)");

        if self.history.is_empty() {
            let empty = Paragraph::new("No history")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .history
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.formatted_deleted_at(&self.date_format)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(entry.text.as_str(), Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, area, &mut self.history_state);
    }
}

/// Run the board UI until the user quits
pub fn run_board_ui(board: &TaskBoard, config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ui = BoardUI::new(board, config);

    // Main event loop
    let result = (|| -> Result<()> {
        while ui.running {
            terminal.draw(|f| ui.render(f))?;

            if event::poll(std::time::Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        ui.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    })();

    // Always restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
