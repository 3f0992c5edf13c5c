//! Table view: ratatui front end over a roster session
//!
//! Normal mode keys: `e`/`:` command line, `a` add, `s` save, `r` reload,
//! ←/→ (PgUp/PgDn) page, `q`/Esc quit. Command line input is parsed by
//! [`Command`].

use crate::command::{Command, HELP};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use roster_client::{
    Employee, EmployeeRow, EmployeeStore, Pagination, RosterEvent, RosterSession, SaveMode,
    SchedulerState,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Session data needed to draw one frame
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub mode: SaveMode,
    pub rows: Vec<EmployeeRow>,
    pub new_rows: Vec<Employee>,
    pub pagination: Pagination,
    pub total_rows: usize,
    pub autosave: SchedulerState,
    pub quiet_period: Option<Duration>,
}

impl Snapshot {
    async fn capture<S: EmployeeStore + 'static>(session: &RosterSession<S>) -> Self {
        Self {
            mode: session.save_mode(),
            rows: session.page_rows().await,
            new_rows: session.new_rows().await,
            pagination: session.pagination(),
            total_rows: session.total_rows().await,
            autosave: session.scheduler_state(),
            quiet_period: session.quiet_period(),
        }
    }
}

struct App {
    /// Command line state
    input: Input,
    input_mode: InputMode,
    snapshot: Snapshot,
    /// Last outcome shown under the table
    message: String,
}

impl App {
    fn on_event(&mut self, event: RosterEvent) {
        match event {
            RosterEvent::Loaded { rows } => self.message = format!("loaded {rows} rows"),
            RosterEvent::Saved {
                created,
                updated,
                deleted,
            } => {
                self.message =
                    format!("saved: {created} created, {updated} updated, {deleted} deleted")
            }
            RosterEvent::FetchFailed { message } | RosterEvent::SaveFailed { message } => {
                self.message = format!("! {message}")
            }
            RosterEvent::Changed | RosterEvent::PageChanged { .. } => {}
        }
    }
}

/// Roster rows as a table: page rows first, then unsaved new rows
pub fn roster_table(snapshot: &Snapshot) -> Table<'static> {
    let header = Row::new(["#", "First Name", "Last Name", "Branch"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let page_rows = snapshot.rows.iter().enumerate().map(|(i, row)| {
        let (marker, style) = if row.is_changed {
            ("*", Style::default().fg(Color::Yellow))
        } else {
            ("", Style::default())
        };
        employee_row(format!("{}{marker}", i + 1), &row.employee).style(style)
    });
    let new_rows = snapshot.new_rows.iter().enumerate().map(|(i, employee)| {
        employee_row(format!("{}+", i + 1), employee).style(Style::default().fg(Color::Green))
    });

    let title = match snapshot.mode {
        SaveMode::Manual => " Employee Table ",
        SaveMode::Autosave => " Autosave Employee Table ",
    };

    Table::new(
        page_rows.chain(new_rows).collect::<Vec<_>>(),
        [
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
}

fn employee_row(number: String, employee: &Employee) -> Row<'static> {
    Row::new(vec![
        Cell::from(number),
        Cell::from(employee.first_name.clone()),
        Cell::from(employee.last_name.clone()),
        Cell::from(employee.branch.clone()),
    ])
}

/// Pagination and autosave status line
pub fn status_line(snapshot: &Snapshot) -> Line<'static> {
    let pages = snapshot.pagination.page_count(snapshot.total_rows).max(1);
    let mut spans = vec![Span::raw(format!(
        "page {}/{} · {} per page · {} rows",
        snapshot.pagination.page + 1,
        pages,
        snapshot.pagination.page_size,
        snapshot.total_rows
    ))];
    if snapshot.autosave == SchedulerState::Armed {
        let quiet = snapshot.quiet_period.map_or(0, |d| d.as_secs());
        spans.push(Span::styled(
            format!(" · autosave pending ({quiet}s quiet period)"),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Table
            Constraint::Length(4), // Status
            Constraint::Length(8), // Logs
            Constraint::Length(3), // Input
        ])
        .split(f.area());

    f.render_widget(roster_table(&app.snapshot), chunks[0]);

    let status = Paragraph::new(vec![
        status_line(&app.snapshot),
        Line::from(Span::styled(
            app.message.clone(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().title(" Status ").borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logs, chunks[2]);

    let (title, style) = match app.input_mode {
        InputMode::Normal => (
            " e: command · a: add · s: save · r: reload · ←/→: page · q: quit ",
            Style::default().fg(Color::Gray),
        ),
        InputMode::Editing => (
            " Command (help, Enter to run, Esc to leave) ",
            Style::default().fg(Color::Yellow),
        ),
    };
    let width = chunks[3].width.max(3) - 3;
    let scroll = app.input.visual_scroll(width as usize);
    let input = Paragraph::new(app.input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, chunks[3]);

    if app.input_mode == InputMode::Editing {
        f.set_cursor_position((
            chunks[3].x + ((app.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            chunks[3].y + 1,
        ));
    }
}

/// Apply a command to the session and record its outcome
async fn apply<S: EmployeeStore + 'static>(
    session: &mut RosterSession<S>,
    app: &mut App,
    command: Command,
) {
    let outcome = match command {
        Command::Show | Command::Quit => Ok(None),
        Command::Edit {
            bucket,
            row,
            field,
            value,
        } => session
            .edit_field(bucket, row, field, value)
            .await
            .map(|id| Some(format!("edited {field} of {id}"))),
        Command::Add => {
            let id = session.add_record().await;
            Ok(Some(format!("added row {id}")))
        }
        Command::Remove { bucket, row } => session
            .remove_record(bucket, row)
            .await
            .map(|id| Some(format!("removed {id}"))),
        Command::Page(page) => {
            session.set_page(page);
            Ok(None)
        }
        Command::Size(size) => session.set_page_size(size).map(|()| None),
        // outcome arrives as a roster event
        Command::Save => {
            let _ = session.save_now().await;
            Ok(None)
        }
        Command::Reload => {
            let _ = session.reload().await;
            Ok(None)
        }
        Command::Help => {
            for line in HELP.lines() {
                tracing::info!("{line}");
            }
            Ok(None)
        }
    };
    match outcome {
        Ok(Some(message)) => app.message = message,
        Ok(None) => {}
        Err(e) => app.message = format!("! {e}"),
    }
}

/// Run the view until quit. Unsaved changes are dropped.
pub async fn run<S: EmployeeStore + 'static>(mut session: RosterSession<S>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &mut session).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.close();
    result
}

async fn run_app<S: EmployeeStore + 'static>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut RosterSession<S>,
) -> anyhow::Result<()> {
    let mut events = session.subscribe();
    let mut app = App {
        input: Input::default(),
        input_mode: InputMode::default(),
        snapshot: Snapshot::capture(session).await,
        message: String::new(),
    };

    loop {
        terminal.draw(|f| ui(f, &app))?;

        // Saves and reloads, including autosave flushes
        loop {
            match events.try_recv() {
                Ok(event) => app.on_event(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "View lagged behind roster events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                match app.input_mode {
                    InputMode::Normal => {
                        let page = app.snapshot.pagination.page;
                        let last_page = app
                            .snapshot
                            .pagination
                            .page_count(app.snapshot.total_rows)
                            .saturating_sub(1);
                        let command = match key.code {
                            KeyCode::Char('e') | KeyCode::Char(':') => {
                                app.input_mode = InputMode::Editing;
                                None
                            }
                            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Char('a') => Some(Command::Add),
                            KeyCode::Char('s') => Some(Command::Save),
                            KeyCode::Char('r') => Some(Command::Reload),
                            KeyCode::Left | KeyCode::PageUp => {
                                Some(Command::Page(page.saturating_sub(1)))
                            }
                            KeyCode::Right | KeyCode::PageDown => {
                                Some(Command::Page((page + 1).min(last_page)))
                            }
                            _ => None,
                        };
                        if let Some(command) = command {
                            apply(session, &mut app, command).await;
                        }
                    }
                    InputMode::Editing => match key.code {
                        KeyCode::Enter => {
                            let line: String = app.input.value().into();
                            app.input.reset();
                            match line.parse::<Command>() {
                                Ok(Command::Quit) => return Ok(()),
                                Ok(command) => apply(session, &mut app, command).await,
                                Err(e) => app.message = format!("! {e}"),
                            }
                        }
                        KeyCode::Esc => app.input_mode = InputMode::Normal,
                        _ => {
                            app.input.handle_event(&Event::Key(key));
                        }
                    },
                }
            }
        }

        app.snapshot = Snapshot::capture(session).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn snapshot(rows: Vec<EmployeeRow>, new_rows: Vec<Employee>, autosave: SchedulerState) -> Snapshot {
        Snapshot {
            mode: SaveMode::Autosave,
            total_rows: rows.len(),
            rows,
            new_rows,
            pagination: Pagination::default(),
            autosave,
            quiet_period: Some(Duration::from_secs(120)),
        }
    }

    fn draw(width: u16, height: u16, render: impl FnOnce(&mut Frame)) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(render).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|cells| cells.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_table_marks_changed_and_new_rows() {
        let snap = snapshot(
            vec![
                EmployeeRow {
                    employee: Employee::new(1, "Ann", "Lee", "North"),
                    is_changed: true,
                },
                EmployeeRow::from(Employee::new(2, "Bo", "Kim", "South")),
            ],
            vec![Employee::new(99, "Cy", "", "")],
            SchedulerState::Idle,
        );

        let lines = draw(60, 8, |f| f.render_widget(roster_table(&snap), f.area()));

        assert!(lines[0].contains("Autosave Employee Table"));
        assert!(lines[1].contains("First Name") && lines[1].contains("Branch"));
        assert!(lines[2].contains("1*") && lines[2].contains("Ann") && lines[2].contains("North"));
        assert!(lines[3].contains("2 ") && lines[3].contains("Bo"));
        assert!(lines[4].contains("1+") && lines[4].contains("Cy"));
    }

    #[test]
    fn test_status_line_shows_pending_autosave() {
        let armed = snapshot(vec![], vec![], SchedulerState::Armed);
        let lines = draw(80, 1, |f| f.render_widget(Paragraph::new(status_line(&armed)), f.area()));
        assert_eq!(
            lines[0].trim_end(),
            "page 1/1 · 5 per page · 0 rows · autosave pending (120s quiet period)"
        );

        let idle = snapshot(vec![], vec![], SchedulerState::Idle);
        let lines = draw(80, 1, |f| f.render_widget(Paragraph::new(status_line(&idle)), f.area()));
        assert_eq!(lines[0].trim_end(), "page 1/1 · 5 per page · 0 rows");
    }

    #[test]
    fn test_roster_events_set_message() {
        let mut app = App {
            input: Input::default(),
            input_mode: InputMode::Normal,
            snapshot: snapshot(vec![], vec![], SchedulerState::Idle),
            message: String::new(),
        };
        app.on_event(RosterEvent::Saved {
            created: 1,
            updated: 2,
            deleted: 0,
        });
        assert_eq!(app.message, "saved: 1 created, 2 updated, 0 deleted");

        app.on_event(RosterEvent::Changed);
        assert_eq!(app.message, "saved: 1 created, 2 updated, 0 deleted");

        app.on_event(RosterEvent::SaveFailed {
            message: "Save failed: down".into(),
        });
        assert_eq!(app.message, "! Save failed: down");
    }
}
