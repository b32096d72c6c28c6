use std::io;
use std::io::Stdout;

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::ApiCall;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::LineKind;
use crate::domain::services::AppState;
use crate::domain::services::BackendService;
use crate::domain::services::EventsService;

/// Restores the terminal outside of the normal teardown path. Installed in
/// the panic hook so a crash never leaves the user's shell in raw mode.
pub fn destruct_terminal_for_panic() {
    disable_raw_mode().ok();
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .ok();
    execute!(io::stdout(), crossterm::cursor::Show).ok();
}

pub async fn start_loop(backend: BackendBox) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run(&mut terminal, backend).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}

async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, backend: BackendBox) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let (call_tx, mut call_rx) = mpsc::unbounded_channel::<ApiCall>();

    let worker_event_tx = event_tx.clone();
    tokio::spawn(async move {
        if let Err(err) = BackendService::start(backend, worker_event_tx, &mut call_rx).await {
            tracing::error!(error = %err, "backend worker stopped");
        }
    });

    let mut events = EventsService::new(event_rx);
    let mut state = AppState::new();

    loop {
        terminal.draw(|frame| render(frame, &state))?;

        let event = events.next().await?;
        if let Some(call) = state.handle_event(event) {
            call_tx.send(call)?;
        }
        if state.exit_requested {
            break;
        }
    }

    return Ok(());
}

fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, state, chunks[0]);
    render_transcript(frame, state, chunks[1]);
    render_input(frame, state, chunks[2]);
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let username = state
        .session
        .user()
        .map(|user| user.username.clone())
        .unwrap_or_else(|| "GUEST".to_string());
    let header = format!(
        "# VTU_CORE_TERMINAL | USER: {} | STAGE: {}",
        username,
        state.interpreter.stage().name()
    );

    frame.render_widget(
        Paragraph::new(header).style(Style::default().add_modifier(Modifier::BOLD)),
        area,
    );
}

fn render_transcript(frame: &mut Frame, state: &AppState, area: Rect) {
    let height = area.height as usize;
    let visible_from = state
        .transcript
        .len()
        .saturating_sub(height + state.scroll_offset);

    let lines: Vec<Line> = state
        .transcript
        .iter()
        .skip(visible_from)
        .take(height)
        .map(|entry| Line::from(Span::styled(entry.text.clone(), line_style(entry.kind))))
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_input(frame: &mut Frame, state: &AppState, area: Rect) {
    if state.waiting_for_backend {
        frame.render_widget(
            Paragraph::new("EXECUTING_OPERATION_PLEASE_WAIT...")
                .style(Style::default().fg(Color::Yellow)),
            area,
        );
        return;
    }

    let shown = if state.interpreter.stage().is_secret_entry() {
        "*".repeat(state.input.chars().count())
    } else {
        state.input.clone()
    };
    let prompt = format!("> {shown}");

    frame.render_widget(Paragraph::new(prompt.clone()), area);
    frame.set_cursor_position((area.x + prompt.chars().count() as u16, area.y));
}

fn line_style(kind: LineKind) -> Style {
    return match kind {
        LineKind::Input => Style::default().add_modifier(Modifier::BOLD),
        LineKind::Output => Style::default().fg(Color::Gray),
        LineKind::Error => Style::default().fg(Color::Red),
        LineKind::Success => Style::default().fg(Color::Green),
        LineKind::Warning => Style::default().fg(Color::Yellow),
    };
}
