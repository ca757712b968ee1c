mod help;
mod state;

use crate::display;
use crate::model::{Phase, TimerConfig, TimerEvent};
use crate::orchestrator::{self, DesktopEffects, UiCommand};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Terminal,
};
use state::UiState;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(cfg: TimerConfig) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<TimerEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(event_rx, cmd_tx));

    // If the UI fails to start it drops `cmd_tx`, which ends the controller.
    let effects = DesktopEffects::new(cfg.notifications, cfg.sounds);
    let res = orchestrator::run_controller(&cfg, &effects, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    mut event_rx: UnboundedReceiver<TimerEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend).context("create terminal") {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e);
        }
    };
    terminal.clear().ok();

    let mut state = UiState::default();
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain controller events without blocking to keep the UI responsive.
        let mut controller_done = false;
        loop {
            match event_rx.try_recv() {
                Ok(ev) => controller_done |= state.apply_event(ev),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    controller_done = true;
                    break;
                }
            }
        }
        if controller_done {
            break Ok(());
        }

        if last_tick.elapsed() >= tick_rate {
            state.advance_spinner();
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Char('s')) => {
                        // One key, two meanings: pick by the last reported running flag.
                        let cmd = if state.is_running() {
                            UiCommand::Stop
                        } else {
                            UiCommand::Start
                        };
                        let _ = cmd_tx.send(cmd);
                    }
                    (_, KeyCode::Char('r')) => {
                        let _ = cmd_tx.send(UiCommand::Reset);
                    }
                    (_, KeyCode::Tab) => {
                        state.tab = (state.tab + 1) % 2;
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = 1;
                    }
                    (_, KeyCode::Esc) => {
                        state.tab = 0;
                    }
                    _ => {}
                }
            }
        }
    };

    restore_terminal();
    res
}

fn restore_terminal() {
    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Timer"), Line::from("Help")])
        .select(state.tab)
        .block(Block::default().borders(Borders::ALL).title("pomo"))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_timer(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Green,
        Phase::Break => Color::Cyan,
    }
}

fn draw_timer(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let Some(snapshot) = state.snapshot else {
        let p = Paragraph::new("Starting…").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };
    let color = phase_color(snapshot.phase);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let status = Paragraph::new(Line::from(vec![
        Span::styled(state.spinner(), Style::default().fg(Color::Indexed(205))),
        Span::raw("  "),
        Span::styled(
            display::status_line(&snapshot),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, rows[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(snapshot.phase.label()),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(display::progress(&snapshot))
        .label(display::format_remaining(snapshot.remaining));
    f.render_widget(gauge, rows[1]);

    let mut spans = Vec::new();
    for (i, hint) in display::key_hints(&snapshot).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        let (key_style, label_style) = if hint.enabled {
            (
                Style::default().fg(Color::Magenta),
                Style::default().fg(Color::Gray),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        };
        spans.push(Span::styled(hint.key, key_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(hint.label, label_style));
    }
    let hints = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Keys"));
    f.render_widget(hints, rows[2]);

    let info = Paragraph::new(state.info.as_str())
        .block(Block::default().borders(Borders::ALL).title("Info"));
    f.render_widget(info, rows[3]);
}
