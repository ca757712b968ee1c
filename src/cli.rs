use crate::display;
use crate::model::{TimerConfig, TimerEvent, TICK_INTERVAL};
use crate::orchestrator::{run_controller, DesktopEffects, UiCommand};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "pomo",
    version,
    about = "Pomodoro work/break timer with optional TUI"
)]
pub struct Cli {
    /// Work phase duration
    #[arg(long = "work", value_name = "DURATION", default_value = "25m")]
    pub work_duration: humantime::Duration,

    /// Break phase duration
    #[arg(long = "break", value_name = "DURATION", default_value = "5m")]
    pub break_duration: humantime::Duration,

    /// Start counting down as soon as the app launches
    #[arg(long)]
    pub autostart: bool,

    /// Use --notifications false to silence desktop notifications
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub notifications: bool,

    /// Use --sounds false to silence phase-change chimes
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sounds: bool,

    /// Print progress as text (no TUI); reads commands from stdin
    #[arg(long)]
    pub text: bool,

    /// Print every timer event as a JSON line (no TUI); reads commands from stdin
    #[arg(long)]
    pub json: bool,

    /// Write logs to this file instead of the per-user data directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    /// Whether this invocation runs without the TUI.
    pub fn is_headless(&self) -> bool {
        self.text || self.json || cfg!(not(feature = "tui"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

pub async fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args)?;
    tracing::info!(config = %serde_json::to_string(&cfg)?, "starting timer");

    if !args.json && !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(cfg).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_headless(cfg, OutputMode::Text).await;
        }
    }

    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    run_headless(cfg, mode).await
}

/// Build a `TimerConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> Result<TimerConfig> {
    if args.text && args.json {
        return Err(anyhow::anyhow!(
            "--text and --json cannot be combined. Pick one output mode."
        ));
    }

    let work_duration = Duration::from(args.work_duration);
    let break_duration = Duration::from(args.break_duration);
    if work_duration.is_zero() {
        return Err(anyhow::anyhow!("--work must be longer than zero"));
    }
    if break_duration.is_zero() {
        return Err(anyhow::anyhow!("--break must be longer than zero"));
    }

    Ok(TimerConfig {
        work_duration,
        break_duration,
        tick_interval: TICK_INTERVAL,
        autostart: args.autostart,
        notifications: args.notifications,
        sounds: args.sounds,
    })
}

/// Run the timer without a TUI. There is no start key to press, so the
/// countdown always starts immediately.
async fn run_headless(mut cfg: TimerConfig, mode: OutputMode) -> Result<()> {
    cfg.autostart = true;

    let (out_tx, out_handle) = spawn_output_writer();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TimerEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    spawn_stdin_commands(cmd_tx.clone(), out_tx.clone());
    // Ctrl-C keeps a sender alive, so stdin reaching EOF does not end the timer.
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cmd_tx.send(UiCommand::Quit);
        }
    });

    let effects = DesktopEffects::new(cfg.notifications, cfg.sounds);
    let printer = async {
        while let Some(ev) = event_rx.recv().await {
            if let Some(line) = render_event(&ev, mode)? {
                let _ = out_tx.send(line);
            }
        }
        Ok::<(), anyhow::Error>(())
    };

    let (res, printed) = tokio::join!(run_controller(&cfg, &effects, event_tx, cmd_rx), printer);

    drop(out_tx);
    let _ = out_handle.await;
    res.context("timer loop failed")?;
    printed
}

/// Read line commands from stdin and forward them to the controller.
fn spawn_stdin_commands(
    cmd_tx: mpsc::UnboundedSender<UiCommand>,
    out_tx: mpsc::UnboundedSender<OutputLine>,
) {
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(cmd) => {
                    if cmd_tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => {
                    let _ = out_tx.send(OutputLine::Stderr(format!(
                        "Unknown command {:?} (s=start p=stop t=toggle r=reset q=quit)",
                        line.trim()
                    )));
                }
            }
        }
    });
}

fn parse_command(line: &str) -> Option<UiCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "s" | "start" => Some(UiCommand::Start),
        "p" | "stop" => Some(UiCommand::Stop),
        "t" | "toggle" => Some(UiCommand::Toggle),
        "r" | "reset" => Some(UiCommand::Reset),
        "q" | "quit" | "exit" => Some(UiCommand::Quit),
        _ => None,
    }
}

fn render_event(ev: &TimerEvent, mode: OutputMode) -> Result<Option<OutputLine>> {
    if mode == OutputMode::Json {
        let json = serde_json::to_string(ev).context("serialize timer event")?;
        return Ok(Some(OutputLine::Stdout(json)));
    }

    let line = match ev {
        TimerEvent::Updated { snapshot } => {
            Some(OutputLine::Stderr(display::status_line(snapshot)))
        }
        TimerEvent::PhaseEntered { phase, snapshot } => {
            let (title, _) = phase.entry_notice();
            Some(OutputLine::Stdout(format!(
                "[{}] {} {}",
                local_clock_time(),
                title,
                display::status_line(snapshot)
            )))
        }
        TimerEvent::Info { message } => Some(OutputLine::Stderr(message.clone())),
        TimerEvent::Exited => None,
    };
    Ok(line)
}

/// Wall-clock time of day; falls back to UTC when the local offset is unknown.
fn local_clock_time() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    now.format(time::macros::format_description!(
        "[hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| "--:--:--".into())
}
