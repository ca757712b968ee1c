//! Timer event loop.
//!
//! Owns the phase controller and its clock, serializes user commands and clock
//! wake-ups into one event stream, and emits snapshots for presentation layers.

use crate::display::format_remaining;
use crate::engine::{Clock, Command, Effect, Event, PhaseController, TimerState};
use crate::model::{TimerConfig, TimerEvent};
use crate::orchestrator::effects::EffectSink;
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiCommand {
    Start,
    Stop,
    /// Start or stop depending on whether the countdown is running when handled.
    Toggle,
    Reset,
    Quit,
}

impl UiCommand {
    fn resolve(self, state: &TimerState) -> Command {
        match self {
            UiCommand::Start => Command::Start,
            UiCommand::Stop => Command::Stop,
            UiCommand::Toggle if state.is_running() => Command::Stop,
            UiCommand::Toggle => Command::Start,
            UiCommand::Reset => Command::Reset,
            UiCommand::Quit => Command::Quit,
        }
    }
}

/// Run the timer until a quit command arrives or every command sender is dropped.
pub(crate) async fn run_controller(
    cfg: &TimerConfig,
    effects: &dyn EffectSink,
    event_tx: UnboundedSender<TimerEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut controller = PhaseController::new(cfg);
    let mut clock = Clock::new(cfg.tick_interval, cfg.work_duration);

    if cfg.autostart {
        let requested = controller.handle(Command::Start);
        apply_effects(requested, &mut clock, effects);
    }
    let _ = event_tx.send(TimerEvent::Info {
        message: format!(
            "Work {} / break {}",
            format_remaining(cfg.work_duration),
            format_remaining(cfg.break_duration)
        ),
    });
    let _ = event_tx.send(TimerEvent::Updated {
        snapshot: controller.state().snapshot(),
    });

    loop {
        // One event at a time, handled to completion before the next is accepted.
        let event: Event = tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd.resolve(controller.state()).into(),
                None => Command::Quit.into(),
            },
            ev = clock.next_event() => ev.into(),
        };

        let phase_before = controller.state().phase();
        let requested = controller.handle(event);
        tracing::debug!(?event, ?requested, "handled timer event");
        let exit = apply_effects(requested, &mut clock, effects);
        debug_assert_eq!(exit, controller.state().is_quitting());
        if !exit {
            debug_assert_eq!(clock.is_running(), controller.state().is_running());
            tracing::trace!(remaining = ?clock.remaining(), "clock state");
        }

        let snapshot = controller.state().snapshot();
        if snapshot.phase != phase_before {
            tracing::info!(phase = ?snapshot.phase, "phase started");
            let _ = event_tx.send(TimerEvent::PhaseEntered {
                phase: snapshot.phase,
                snapshot,
            });
        } else {
            let _ = event_tx.send(TimerEvent::Updated { snapshot });
        }

        if exit {
            let _ = event_tx.send(TimerEvent::Exited);
            break;
        }
    }

    Ok(())
}

/// Carry out requested effects. Clock effects apply immediately; notifications
/// and sounds are handed off without waiting. Returns true when asked to exit.
fn apply_effects(requested: Vec<Effect>, clock: &mut Clock, effects: &dyn EffectSink) -> bool {
    let mut exit = false;
    for effect in requested {
        match effect {
            Effect::Notify { title, body } => effects.notify(title, body),
            Effect::PlaySound(sound) => effects.play_sound(sound),
            Effect::ArmClock(duration) => clock.arm(duration),
            Effect::StartClock => clock.start(),
            Effect::StopClock => clock.stop(),
            Effect::Exit => exit = true,
        }
    }
    exit
}
