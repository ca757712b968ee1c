//! Work/break state machine.
//!
//! [`PhaseController::handle`] is the single entry point: it consumes one event,
//! updates [`TimerState`], and returns the effects the host must carry out. It
//! performs no I/O itself.

use crate::engine::clock::ClockEvent;
use crate::model::{Phase, Snapshot, SoundId, TimerConfig};
use std::time::Duration;

/// User commands, already mapped from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    Clock(ClockEvent),
}

impl From<Command> for Event {
    fn from(cmd: Command) -> Self {
        Event::Command(cmd)
    }
}

impl From<ClockEvent> for Event {
    fn from(ev: ClockEvent) -> Self {
        Event::Clock(ev)
    }
}

/// Requests returned to the host. Notifications and sounds are fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify {
        title: &'static str,
        body: &'static str,
    },
    PlaySound(SoundId),
    ArmClock(Duration),
    StartClock,
    StopClock,
    Exit,
}

#[derive(Debug, Clone)]
pub struct TimerState {
    phase: Phase,
    remaining: Duration,
    running: bool,
    quitting: bool,
    work_duration: Duration,
    break_duration: Duration,
}

impl TimerState {
    pub fn new(work_duration: Duration, break_duration: Duration) -> Self {
        Self {
            phase: Phase::Work,
            remaining: work_duration,
            running: false,
            quitting: false,
            work_duration,
            break_duration,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn duration_of(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work_duration,
            Phase::Break => self.break_duration,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            remaining: self.remaining,
            phase_duration: self.duration_of(self.phase),
            running: self.running,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhaseController {
    state: TimerState,
}

impl PhaseController {
    pub fn new(cfg: &TimerConfig) -> Self {
        Self {
            state: TimerState::new(cfg.work_duration, cfg.break_duration),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Apply one event. Events that make no sense in the current state are no-ops
    /// and return no effects; nothing is processed once quitting.
    pub fn handle(&mut self, event: impl Into<Event>) -> Vec<Effect> {
        if self.state.quitting {
            return Vec::new();
        }
        match event.into() {
            Event::Command(Command::Start) => {
                if self.state.running {
                    return Vec::new();
                }
                self.state.running = true;
                vec![Effect::StartClock]
            }
            Event::Command(Command::Stop) => {
                if !self.state.running {
                    return Vec::new();
                }
                self.state.running = false;
                vec![Effect::StopClock]
            }
            Event::Command(Command::Reset) => {
                let full = self.state.duration_of(self.state.phase);
                self.state.remaining = full;
                vec![Effect::ArmClock(full)]
            }
            Event::Command(Command::Quit) => {
                self.state.quitting = true;
                self.state.running = false;
                vec![Effect::Exit]
            }
            Event::Clock(ClockEvent::Tick { remaining }) => {
                if self.state.running {
                    self.state.remaining = remaining;
                }
                Vec::new()
            }
            Event::Clock(ClockEvent::Expired) => {
                if !self.state.running {
                    return Vec::new();
                }
                self.enter(self.state.phase.next())
            }
        }
    }

    fn enter(&mut self, phase: Phase) -> Vec<Effect> {
        let full = self.state.duration_of(phase);
        self.state.phase = phase;
        self.state.remaining = full;
        let (title, body) = phase.entry_notice();
        vec![
            Effect::Notify { title, body },
            Effect::PlaySound(phase.entry_sound()),
            Effect::ArmClock(full),
            Effect::StartClock,
        ]
    }
}
