use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of clock ticks while a countdown is running.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(with = "humantime_serde")]
    pub work_duration: Duration,
    #[serde(with = "humantime_serde")]
    pub break_duration: Duration,
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    pub autostart: bool,
    pub notifications: bool,
    pub sounds: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration: Duration::from_secs(25 * 60),
            break_duration: Duration::from_secs(5 * 60),
            tick_interval: TICK_INTERVAL,
            autostart: false,
            notifications: true,
            sounds: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Break => "Break",
        }
    }

    /// Notification title and body fired when this phase is entered.
    pub fn entry_notice(self) -> (&'static str, &'static str) {
        match self {
            Phase::Work => ("Back to work!", "Sorry!"),
            Phase::Break => ("Break time!", "Time to stretch and relax"),
        }
    }

    pub fn entry_sound(self) -> SoundId {
        match self {
            Phase::Work => SoundId::WorkChime,
            Phase::Break => SoundId::BreakChime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundId {
    WorkChime,
    BreakChime,
}

/// Read-only view of the timer handed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    #[serde(with = "humantime_serde")]
    pub remaining: Duration,
    #[serde(with = "humantime_serde")]
    pub phase_duration: Duration,
    pub running: bool,
}

/// Events emitted by the controller loop and consumed by UI/CLI layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// State after any command or tick.
    Updated { snapshot: Snapshot },
    /// A countdown expired and the next phase has begun.
    PhaseEntered { phase: Phase, snapshot: Snapshot },
    Info { message: String },
    Exited,
}
