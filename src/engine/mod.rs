//! Timer core: the countdown clock and the phase state machine driving it.

mod clock;
mod phase;

pub use clock::{Clock, ClockEvent};
pub use phase::{Command, Effect, Event, PhaseController, TimerState};
