//! Application-level orchestration.
//!
//! This module owns the timer event loop and the desktop side effects it triggers.
//! UI/CLI layers talk to it through `UiCommand` in and `TimerEvent` out.

mod controller;
mod effects;

pub(crate) use controller::{run_controller, UiCommand};
pub(crate) use effects::DesktopEffects;
