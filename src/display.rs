//! Plain-text rendering of timer state.
//!
//! Shared by the TUI and the headless text mode; every function here is pure.

use crate::model::Snapshot;
use std::time::Duration;

/// One entry of the short key help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

/// Format a countdown as `MM:SS`, or `H:MM:SS` from one hour up.
/// Partial seconds round up so the display only reads `00:00` at expiry.
pub fn format_remaining(d: Duration) -> String {
    let mut secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs += 1;
    }
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

pub fn status_line(snapshot: &Snapshot) -> String {
    let mut line = format!(
        "{} ends in {}",
        snapshot.phase.label(),
        format_remaining(snapshot.remaining)
    );
    if !snapshot.running {
        line.push_str(" (stopped)");
    }
    line
}

/// Start and stop share a key; only the one matching the running flag is enabled.
pub fn key_hints(snapshot: &Snapshot) -> [KeyHint; 4] {
    [
        KeyHint {
            key: "s",
            label: "start",
            enabled: !snapshot.running,
        },
        KeyHint {
            key: "s",
            label: "stop",
            enabled: snapshot.running,
        },
        KeyHint {
            key: "r",
            label: "reset",
            enabled: true,
        },
        KeyHint {
            key: "q",
            label: "quit",
            enabled: true,
        },
    ]
}

/// Fraction of the current phase already elapsed, in `0.0..=1.0`.
pub fn progress(snapshot: &Snapshot) -> f64 {
    if snapshot.phase_duration.is_zero() {
        return 1.0;
    }
    let left = snapshot.remaining.as_secs_f64() / snapshot.phase_duration.as_secs_f64();
    (1.0 - left).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;

    fn snap(phase: Phase, remaining: u64, total: u64, running: bool) -> Snapshot {
        Snapshot {
            phase,
            remaining: Duration::from_secs(remaining),
            phase_duration: Duration::from_secs(total),
            running,
        }
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_remaining(Duration::from_secs(25 * 60)), "25:00");
        assert_eq!(format_remaining(Duration::from_secs(61)), "01:01");
        assert_eq!(format_remaining(Duration::ZERO), "00:00");
        assert_eq!(format_remaining(Duration::from_secs(3600 + 5)), "1:00:05");
        assert_eq!(format_remaining(Duration::from_millis(500)), "00:01");
    }

    #[test]
    fn status_names_phase() {
        assert_eq!(
            status_line(&snap(Phase::Work, 1499, 1500, true)),
            "Work ends in 24:59"
        );
        assert_eq!(
            status_line(&snap(Phase::Break, 300, 300, false)),
            "Break ends in 05:00 (stopped)"
        );
    }

    #[test]
    fn only_applicable_toggle_hint_enabled() {
        let idle = key_hints(&snap(Phase::Work, 10, 10, false));
        assert!(idle[0].enabled && !idle[1].enabled);
        let running = key_hints(&snap(Phase::Work, 10, 10, true));
        assert!(!running[0].enabled && running[1].enabled);
        assert!(running[2].enabled && running[3].enabled);
    }

    #[test]
    fn progress_tracks_elapsed_share() {
        assert_eq!(progress(&snap(Phase::Work, 10, 10, false)), 0.0);
        assert_eq!(progress(&snap(Phase::Work, 5, 10, true)), 0.5);
        assert_eq!(progress(&snap(Phase::Work, 0, 0, true)), 1.0);
    }
}
