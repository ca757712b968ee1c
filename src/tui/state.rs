use crate::model::{Phase, Snapshot, TimerEvent};

const WORK_SPINNER: &[&str] = &["⢄", "⢂", "⢁", "⡁", "⡈", "⡐", "⡠"];
const BREAK_SPINNER: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Everything the render loop needs. Owned by the UI thread only; the timer
/// itself lives in the controller task and arrives here as snapshots.
#[derive(Default)]
pub struct UiState {
    pub tab: usize,
    pub snapshot: Option<Snapshot>,
    pub info: String,
    pub spinner_frame: usize,
}

impl UiState {
    /// Fold one controller event into the UI state. Returns true once the
    /// controller has exited.
    pub fn apply_event(&mut self, ev: TimerEvent) -> bool {
        match ev {
            TimerEvent::Updated { snapshot } => {
                self.snapshot = Some(snapshot);
            }
            TimerEvent::PhaseEntered { phase, snapshot } => {
                let (title, body) = phase.entry_notice();
                self.info = format!("{title} {body}");
                self.snapshot = Some(snapshot);
                self.spinner_frame = 0;
            }
            TimerEvent::Info { message } => self.info = message,
            TimerEvent::Exited => return true,
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.snapshot.map(|s| s.running).unwrap_or(false)
    }

    /// Spin only while the countdown is moving.
    pub fn advance_spinner(&mut self) {
        if self.is_running() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn spinner(&self) -> &'static str {
        let frames = match self.snapshot.map(|s| s.phase) {
            Some(Phase::Break) => BREAK_SPINNER,
            _ => WORK_SPINNER,
        };
        frames[self.spinner_frame % frames.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snapshot(phase: Phase, running: bool) -> Snapshot {
        Snapshot {
            phase,
            remaining: Duration::from_secs(60),
            phase_duration: Duration::from_secs(60),
            running,
        }
    }

    #[test]
    fn phase_entry_sets_info_and_snapshot() {
        let mut state = UiState::default();
        let exited = state.apply_event(TimerEvent::PhaseEntered {
            phase: Phase::Break,
            snapshot: snapshot(Phase::Break, true),
        });
        assert!(!exited);
        assert_eq!(state.info, "Break time! Time to stretch and relax");
        assert!(state.is_running());
        assert!(state.apply_event(TimerEvent::Exited));
    }

    #[test]
    fn spinner_moves_only_while_running() {
        let mut state = UiState::default();
        state.apply_event(TimerEvent::Updated {
            snapshot: snapshot(Phase::Work, false),
        });
        let still = state.spinner();
        state.advance_spinner();
        assert_eq!(state.spinner(), still);

        state.apply_event(TimerEvent::Updated {
            snapshot: snapshot(Phase::Work, true),
        });
        state.advance_spinner();
        assert_ne!(state.spinner(), still);
    }

    #[test]
    fn break_uses_its_own_spinner() {
        let mut state = UiState::default();
        state.apply_event(TimerEvent::Updated {
            snapshot: snapshot(Phase::Break, true),
        });
        assert!(BREAK_SPINNER.contains(&state.spinner()));
    }
}
