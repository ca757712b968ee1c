//! Desktop side effects requested on phase changes.
//!
//! Everything here is best effort: failures are logged at debug level and dropped.

use crate::model::SoundId;
use notify_rust::Notification;
use std::process::Stdio;
use tokio::process::Command;

pub(crate) trait EffectSink: Send + Sync {
    fn notify(&self, title: &str, body: &str);
    fn play_sound(&self, sound: SoundId);
}

/// Notifications via the platform notification service, chimes via the system player.
pub(crate) struct DesktopEffects {
    notifications: bool,
    sounds: bool,
}

impl DesktopEffects {
    pub fn new(notifications: bool, sounds: bool) -> Self {
        Self {
            notifications,
            sounds,
        }
    }
}

impl EffectSink for DesktopEffects {
    fn notify(&self, title: &str, body: &str) {
        if !self.notifications {
            return;
        }
        let title = title.to_string();
        let body = body.to_string();
        // Showing a notification can block on the session bus.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Notification::new().summary(&title).body(&body).show() {
                tracing::debug!(error = %e, %title, "notification not delivered");
            }
        });
    }

    fn play_sound(&self, sound: SoundId) {
        if !self.sounds {
            return;
        }
        let Some(mut cmd) = sound_command(sound) else {
            tracing::debug!(?sound, "no sound player for this platform");
            return;
        };
        tokio::spawn(async move {
            match cmd.status().await {
                Ok(status) if !status.success() => {
                    tracing::debug!(?sound, %status, "sound player exited with failure");
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(?sound, error = %e, "failed to spawn sound player"),
            }
        });
    }
}

fn sound_command(sound: SoundId) -> Option<Command> {
    let (program, path) = sound_player(sound)?;
    let mut cmd = Command::new(program);
    cmd.arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    Some(cmd)
}

#[cfg(target_os = "macos")]
fn sound_player(sound: SoundId) -> Option<(&'static str, &'static str)> {
    let path = match sound {
        SoundId::WorkChime => "/System/Library/Sounds/Submarine.aiff",
        SoundId::BreakChime => "/System/Library/Sounds/Glass.aiff",
    };
    Some(("afplay", path))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn sound_player(sound: SoundId) -> Option<(&'static str, &'static str)> {
    let path = match sound {
        SoundId::WorkChime => "/usr/share/sounds/freedesktop/stereo/bell.oga",
        SoundId::BreakChime => "/usr/share/sounds/freedesktop/stereo/complete.oga",
    };
    Some(("paplay", path))
}

#[cfg(not(unix))]
fn sound_player(_sound: SoundId) -> Option<(&'static str, &'static str)> {
    None
}
