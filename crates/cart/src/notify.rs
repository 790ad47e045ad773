//! Transient status notifications.
//!
//! Each notification moves through a strictly linear, time-driven lifecycle:
//! `Created -> Visible -> Fading -> Removed`. No transition goes backwards
//! and no user interaction cancels it; the banner self-removes after the
//! display window plus a short fade.
//!
//! Rendering goes through a [`NotificationSink`]. When no sink is attached
//! (the expected container is absent), the utility degrades to a structured
//! log line - it never panics and never returns an error to the caller.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use uuid::Uuid;

/// How long a notification stays fully visible.
const DISPLAY_DURATION: Duration = Duration::from_secs(4);

/// How long the fade transition runs before removal.
const FADE_DURATION: Duration = Duration::from_millis(300);

/// Outcome severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Lifecycle state of a notification. Transitions are strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    Created,
    Visible,
    Fading,
    Removed,
}

impl NotificationState {
    /// The state following this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::Visible),
            Self::Visible => Some(Self::Fading),
            Self::Fading => Some(Self::Removed),
            Self::Removed => None,
        }
    }
}

/// A transient status banner.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub state: NotificationState,
}

/// Rendering target for notifications.
///
/// Called once per state transition; `notification.state` tells the sink
/// which phase to render (append, start fade, remove).
pub trait NotificationSink: Send + Sync {
    fn apply(&self, notification: &Notification);
}

/// Displays transient notifications and drives their lifecycle.
#[derive(Clone)]
pub struct Notifier {
    sink: Option<Arc<dyn NotificationSink>>,
    display_for: Duration,
    fade_for: Duration,
}

impl Notifier {
    /// Create a notifier rendering through the given sink.
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink: Some(sink),
            display_for: DISPLAY_DURATION,
            fade_for: FADE_DURATION,
        }
    }

    /// Create a notifier with no rendering target.
    ///
    /// Every notification degrades to a log line.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            sink: None,
            display_for: DISPLAY_DURATION,
            fade_for: FADE_DURATION,
        }
    }

    /// Override the lifecycle timing.
    #[must_use]
    pub const fn with_timing(mut self, display_for: Duration, fade_for: Duration) -> Self {
        self.display_for = display_for;
        self.fade_for = fade_for;
        self
    }

    /// Display a transient notification.
    ///
    /// Returns the notification's ID immediately; the lifecycle runs on a
    /// spawned task. Degrades to a log line when no sink is attached or no
    /// runtime is available. Never panics.
    pub fn display(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            state: NotificationState::Created,
        };
        let id = notification.id;

        let Some(sink) = self.sink.clone() else {
            log_notification(&notification);
            return id;
        };

        // Banners need a timer; without a runtime the log line is the banner.
        let Ok(handle) = Handle::try_current() else {
            log_notification(&notification);
            return id;
        };

        let display_for = self.display_for;
        let fade_for = self.fade_for;
        handle.spawn(async move {
            let mut notification = notification;
            sink.apply(&notification);

            while let Some(next) = notification.state.next() {
                match notification.state {
                    NotificationState::Visible => tokio::time::sleep(display_for).await,
                    NotificationState::Fading => tokio::time::sleep(fade_for).await,
                    NotificationState::Created | NotificationState::Removed => {}
                }
                notification.state = next;
                sink.apply(&notification);
            }
        });

        id
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::detached()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("sink", &self.sink.as_ref().map(|_| "<sink>"))
            .field("display_for", &self.display_for)
            .field("fade_for", &self.fade_for)
            .finish()
    }
}

/// Fallback when no rendering target exists.
fn log_notification(notification: &Notification) {
    match notification.severity {
        Severity::Success | Severity::Info => {
            tracing::info!(id = %notification.id, "{}", notification.message);
        }
        Severity::Warning => {
            tracing::warn!(id = %notification.id, "{}", notification.message);
        }
        Severity::Error => {
            tracing::error!(id = %notification.id, "{}", notification.message);
        }
    }
}
