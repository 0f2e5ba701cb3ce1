use strum::Display;
use tokio::time::Instant;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

/// Transient messages, each removed once its own deadline passes.
#[derive(Debug, Default)]
pub struct Notifications {
    // Insertion order.
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, message: String, kind: NotificationKind, expires_at: Instant) {
        self.entries.push(Notification {
            message,
            kind,
            expires_at,
        });
    }

    /// Drops every entry whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|n| n.expires_at > now);
        before - self.entries.len()
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.entries.iter().map(|n| n.expires_at).min()
    }

    pub fn latest_first(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().rev()
    }

    /// Removes the entry at `index` in [`latest_first`](Self::latest_first)
    /// order. The others keep their deadlines.
    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        let position = self.entries.len().checked_sub(1)?.checked_sub(index)?;
        Some(self.entries.remove(position))
    }
}
