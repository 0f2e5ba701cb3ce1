use std::time::Duration;

use envconfig::Envconfig;

use crate::view::locale::Locale;

/// Longest time a notification may stay on screen.
pub const MAX_NOTIFICATION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "DASHBOARD_NOTIFICATION_TTL_MS", default = "3000")]
    pub notification_ttl_ms: u64,
    #[envconfig(from = "DASHBOARD_TRUNCATE_LENGTH", default = "50")]
    pub truncate_length: usize,
    #[envconfig(from = "DASHBOARD_LOCALE", default = "en")]
    pub locale: Locale,
}

impl Config {
    /// Configured lifetime, capped at [`MAX_NOTIFICATION_TTL`].
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms).min(MAX_NOTIFICATION_TTL)
    }
}
