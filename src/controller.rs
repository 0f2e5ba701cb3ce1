pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod flows;
pub mod notification;
pub mod prompt;

pub use flows::Controller;
