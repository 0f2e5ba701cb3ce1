pub mod locale;
pub mod page;
pub mod projection;
pub mod terminal;
