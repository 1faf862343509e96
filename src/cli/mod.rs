pub mod providers;
pub mod quote;
pub mod setup;
pub mod ui;
pub mod watch;
