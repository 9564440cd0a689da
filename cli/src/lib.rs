pub mod menu;
pub mod run;
pub mod session;
pub mod terminal;
pub mod ui;
