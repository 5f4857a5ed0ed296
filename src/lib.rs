pub mod logging;
pub mod model;
pub mod remote;
pub mod sync;
pub mod tui;

mod tui_shell;
