pub mod app;
pub mod commands;
pub mod display;
pub mod inspect;
pub mod session;

pub use app::Config;
pub use commands::{Cli, Commands, ConfigCommand};
pub use display::{render_board, render_move_history, render_status, RenderOptions};
pub use inspect::{check_move, list_destinations, MoveVerdict};
pub use session::{Reply, Session, SessionCommand};
