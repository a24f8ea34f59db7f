mod commands;
mod context;
mod format;
mod handlers;
mod interactions;
mod requests;
mod responses;

pub use commands::command_definitions;
pub use context::AppContext;
pub use format::{
    history_line, level_line, monthly_reset_notice, roll_reply, status_color, status_label,
};
pub use handlers::*;
pub use interactions::*;
pub use requests::*;
pub use responses::*;
