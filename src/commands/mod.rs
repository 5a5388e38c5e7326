mod handlers;
mod parser;

pub use handlers::{CommandContext, CommandResult, CommandStatus, handle_command};
pub use parser::{Command, USAGE, parse_args, parse_command};
