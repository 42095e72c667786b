mod commands;
mod handlers;

pub use commands::init_get_subcommand;
pub use handlers::handle_cli_subcommand;
