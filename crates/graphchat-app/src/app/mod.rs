pub mod repl;
pub mod setup;
pub mod task;

pub use repl::run_repl_mode;
pub use setup::{build_session, default_log_filter, open_logger, setup_from_cli, AppConfig};
pub use task::run_task_mode;
