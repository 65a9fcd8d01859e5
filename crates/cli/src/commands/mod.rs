pub mod add;
pub mod list;
pub mod run;
pub mod select;
pub mod session;

pub use add::{AddArgs, add_command};
pub use list::{list_command, status_command};
pub use run::run_command;
pub use select::select_command;
pub use session::session_command;
