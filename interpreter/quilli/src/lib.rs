//! Quill CLI internals: script execution and the interactive REPL.

mod error;
mod repl;
mod run;

pub use error::CliError;
pub use repl::start_repl;
pub use run::run_file;
