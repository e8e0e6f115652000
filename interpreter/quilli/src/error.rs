//! CLI-surface errors.

use thiserror::Error;

/// Failures the CLI reports with a non-zero exit.
///
/// Parse and runtime problems are still printed the way the language
/// formats them; these variants carry just enough for the exit path.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read {path}: {source}")]
    ReadSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} parse error(s) in {path}")]
    Parse { path: String, count: usize },

    #[error("runtime error in {path}: {message}")]
    Runtime { path: String, message: String },
}
