//! Script execution.

use crate::CliError;
use quill_eval::{eval, Environment, Value};

/// Run a source file to completion.
///
/// Parse diagnostics go to stderr before the error return; a non-null
/// final value is printed in its inspect form.
pub fn run_file(path: &str) -> Result<(), CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::ReadSource {
        path: path.to_string(),
        source,
    })?;

    let result = quill_parse::parse(&source);
    if result.has_errors() {
        for diagnostic in &result.diagnostics {
            eprintln!("{path}: {diagnostic}");
        }
        return Err(CliError::Parse {
            path: path.to_string(),
            count: result.diagnostics.len(),
        });
    }

    tracing::debug!(path, statements = result.program.statements.len(), "running");
    let env = Environment::new();
    match eval(&result.program, &env) {
        Value::Error(message) => Err(CliError::Runtime {
            path: path.to_string(),
            message: (*message).clone(),
        }),
        Value::Null => Ok(()),
        value => {
            println!("{value}");
            Ok(())
        }
    }
}
