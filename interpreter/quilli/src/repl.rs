//! The interactive REPL.
//!
//! One persistent environment for the whole session: definitions from
//! earlier lines stay visible. Each line is parsed on its own; lines
//! with parse errors print them and evaluate nothing.

use quill_eval::{Interpreter, Value};
use std::io::{self, BufRead, Write};

const PROMPT: &str = ">> ";

/// Run the REPL until end of input.
pub fn start_repl() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let interpreter = Interpreter::new();

    let mut lines = stdin.lock().lines();
    loop {
        stdout.write_all(PROMPT.as_bytes())?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let result = quill_parse::parse(&line);
        if result.has_errors() {
            for diagnostic in &result.diagnostics {
                println!("\t{diagnostic}");
            }
            continue;
        }

        let value = interpreter.eval_program(&result.program);
        if value != Value::Null {
            println!("{value}");
        }
    }

    Ok(())
}
