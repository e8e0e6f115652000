//! Quill CLI.
//!
//! `quill` with no arguments starts the REPL; `quill run <file>` runs a
//! script.

use quilli::{run_file, start_repl};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("repl") => {
            if let Err(error) = start_repl() {
                eprintln!("error: {error}");
                std::process::exit(1);
            }
        }
        Some("run") => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: quill run <file.ql>");
                std::process::exit(1);
            };
            if let Err(error) = run_file(path) {
                eprintln!("error: {error}");
                std::process::exit(1);
            }
        }
        Some(_) => {
            print_usage();
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: quill [command]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  repl            Start the interactive REPL (default)");
    eprintln!("  run <file.ql>   Run a script");
}
