use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use traverse_closure::config::{Cli, RunConfig};
use traverse_closure::prompt::{NoPrompt, TerminalPrompter};
use traverse_closure::{run, TraverseError};

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = execute(&cli) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}

fn execute(cli: &Cli) -> Result<(), TraverseError> {
    let config = if cli.no_prompt {
        RunConfig::from_cli(cli, &mut NoPrompt)?
    } else {
        let stdin = io::stdin();
        let mut prompter = TerminalPrompter::new(stdin.lock(), io::stderr());
        RunConfig::from_cli(cli, &mut prompter)?
    };

    let summary = run(&config)?;
    println!("{} correction of {} points", config.model.label(), summary.points);
    if summary.skipped_lines > 0 {
        println!("skipped {} malformed line(s)", summary.skipped_lines);
    }
    println!("before: {}", summary.before);
    println!("after:  {}", summary.after);
    for path in &summary.outputs {
        println!("wrote {}", path.display());
    }
    Ok(())
}
