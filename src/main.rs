use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vaxreg::command::{Language, Session};

/// In-memory vaccination registry shell.
///
/// Reads single-letter commands from stdin and prints results to stdout
/// until `q` or end of input.
#[derive(Parser)]
#[command(name = "vaxreg", version, about)]
struct Args {
    /// Language for error messages.
    #[arg(value_enum, default_value_t = Language::En)]
    language: Language,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::new(args.language, io::stdout().lock());
    session.run(io::stdin().lock())?;

    let fatal = session.fatal();
    drop(session);
    if fatal {
        std::process::exit(1);
    }
    Ok(())
}
