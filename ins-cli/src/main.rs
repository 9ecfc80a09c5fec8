//! Command-line front end for the ins assembler and VM.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/decode/assembly error
//! - 2: Usage error
//! - 3: Runtime error

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[derive(Parser, Debug)]
#[command(
    name = "ins",
    version,
    about = "Assembler and interpreter for a small integer stack machine"
)]
struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a text program into a binary
    Assemble {
        /// Assembly source file
        input: PathBuf,
        /// Output path (defaults to the input with an .ins extension)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Execute a binary program and print the final stack
    Run {
        /// Binary program file
        input: PathBuf,
        /// Abort after this many executed instructions
        #[arg(long = "max-steps", value_name = "N")]
        max_steps: Option<u64>,
    },
    /// Print a binary program as assembly text
    Disassemble {
        /// Binary program file
        input: PathBuf,
    },
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new()
        .with_level(level_for(cli.verbose))
        .env()
        .init()
    {
        eprintln!("warning: logger unavailable: {e}");
    }

    let result = match &cli.command {
        Command::Assemble { input, output } => commands::assemble(input, output.as_deref()),
        Command::Run { input, max_steps } => commands::run(input, *max_steps),
        Command::Disassemble { input } => commands::disassemble(input),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
