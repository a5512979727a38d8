//! Command-line entry point for the DPLL solver.
//!
//! Parses arguments, dispatches to the command handlers in
//! [`command_line::cli`], and exits non-zero on configuration or input
//! errors (an unsatisfiable formula is a result, not an error).

use clap::Parser;

mod command_line;

use command_line::cli::Cli;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// usage figures in the statistics output.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    if let Err(message) = command_line::cli::run(cli) {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}
