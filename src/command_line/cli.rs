//! The command-line surface: argument parsing, dispatch, timing and
//! statistics reporting. The solving itself lives in the library.

use clap::{Args, CommandFactory, Parser, Subcommand};
use dpll_sat::sat::branching::Heuristic;
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dimacs::{parse_dimacs, parse_file};
use dpll_sat::sat::dpll::{Dpll, SolverOptions, SolverStats, Verdict};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "dpll_sat", version, about = "A DPLL SAT solver with pluggable branching heuristics")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        /// Each line represents a clause, literals are space-separated, and 0 terminates a clause.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every DIMACS .cnf file under a directory tree.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// The branching heuristic: first-literal, random-literal, moms, momsf,
    /// posit, zm, dlcs, dlis, jw or jw2.
    #[arg(long, default_value = "first-literal")]
    heuristic: String,

    /// The k parameter of the momsf heuristic.
    #[arg(long, default_value_t = 2)]
    momsf_k: u32,

    /// Enable pure-literal elimination. Can slow large instances down
    /// considerably.
    #[arg(long, default_value_t = false)]
    pure: bool,

    /// Disable unit propagation.
    #[arg(long, default_value_t = false)]
    no_unit_propagation: bool,

    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the found solution. If a solution is found, it's checked against the original CNF.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the satisfying assignment (model) if the formula is satisfiable.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,
}

impl CommonOptions {
    /// Resolves the heuristic name and propagation toggles.
    fn solver_config(&self) -> Result<(Heuristic, SolverOptions), String> {
        let heuristic =
            Heuristic::from_name(&self.heuristic, self.momsf_k).map_err(|e| e.to_string())?;

        Ok((
            heuristic,
            SolverOptions {
                unit_propagation: !self.no_unit_propagation,
                pure_elimination: self.pure,
            },
        ))
    }
}

/// Dispatches a parsed command line.
pub(crate) fn run(cli: Cli) -> Result<(), String> {
    // A bare path without a subcommand defaults to solving a DIMACS file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_cnf_file(&path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_cnf_file(&path, &common),
        Some(Commands::Text { input, common }) => {
            let (heuristic, options) = common.solver_config()?;
            let time = std::time::Instant::now();
            let cnf =
                parse_dimacs(Cursor::new(input), heuristic).map_err(|e| e.to_string())?;
            let parse_time = time.elapsed();

            solve_and_report(&cnf, options, &common, None, parse_time);
            Ok(())
        }
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "dpll_sat",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => Err(String::from(
            "no input given; pass a DIMACS file path or a subcommand (see --help)",
        )),
    }
}

/// Parses and solves a single DIMACS file.
fn solve_cnf_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let (heuristic, options) = common.solver_config()?;

    let time = std::time::Instant::now();
    let cnf = parse_file(path, heuristic)
        .map_err(|e| format!("{}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    solve_and_report(&cnf, options, common, Some(path), parse_time);
    Ok(())
}

/// Solves every `.cnf` file under a directory tree.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }

        solve_cnf_file(file_path, common)?;
    }

    Ok(())
}

/// Solves a formula and reports verdict, verification, and statistics.
fn solve_and_report(
    cnf: &Cnf,
    options: SolverOptions,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("CNF: {cnf}");
        println!("Variables: {}", cnf.num_vars.saturating_sub(1));
        println!("Clauses: {}", cnf.clauses.len());
        println!("Literals: {}", cnf.literals().count());
        println!("Heuristic: {}", cnf.heuristic);
    }

    let _ = epoch::advance();

    let time = std::time::Instant::now();
    let mut solver = Dpll::new(cnf.clone(), options);
    let verdict = solver.solve();
    let elapsed = time.elapsed();

    let _ = epoch::advance();
    let allocated_bytes = stats::allocated::mib().and_then(|m| m.read()).unwrap_or(0);
    let resident_bytes = stats::resident::mib().and_then(|m| m.read()).unwrap_or(0);

    if common.debug {
        println!("Verdict: {verdict:?}");
        println!("Time: {elapsed:?}");
    }

    if common.verify {
        match &verdict {
            Verdict::Satisfiable { assignment, .. } => {
                let ok = cnf.verify(assignment);
                println!("Verified: {ok}");
                assert!(ok, "solution failed verification!");
            }
            Verdict::Unsatisfiable => println!("UNSAT"),
        }
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            cnf,
            &verdict,
            solver.stats(),
            allocated_bytes as f64 / (1024.0 * 1024.0),
            resident_bytes as f64 / (1024.0 * 1024.0),
            common.print_solution,
        );
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
#[allow(clippy::too_many_arguments)]
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    verdict: &Verdict,
    search: SolverStats,
    allocated: f64,
    resident: f64,
    print_solution: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars.saturating_sub(1));
    stat_line("Clauses", cnf.clauses.len());
    stat_line("Literals", cnf.literals().count());
    stat_line("Heuristic", &cnf.heuristic);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Total splits", search.total_splits, elapsed_secs);
    stat_line_with_rate("Failed splits", search.failed_splits, elapsed_secs);
    if let Verdict::Satisfiable {
        units_applied,
        pures_applied,
        ..
    } = verdict
    {
        stat_line("Units applied", units_applied);
        stat_line("Pures applied", pures_applied);
    }
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if let Verdict::Satisfiable { assignment, .. } = verdict {
        if print_solution {
            let rendered: Vec<String> = assignment.iter().map(ToString::to_string).collect();
            println!("Solution: {}", rendered.join(" "));
        }
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }
}
