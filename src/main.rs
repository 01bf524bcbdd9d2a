// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/main.rs
// Query REPL for the unification kernel

use clap::Parser;
use kanren_kernel::{parse_query_str, Answer, Goal, Query, State};
use std::io;
use std::io::Write;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Solve `lhs = rhs` and `lhs != rhs` queries over terms with arithmetic.
#[derive(Parser, Debug)]
#[command(name = "kanren", version)]
struct Args {
    /// Evaluate a single query and exit instead of starting the REPL
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Stop after this many solutions per query
    #[arg(long, default_value_t = 10)]
    max_solutions: usize,

    /// Print every binding of each solution, not only the query's variables
    #[arg(long)]
    show_bindings: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // RUST_LOG wins over --log-level, e.g. RUST_LOG=kanren_kernel=trace
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .init();

    if let Some(input) = &args.query {
        match parse_query_str(input.trim()) {
            Ok(query) => {
                if !evaluate_and_print(&query, &args) {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        }
        return;
    }

    println!("kanren REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type queries like `x + 5 = 9` or `(a, 2) != (1, b)`, or Ctrl-D to exit");
    println!();

    let mut infile: Box<dyn io::BufRead> = Box::new(io::stdin().lock());

    loop {
        print!("?- ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match infile.read_line(&mut line) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                println!("Error reading input: {}", e);
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_query_str(trimmed) {
                    Err(e) => println!("{}", e),
                    Ok(query) => {
                        evaluate_and_print(&query, &args);
                    }
                }
            }
        }
    }
}

/// Print up to `max_solutions` answers; returns whether there was any.
fn evaluate_and_print(query: &Query, args: &Args) -> bool {
    let vars = query.free_vars();
    let mut count = 0;

    for state in query.apply(State::new()).take(args.max_solutions) {
        count += 1;
        if args.show_bindings {
            println!("{}", state);
        } else {
            println!("{}", Answer { state: &state, vars: &vars });
        }
    }

    if count == 0 {
        println!("no");
    }
    count > 0
}
