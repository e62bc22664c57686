use clap::Parser;
use colored::Colorize;
use evalexpr_jet::repl::Repl;
use evalexpr_jet::{errors::EvalError, Evaluation, Evaluator, Seed};
use std::io;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jet-repl")]
#[command(about = "Evaluate expressions and their derivatives with forward-mode jets")]
#[command(version)]
struct Args {
    /// Evaluate an expression and exit instead of starting the shell (repeatable)
    #[arg(short, long)]
    eval: Vec<String>,

    /// Point at which `t =>` / `p =>` functions given with --eval are called
    #[arg(short, long)]
    seed: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Do not print the banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging();

    if args.no_color {
        colored::control::set_override(false);
    }

    if !args.eval.is_empty() {
        let mut failed = false;
        for text in &args.eval {
            match eval_once(text, args.seed.as_deref()) {
                Ok(output) => println!("{output}"),
                Err(e) => {
                    eprintln!("{}", e.to_string().yellow());
                    failed = true;
                }
            }
        }
        if failed {
            process::exit(1);
        }
        return;
    }

    let stdin = io::stdin();
    let mut repl = Repl::new(stdin.lock(), io::stdout()).with_color(!args.no_color);
    let result = if args.quiet {
        repl.run()
    } else {
        repl.print_banner().and_then(|()| repl.run())
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn eval_once(text: &str, seed: Option<&str>) -> Result<String, EvalError> {
    let evaluator = Evaluator::new();
    match evaluator.evaluate(text)? {
        Evaluation::Value(value) => Ok(value.to_string()),
        Evaluation::Function(function) => {
            let seed = seed.ok_or_else(|| EvalError::InvalidSeed {
                parameter: function.parameter().name().to_string(),
                expected: "a --seed value",
                got: "nothing",
            })?;
            let seed = Seed::try_from(evaluator.eval_value(seed)?)?;
            Ok(function.call(seed)?.to_string())
        }
    }
}
