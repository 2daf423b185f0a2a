use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use star_match::Pattern;

/// Print the stdin lines that the pattern matches in full.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Pattern of literals, `.` and `*`
    #[arg(short = 'E', long)]
    pattern: String,
    /// Print the compiled automaton and per-line search statistics to stderr
    #[arg(long)]
    explain: bool,
}

// Usage: echo <input_text> | star-match -E <pattern>
fn main() {
    let args = Args::parse();
    let stdout = io::stdout();
    let outcome = run(&args, io::stdin().lock(), stdout.lock());
    process::exit(exit_code(&outcome));
}

/// 0 when some line matched, 1 when none did, 2 on any error.
fn exit_code(outcome: &Result<bool>) -> i32 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            eprintln!("{}", report(err));
            2
        }
    }
}

fn report(err: &anyhow::Error) -> String {
    format!("Error: {err:#}")
}

fn run(args: &Args, input: impl BufRead, mut out: impl Write) -> Result<bool> {
    let pattern: Pattern = args
        .pattern
        .parse()
        .with_context(|| format!("invalid pattern {:?}", args.pattern))?;
    if args.explain {
        eprintln!("automaton: {}", pattern.automaton());
    }

    let mut any_matched = false;
    for line in input.lines() {
        let line = line.context("failed to read stdin")?;
        // `lines` strips `\n` and `\r\n` already
        let outcome = pattern.search(&line);
        if args.explain {
            eprintln!(
                "{line:?}: matched={} visited={}",
                outcome.matched, outcome.visited
            );
        }
        if outcome.matched {
            writeln!(out, "{line}").context("failed to write stdout")?;
            any_matched = true;
        }
    }
    Ok(any_matched)
}
