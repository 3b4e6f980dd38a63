use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{anyhow, bail, Context, Result};
use log::LevelFilter;

use kleene_match::harness::{self, Case};
use kleene_match::matcher::{Matcher, DEFAULT_MAX_DEPTH};
use kleene_match::observer::{LogObserver, MatchObserver, NoopObserver};
use kleene_match::{presets, MatchResult, Pattern};

const USAGE: &str = "\
Usage: kleene [OPTIONS]

Reads lines from stdin and reports whether a prefix of each matches the
selected pattern.

Options:
  --pattern <NAME>   Pattern to match against (default: full)
  --max-depth <N>    Nesting limit for a single match (default: 1024)
  --trace            Log every engine decision at trace level
  --list             List the available patterns
  --selftest         Check the built-in verdict table
  -h, --help         Print this help message";

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Interactive,
    List,
    SelfTest,
    Help,
}

#[derive(Debug)]
struct Options {
    pattern: String,
    max_depth: usize,
    trace: bool,
    mode: Mode,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let mut opts = Options {
        pattern: "full".to_string(),
        max_depth: DEFAULT_MAX_DEPTH,
        trace: false,
        mode: Mode::Interactive,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => opts.mode = Mode::Help,
            "--list" => opts.mode = Mode::List,
            "--selftest" => opts.mode = Mode::SelfTest,
            "--trace" => opts.trace = true,
            "--pattern" => {
                opts.pattern = args
                    .next()
                    .ok_or_else(|| anyhow!("--pattern requires a value"))?;
            }
            "--max-depth" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--max-depth requires a value"))?;
                opts.max_depth = value
                    .parse()
                    .with_context(|| format!("invalid --max-depth `{value}`"))?;
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(opts)
}

fn load(name: &str) -> Result<Pattern> {
    let pattern = presets::get(name)
        .ok_or_else(|| anyhow!("unknown pattern `{name}` (see --list)"))?
        .with_context(|| format!("pattern `{name}` is malformed"))?;
    Ok(pattern)
}

fn list() -> Result<()> {
    for name in presets::NAMES {
        println!("{name:<12} {}", load(name)?);
    }
    Ok(())
}

// Returns false if any case disagrees with the engine.
fn selftest(table: &[(&str, &str, bool)], out: &mut impl Write) -> Result<bool> {
    let mut patterns = Vec::new();
    for name in presets::NAMES {
        patterns.push((*name, load(name)?));
    }
    let mut cases = Vec::new();
    for (name, input, expected) in table {
        let (_, pattern) = patterns
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| anyhow!("table refers to unknown pattern `{name}`"))?;
        cases.push(Case {
            pattern,
            input: *input,
            expected: *expected,
        });
    }

    let disagreements = harness::run_table(&cases);
    for d in &disagreements {
        writeln!(
            out,
            "FAIL {} on {:?}: expected {}, got {:?}",
            d.pattern, d.input, d.expected, d.actual
        )?;
    }
    writeln!(out, "{} cases, {} failed", cases.len(), disagreements.len())?;
    Ok(disagreements.is_empty())
}

// One verdict line per input line. A line that is not UTF-8 gets an
// error line of its own; the lines after it are still matched.
fn match_lines(
    matcher: &Matcher<'_>,
    observer: &mut dyn MatchObserver,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    for line in input.split(b'\n') {
        let line = line.context("failed to read input")?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        let Ok(text) = std::str::from_utf8(line) else {
            writeln!(out, "error: invalid UTF-8")?;
            out.flush()?;
            continue;
        };
        let symbols: Vec<char> = text.chars().collect();
        match matcher.find_observed(&symbols, observer) {
            Ok(MatchResult::Matched(len)) => writeln!(out, "match {len}")?,
            Ok(MatchResult::NoMatch) => writeln!(out, "no match")?,
            Err(e) => writeln!(out, "error: {e}")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn interactive(opts: &Options) -> Result<()> {
    let pattern = load(&opts.pattern)?;
    let matcher = Matcher::new(&pattern).max_depth(opts.max_depth);
    let mut observer: Box<dyn MatchObserver> = if opts.trace {
        Box::new(LogObserver)
    } else {
        Box::new(NoopObserver)
    };
    log::info!("matching against {pattern}");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match_lines(&matcher, observer.as_mut(), io::stdin().lock(), &mut out)
}

fn run(opts: Options) -> Result<bool> {
    let mut logger = env_logger::Builder::from_default_env();
    if opts.trace {
        logger.filter_level(LevelFilter::Trace);
    }
    logger.init();

    match opts.mode {
        Mode::Help => println!("{USAGE}"),
        Mode::List => list()?,
        Mode::SelfTest => return selftest(harness::BUILTIN, &mut io::stdout().lock()),
        Mode::Interactive => interactive(&opts)?,
    }
    Ok(true)
}

// Usage: echo <input_text> | kleene --pattern <name>
fn main() {
    let opts = match parse_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e:#}");
            eprintln!();
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };
    match run(opts) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}
