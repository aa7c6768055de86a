use std::{error::Error, fs, process};

use clap::Parser;
use treegen_build::{Config, DiagnosticsCollector, Generator};

use crate::args::TreegenArgs;

#[macro_use]
extern crate log;

mod args;
mod files;

fn main() {
  let args = TreegenArgs::parse();
  if let Err(e) = setup_logger(args.verbose) {
    eprintln!("{}", e);
    process::exit(1);
  }

  match run(args) {
    Ok(()) => (),
    Err(e) => {
      eprintln!("error: {}", e);
      process::exit(1);
    }
  }
}

fn setup_logger(verbose: u8) -> Result<(), fern::InitError> {
  let level = match verbose {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
    })
    .level(level)
    .chain(std::io::stderr())
    .apply()?;
  Ok(())
}

fn run(args: TreegenArgs) -> Result<(), Box<dyn Error>> {
  let src = fs::read_to_string(&args.grammar)
    .map_err(|e| format!("{}: {e}", args.grammar.display()))?;
  let grammar = treegen_grammar::ungram::parse(&src)?;
  let config = Config::from(args.options);

  let diagnostics = DiagnosticsCollector::new();
  let output = Generator::new(&config, &grammar).generate(&diagnostics);

  for d in diagnostics.diagnostics() {
    match d.span {
      Some(span) => {
        let (line, col) = line_col(&src, span.start);
        eprintln!("{}:{line}:{col}: {}: {}", args.grammar.display(), d.severity, d.message);
      }
      None => eprintln!("{}: {}: {}", args.grammar.display(), d.severity, d.message),
    }
  }

  let output = output?;
  if diagnostics.has_errors() {
    return Err(format!("{} errors reported", diagnostics.error_count()).into());
  }

  let stale =
    files::write_output(&output, &config, &args.nodes_dir, &args.visitor_dir, args.check)?;
  if args.check && stale > 0 {
    return Err(format!("{stale} generated files are out of date").into());
  }

  Ok(())
}

/// 1-based line and column of byte `offset`.
fn line_col(src: &str, offset: usize) -> (usize, usize) {
  let before = &src[..offset.min(src.len())];
  let line = before.matches('\n').count() + 1;
  let col = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
  (line, col)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_and_column() {
    let src = "A = B\nB = 'b'\n";
    assert_eq!(line_col(src, 0), (1, 1));
    assert_eq!(line_col(src, 4), (1, 5));
    assert_eq!(line_col(src, 6), (2, 1));
    assert_eq!(line_col(src, 10), (2, 5));
    assert_eq!(line_col(src, 100), (3, 1));
  }
}
