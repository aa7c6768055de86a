use std::{
  fs, io,
  path::{Path, PathBuf},
};

use treegen_build::{Config, Output, Unit};

const PREAMBLE: &str = "// Generated by treegen, do not edit by hand.";

/// Where each generated unit goes, and what the file contains.
pub fn output_files(
  output: &Output,
  config: &Config,
  nodes_dir: &Path,
  visitor_dir: &Path,
) -> Vec<(PathBuf, String)> {
  let nodes =
    output.node_types.iter().chain(Some(&output.node_interface)).chain(&output.base_classes);
  let nodes = nodes.map(|unit| {
    let text = file_text(unit, config.nodes_package.as_deref(), config.visitor_package.as_deref());
    (nodes_dir.join(format!("{}.java", unit.name)), text)
  });

  let visitors = output.visitors.iter().map(|unit| {
    let text = file_text(unit, config.visitor_package.as_deref(), config.nodes_package.as_deref());
    (visitor_dir.join(format!("{}.java", unit.name)), text)
  });

  nodes.chain(visitors).collect()
}

// The other package is imported whole, as both sides refer to each other.
fn file_text(unit: &Unit, package: Option<&str>, other: Option<&str>) -> String {
  let mut text = String::new();
  text.push_str(PREAMBLE);
  text.push_str("\n\n");

  if let Some(package) = package {
    text.push_str(&format!("package {package};\n\n"));
  }
  if let Some(other) = other.filter(|other| Some(*other) != package) {
    text.push_str(&format!("import {other}.*;\n\n"));
  }

  text.push_str(&unit.text);
  text
}

/// Writes every output file that changed. With `check`, nothing is written
/// and the out of date files are only counted.
pub fn write_output(
  output: &Output,
  config: &Config,
  nodes_dir: &Path,
  visitor_dir: &Path,
  check: bool,
) -> io::Result<usize> {
  let mut stale = 0;
  for (path, contents) in output_files(output, config, nodes_dir, visitor_dir) {
    if ensure_file_contents(&path, &contents, check)? {
      stale += 1;
    }
  }

  if check {
    info!("{stale} files out of date");
  } else {
    info!("updated {stale} files");
  }
  Ok(stale)
}

/// Returns `true` if the file didn't already hold `contents`.
pub fn ensure_file_contents(path: &Path, contents: &str, check: bool) -> io::Result<bool> {
  if let Ok(old) = fs::read_to_string(path) {
    if normalize_newlines(&old) == normalize_newlines(contents) {
      debug!("{} is up to date", path.display());
      return Ok(false);
    }
  }

  if check {
    warn!("{} is out of date", path.display());
    return Ok(true);
  }

  info!("updating {}", path.display());
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, contents)?;
  Ok(true)
}

fn normalize_newlines(s: &str) -> String { s.replace("\r\n", "\n") }
