use std::fmt;

use parking_lot::Mutex;
use treegen_grammar::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub severity: Severity,
  pub message:  String,
  pub span:     Option<Span>,
}

/// Where the generator reports problems with its input.
pub trait Diagnostics {
  fn report(&self, severity: Severity, message: &str, span: Option<Span>);
}

/// Keeps every reported diagnostic, and logs it as it comes in.
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
  diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticsCollector {
  pub fn new() -> Self { DiagnosticsCollector::default() }

  pub fn diagnostics(&self) -> Vec<Diagnostic> { self.diagnostics.lock().clone() }

  pub fn error_count(&self) -> usize {
    self.diagnostics.lock().iter().filter(|d| d.severity == Severity::Error).count()
  }

  pub fn has_errors(&self) -> bool { self.error_count() > 0 }
}

impl Diagnostics for DiagnosticsCollector {
  fn report(&self, severity: Severity, message: &str, span: Option<Span>) {
    let diagnostic = Diagnostic { severity, message: message.to_string(), span };
    match severity {
      Severity::Info => info!("{diagnostic}"),
      Severity::Warning => warn!("{diagnostic}"),
      Severity::Error => error!("{diagnostic}"),
    }

    self.diagnostics.lock().push(diagnostic);
  }
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Info => write!(f, "info"),
      Severity::Warning => write!(f, "warning"),
      Severity::Error => write!(f, "error"),
    }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.severity, self.message)?;
    if let Some(span) = self.span {
      write!(f, " (at {span})")?;
    }
    Ok(())
  }
}
