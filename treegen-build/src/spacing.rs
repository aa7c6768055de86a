use std::fmt;

/// Tracks the indentation of the code being written.
///
/// The indent string is rebuilt only when the level changes, so `spc()` can
/// be called for every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spacing {
  amount: usize,
  level:  usize,
  spc:    String,
}

impl Spacing {
  pub fn new(amount: usize) -> Self { Spacing::at(amount, 0) }

  pub fn at(amount: usize, level: usize) -> Self {
    Spacing { amount, level, spc: " ".repeat(amount * level) }
  }

  pub fn level(&self) -> usize { self.level }
  pub fn spc(&self) -> &str { &self.spc }

  /// Moves the level by `delta`. The level never goes below zero.
  pub fn update(&mut self, delta: isize) {
    self.level = self.level.saturating_add_signed(delta);
    self.spc = " ".repeat(self.amount * self.level);
  }

  /// Runs `f` one level deeper, and restores the level afterwards.
  pub fn nested<T>(&mut self, f: impl FnOnce(&mut Spacing) -> T) -> T {
    self.update(1);
    let res = f(self);
    self.update(-1);
    res
  }
}

impl fmt::Display for Spacing {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.spc) }
}
