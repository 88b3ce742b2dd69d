use std::path::{Path, PathBuf};

use crate::timestamp::Offset;

/// Where the shifted version of each input ends up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
  /// `<stem>_shifted<ext>` next to the input.
  #[default]
  Sibling,
  /// `<stem>_shifted<ext>` inside the given directory.
  Destination(PathBuf),
  /// Atomically replace the input.
  InPlace,
}

/// Everything a run needs, resolved once from the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftConfig {
  pub offset: Offset,
  pub output: OutputMode,
  pub recurse: bool,
  pub ignore_invalid: bool,
}

impl ShiftConfig {
  pub fn new(offset: Offset) -> Self {
    Self {
      offset,
      ..Default::default()
    }
  }

  pub fn modify(&self) -> bool {
    self.output == OutputMode::InPlace
  }

  pub fn destination(&self) -> Option<&Path> {
    match &self.output {
      OutputMode::Destination(path) => Some(path),
      _ => None,
    }
  }
}
