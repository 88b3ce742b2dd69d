use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::OutputMode;

const SHIFTED_SUFFIX: &str = "_shifted";

/// One input file together with the path its shifted version is written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileJob {
  pub input: PathBuf,
  pub output: PathBuf,
  pub in_place: bool,
}

impl FileJob {
  pub fn plan(input: impl Into<PathBuf>, mode: &OutputMode) -> Self {
    let input = input.into();

    let (output, in_place) = match mode {
      OutputMode::Sibling => (input.with_file_name(shifted_file_name(&input)), false),
      OutputMode::Destination(directory) => (directory.join(shifted_file_name(&input)), false),
      OutputMode::InPlace => (input.clone(), true),
    };

    Self {
      input,
      output,
      in_place,
    }
  }

  pub fn plan_all<I, P>(inputs: I, mode: &OutputMode) -> Vec<Self>
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    inputs
      .into_iter()
      .map(|input| Self::plan(input, mode))
      .collect()
  }
}

fn shifted_file_name(input: &Path) -> OsString {
  let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
  name.push(SHIFTED_SUFFIX);

  if let Some(extension) = input.extension() {
    name.push(".");
    name.push(extension);
  }

  name
}
