use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that can stop a whole run, from discovery to the last file.
#[derive(Error, Debug)]
pub enum Error {
  #[error(transparent)]
  Discover(#[from] DiscoverError),
  #[error(transparent)]
  Shift(#[from] ShiftError),
}

/// Fatal errors of a shift run. Any of these aborts the remaining job list.
#[derive(Error, Debug)]
pub enum ShiftError {
  #[error("cannot open input file `{}`", .path.display())]
  OpenInput { path: PathBuf, source: io::Error },
  #[error("cannot open output file `{}`", .path.display())]
  CreateOutput { path: PathBuf, source: io::Error },
  #[error("cannot replace `{}` with its shifted version", .path.display())]
  Replace { path: PathBuf, source: io::Error },
  #[error("i/o error while shifting `{}`", .path.display())]
  Io { path: PathBuf, source: io::Error },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
  #[error("invalid number \"{0}\"")]
  InvalidFormat(String),
  #[error("number is out of range: {0}")]
  OutOfRange(String),
}

#[derive(Error, Debug)]
pub enum DiscoverError {
  #[error("file type of `{}` is not supported, supported file types are: .srt", .0.display())]
  UnsupportedExtension(PathBuf),
  #[error("insufficient permissions to read file `{}`", .path.display())]
  Unreadable { path: PathBuf, source: io::Error },
  #[error("insufficient permissions to modify file `{}`", .0.display())]
  ReadOnly(PathBuf),
  #[error("invalid file/directory `{}`", .0.display())]
  NotFound(PathBuf),
  #[error(transparent)]
  Walk(#[from] walkdir::Error),
  #[error("no valid files provided")]
  NoFiles,
}
