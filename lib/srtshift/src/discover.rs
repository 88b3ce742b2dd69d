use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::ShiftConfig;
use crate::error::DiscoverError;

pub const SUPPORTED_EXTENSION: &str = "srt";

/// Expands the given paths into the ordered list of subtitle files to shift.
///
/// Directories contribute their regular files, sorted by name, recursively when
/// `config.recurse` is set. Every file is validated; invalid ones fail the whole call
/// unless `config.ignore_invalid` is set, in which case they are skipped. Paths that are
/// neither a file nor a directory always fail.
pub fn collect<P: AsRef<Path>>(
  paths: &[P],
  config: &ShiftConfig,
) -> Result<Vec<PathBuf>, DiscoverError> {
  let mut files = Vec::new();

  for path in paths {
    let path = strip_unexpanded_glob(path.as_ref());

    if path.is_file() {
      push_if_valid(&mut files, path, config)?;
    } else if path.is_dir() {
      let max_depth = if config.recurse { usize::MAX } else { 1 };

      for entry in WalkDir::new(&path)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
      {
        let entry = entry?;
        if entry.file_type().is_file() {
          push_if_valid(&mut files, entry.into_path(), config)?;
        }
      }
    } else {
      return Err(DiscoverError::NotFound(path));
    }
  }

  if files.is_empty() {
    return Err(DiscoverError::NoFiles);
  }

  Ok(files)
}

/// Checks that `path` is a subtitle file we can read, and write when modifying in place.
pub fn validate(path: &Path, config: &ShiftConfig) -> Result<(), DiscoverError> {
  let supported = path
    .extension()
    .is_some_and(|extension| extension.eq_ignore_ascii_case(SUPPORTED_EXTENSION));
  if !supported {
    return Err(DiscoverError::UnsupportedExtension(path.to_path_buf()));
  }

  File::open(path).map_err(|source| DiscoverError::Unreadable {
    path: path.to_path_buf(),
    source,
  })?;

  if config.modify() {
    let metadata = fs::metadata(path).map_err(|source| DiscoverError::Unreadable {
      path: path.to_path_buf(),
      source,
    })?;

    if metadata.permissions().readonly() {
      return Err(DiscoverError::ReadOnly(path.to_path_buf()));
    }
  }

  Ok(())
}

fn push_if_valid(
  files: &mut Vec<PathBuf>,
  path: PathBuf,
  config: &ShiftConfig,
) -> Result<(), DiscoverError> {
  match validate(&path, config) {
    Ok(()) => files.push(path),
    Err(err) if config.ignore_invalid => debug!("skipping {}: {}", path.display(), err),
    Err(err) => return Err(err),
  }

  Ok(())
}

// `dir/*` reaches us verbatim when the shell had nothing to expand it to
fn strip_unexpanded_glob(path: &Path) -> PathBuf {
  match path.file_name() {
    Some(name) if name == "*" => match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    },
    _ => path.to_path_buf(),
  }
}
