pub use config::{OutputMode, ShiftConfig};
pub use cue::CueLine;
pub use error::{DiscoverError, Error, OffsetError, ShiftError};
pub use job::FileJob;
pub use shift::{FileReport, Shifter, StreamReport};
pub use timestamp::{Offset, Timestamp};

pub mod config;
pub mod cue;
pub mod discover;
pub mod error;
pub mod job;
pub mod shift;
pub mod timestamp;

/// Discovers the subtitle files behind `paths` and shifts them according to `config`.
///
/// Stops at the first failing file. `on_file` is called after every file that was written.
pub fn shift_paths<P, F>(
  paths: &[P],
  config: &ShiftConfig,
  on_file: F,
) -> Result<Vec<FileReport>, Error>
where
  P: AsRef<std::path::Path>,
  F: FnMut(&FileReport),
{
  let inputs = discover::collect(paths, config)?;
  let jobs = FileJob::plan_all(inputs, &config.output);

  Ok(Shifter::new(config.offset).run(&jobs, on_file)?)
}
