use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::cue::CueLine;
use crate::error::ShiftError;
use crate::job::FileJob;
use crate::timestamp::Offset;

/// Outcome of shifting one stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
  pub lines: usize,
  pub cues: usize,
  /// 1-based numbers of the lines that ended up with a negative timestamp.
  pub negative_lines: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
  pub input: PathBuf,
  pub output: PathBuf,
  pub in_place: bool,
  pub stream: StreamReport,
}

/// Applies a fixed offset to every cue timing line it sees.
#[derive(Clone, Copy, Debug)]
pub struct Shifter {
  offset: Offset,
}

impl Shifter {
  pub fn new(offset: Offset) -> Self {
    Self { offset }
  }

  /// Copies `reader` to `writer` line by line, shifting cue timing lines and passing
  /// everything else through. Output lines always end in `\n`.
  ///
  /// `target` is only used to name the file in negative timestamp warnings.
  pub fn shift_stream<R: BufRead, W: Write>(
    &self,
    reader: R,
    mut writer: W,
    target: &Path,
  ) -> io::Result<StreamReport> {
    let mut report = StreamReport::default();

    for (index, line) in reader.split(b'\n').enumerate() {
      let mut line = line?;
      let line_number = index + 1;

      if line.last() == Some(&b'\r') {
        line.pop();
      }

      match CueLine::parse(&line).and_then(|cue| cue.shifted(self.offset)) {
        Some(cue) => {
          if cue.has_negative() {
            warn!(
              "shifting produced a negative timestamp in {}, line #{}",
              target.display(),
              line_number
            );
            report.negative_lines.push(line_number);
          }

          write!(writer, "{}", cue)?;
          report.cues += 1;
        }
        None => writer.write_all(&line)?,
      }

      writer.write_all(b"\n")?;
      report.lines = line_number;
    }

    writer.flush()?;

    Ok(report)
  }

  pub fn shift_file(&self, job: &FileJob) -> Result<FileReport, ShiftError> {
    debug!(
      "shifting {} -> {}",
      job.input.display(),
      job.output.display()
    );

    let input = File::open(&job.input).map_err(|source| ShiftError::OpenInput {
      path: job.input.clone(),
      source,
    })?;
    let reader = BufReader::new(input);

    let stream = if job.in_place {
      self.shift_in_place(reader, job)?
    } else {
      let output = File::create(&job.output).map_err(|source| ShiftError::CreateOutput {
        path: job.output.clone(),
        source,
      })?;

      self
        .shift_stream(reader, BufWriter::new(output), &job.output)
        .map_err(|source| ShiftError::Io {
          path: job.input.clone(),
          source,
        })?
    };

    Ok(FileReport {
      input: job.input.clone(),
      output: job.output.clone(),
      in_place: job.in_place,
      stream,
    })
  }

  fn shift_in_place(
    &self,
    reader: BufReader<File>,
    job: &FileJob,
  ) -> Result<StreamReport, ShiftError> {
    let directory = match job.input.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(directory).map_err(|source| ShiftError::CreateOutput {
      path: directory.to_path_buf(),
      source,
    })?;

    let io_error = |source| ShiftError::Io {
      path: job.input.clone(),
      source,
    };

    let mut writer = BufWriter::new(temp);
    let report = self
      .shift_stream(reader, &mut writer, &job.input)
      .map_err(io_error)?;
    let temp = writer
      .into_inner()
      .map_err(|err| io_error(err.into_error()))?;

    let replace_error = |source| ShiftError::Replace {
      path: job.input.clone(),
      source,
    };

    let permissions = fs::metadata(&job.input).map_err(replace_error)?.permissions();
    temp
      .as_file()
      .set_permissions(permissions)
      .map_err(replace_error)?;

    // the input reader was moved into shift_stream and is closed by now
    temp
      .persist(&job.input)
      .map_err(|err| replace_error(err.error))?;

    Ok(report)
  }

  /// Shifts every job in order and stops at the first error. Files finished before the
  /// failure stay written.
  pub fn run<'a, I, F>(&self, jobs: I, mut on_file: F) -> Result<Vec<FileReport>, ShiftError>
  where
    I: IntoIterator<Item = &'a FileJob>,
    F: FnMut(&FileReport),
  {
    let mut reports = Vec::new();

    for job in jobs {
      let report = self.shift_file(job)?;
      on_file(&report);
      reports.push(report);
    }

    Ok(reports)
  }
}
