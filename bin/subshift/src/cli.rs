use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing::debug;

use srtshift::{FileReport, Offset, OutputMode, ShiftConfig};

fn parse_offset(value: &str) -> Result<Offset, String> {
  value.parse().map_err(|err: srtshift::OffsetError| err.to_string())
}

fn existing_directory(value: &str) -> Result<PathBuf, String> {
  let path = PathBuf::from(value);
  if path.is_dir() {
    Ok(path)
  } else {
    Err(format!("invalid directory \"{}\"", value))
  }
}

/// Shifts the timestamps of SubRip (.srt) subtitles by a fixed number of milliseconds.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Subshift {
  /// Milliseconds to add to every timestamp, may be negative
  #[arg(value_name = "OFFSET_MS", allow_negative_numbers = true, value_parser = parse_offset)]
  offset: Offset,
  /// Subtitle files or directories containing them
  #[arg(value_name = "PATH", required = true)]
  paths: Vec<PathBuf>,
  /// Modify the file(s) instead of creating new file(s) with the shifted subtitles
  #[arg(short, long, conflicts_with = "destination")]
  modify: bool,
  /// Set destination directory for output files
  #[arg(short, long, value_name = "DIR", value_parser = existing_directory)]
  destination: Option<PathBuf>,
  /// Recursively add files in a directory and its subdirectories
  #[arg(short, long)]
  recursive: bool,
  /// Ignore invalid files provided with <PATH>
  #[arg(short, long)]
  ignore_invalid: bool,
  /// More log output, repeat for even more
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub(crate) verbose: u8,
}

impl Subshift {
  pub fn config(&self) -> ShiftConfig {
    let output = match (&self.destination, self.modify) {
      (_, true) => OutputMode::InPlace,
      (Some(destination), false) => OutputMode::Destination(destination.clone()),
      (None, false) => OutputMode::Sibling,
    };

    ShiftConfig {
      offset: self.offset,
      output,
      recurse: self.recursive,
      ignore_invalid: self.ignore_invalid,
    }
  }

  pub fn execute(&self) -> anyhow::Result<()> {
    let config = self.config();
    debug!("{:?}", config);

    let reports = srtshift::shift_paths(&self.paths, &config, print_report)
      .with_context(|| format!("shifting by {} failed", config.offset))?;

    let negative: usize = reports
      .iter()
      .map(|report| report.stream.negative_lines.len())
      .sum();

    println!();
    println!(
      "Shifted {} file(s) by {}{}",
      reports.len().to_string().bold(),
      config.offset.to_string().bold(),
      if negative > 0 {
        format!(", {} line(s) with negative timestamps", negative)
          .bright_yellow()
          .to_string()
      } else {
        String::new()
      }
    );

    Ok(())
  }
}

fn print_report(report: &FileReport) {
  let line = if report.in_place {
    format!("{} {}", "Modified".bright_green(), report.input.display())
  } else {
    format!(
      "{} {} -> {}",
      "Shifted".bright_green(),
      report.input.display(),
      report.output.display()
    )
  };

  match report.stream.negative_lines.len() {
    0 => println!("{}", line),
    count => println!(
      "{} {}",
      line,
      format!("({} line(s) with negative timestamps)", count).bright_yellow()
    ),
  }
}
