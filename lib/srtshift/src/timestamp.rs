use std::fmt::{Display, Formatter};
use std::num::IntErrorKind;
use std::str::FromStr;

use crate::error::OffsetError;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// A point on a subtitle timeline in milliseconds.
///
/// Negative values are valid. They show up when a shift moves a cue before zero and are
/// printed with a leading `-`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
  pub const fn from_millis(millis: i64) -> Self {
    Self(millis)
  }

  /// Combines clock components into a timestamp. Returns `None` if the result does not fit.
  pub fn from_parts(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Option<Self> {
    hours
      .checked_mul(MS_PER_HOUR)?
      .checked_add(minutes.checked_mul(MS_PER_MINUTE)?)?
      .checked_add(seconds.checked_mul(MS_PER_SECOND)?)?
      .checked_add(millis)
      .map(Self)
  }

  /// Applies `offset`. The result may be negative; `None` only if it leaves the `i64` range.
  pub fn checked_add(self, offset: Offset) -> Option<Self> {
    self.0.checked_add(offset.0).map(Self)
  }

  pub const fn is_negative(self) -> bool {
    self.0 < 0
  }
}

impl Display for Timestamp {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let total = self.0.unsigned_abs();
    let millis = total % 1000;
    let seconds = total / 1000 % 60;
    let minutes = total / 60_000 % 60;
    let hours = total / 3_600_000;

    if self.is_negative() {
      f.write_str("-")?;
    }

    write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
  }
}

/// Signed millisecond delta applied to every timestamp of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset(i64);

impl Offset {
  pub const fn from_millis(millis: i64) -> Self {
    Self(millis)
  }
}

impl Display for Offset {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:+} ms", self.0)
  }
}

impl FromStr for Offset {
  type Err = OffsetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.trim().parse::<i64>().map(Offset).map_err(|err| match err.kind() {
      IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
        OffsetError::OutOfRange(s.to_string())
      }
      _ => OffsetError::InvalidFormat(s.to_string()),
    })
  }
}
