use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use regex::bytes::{Captures, Regex};

use crate::timestamp::{Offset, Timestamp};

pub const ARROW: &str = " --> ";

// Hours: a single digit, two digits with a leading zero, or more digits without one.
const TIMESTAMP_PATTERN: &str =
  r"(0[0-9]|[1-9][0-9]+|[0-9]):([0-5][0-9]):([0-5][0-9]),([0-9]{3})";

fn cue_line_regex() -> &'static Regex {
  static REGEX: OnceLock<Regex> = OnceLock::new();
  REGEX.get_or_init(|| {
    Regex::new(&format!("^{TIMESTAMP_PATTERN}{ARROW}{TIMESTAMP_PATTERN}$"))
      .expect("cue line pattern is valid")
  })
}

/// The timing line of a cue, e.g. `00:00:01,000 --> 00:00:03,500`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CueLine {
  pub start: Timestamp,
  pub end: Timestamp,
}

impl CueLine {
  /// Parses a line without its line terminator. Anything that does not match the timing
  /// pattern exactly is payload and yields `None`.
  pub fn parse(line: &[u8]) -> Option<Self> {
    let captures = cue_line_regex().captures(line)?;

    Some(Self {
      start: timestamp_from_groups(&captures, 1)?,
      end: timestamp_from_groups(&captures, 5)?,
    })
  }

  /// Moves both timestamps by `offset`. `None` if either one leaves the `i64` range, in which
  /// case the line is kept as payload.
  pub fn shifted(self, offset: Offset) -> Option<Self> {
    Some(Self {
      start: self.start.checked_add(offset)?,
      end: self.end.checked_add(offset)?,
    })
  }

  pub fn has_negative(&self) -> bool {
    self.start.is_negative() || self.end.is_negative()
  }
}

impl Display for CueLine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}{}{}", self.start, ARROW, self.end)
  }
}

fn timestamp_from_groups(captures: &Captures, first: usize) -> Option<Timestamp> {
  let group = |index: usize| -> Option<i64> {
    let digits = captures.get(first + index)?.as_bytes();
    std::str::from_utf8(digits).ok()?.parse().ok()
  };

  Timestamp::from_parts(group(0)?, group(1)?, group(2)?, group(3)?)
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use crate::cue::CueLine;
  use crate::timestamp::{Offset, Timestamp};

  fn cue(start: i64, end: i64) -> CueLine {
    CueLine {
      start: Timestamp::from_millis(start),
      end: Timestamp::from_millis(end),
    }
  }

  #[test]
  fn test_parse() {
    assert_eq!(
      CueLine::parse(b"00:00:01,000 --> 00:00:03,500"),
      Some(cue(1_000, 3_500))
    );
    assert_eq!(
      CueLine::parse(b"01:02:03,004 --> 01:02:05,000"),
      Some(cue(3_723_004, 3_725_000))
    );
  }

  #[test]
  fn test_hour_field() {
    assert_eq!(
      CueLine::parse(b"100:00:00,000 --> 100:00:01,000"),
      Some(cue(360_000_000, 360_001_000))
    );
    assert_eq!(
      CueLine::parse(b"1:00:00,000 --> 1:00:01,000"),
      Some(cue(3_600_000, 3_601_000))
    );
    assert!(CueLine::parse(b"001:00:00,000 --> 01:00:01,000").is_none());
    assert!(CueLine::parse(b"010:00:00,000 --> 01:00:01,000").is_none());
    assert!(CueLine::parse(b":00:00,000 --> 01:00:01,000").is_none());
  }

  #[test]
  fn test_rejects_near_misses() {
    let near_misses: [&[u8]; 9] = [
      b"00:60:00,000 --> 00:00:01,000",
      b"00:00:60,000 --> 00:00:01,000",
      b"00:00:00,00 --> 00:00:01,000",
      b"00:00:00.000 --> 00:00:01,000",
      b"00:00:00,000 -> 00:00:01,000",
      b"00:00:00,000-->00:00:01,000",
      b" 00:00:00,000 --> 00:00:01,000",
      b"00:00:00,000 --> 00:00:01,000 X:10",
      b"00:00:00,000 --> 00:00:01,000\r",
    ];

    for line in near_misses {
      assert_eq!(CueLine::parse(line), None, "{}", String::from_utf8_lossy(line));
    }

    assert_eq!(CueLine::parse(b""), None);
    assert_eq!(CueLine::parse(b"Hello world"), None);
    assert_eq!(CueLine::parse(b"1"), None);
  }

  #[test]
  fn test_rejects_non_ascii_digits() {
    assert_eq!(
      CueLine::parse("٠٠:00:00,000 --> 00:00:01,000".as_bytes()),
      None
    );
  }

  #[test]
  fn test_hour_overflow_is_payload() {
    assert_eq!(
      CueLine::parse(b"99999999999999999999:00:00,000 --> 00:00:01,000"),
      None
    );
  }

  #[test]
  fn test_shift_and_display() {
    let shifted = cue(0, 1_000).shifted(Offset::from_millis(-2_000)).unwrap();
    assert!(shifted.has_negative());
    assert_eq!(shifted.to_string(), "-00:00:02,000 --> -00:00:01,000");

    let shifted = cue(1_000, 3_500).shifted(Offset::from_millis(500)).unwrap();
    assert!(!shifted.has_negative());
    assert_eq!(shifted.to_string(), "00:00:01,500 --> 00:00:04,000");

    assert!(cue(1_000, 3_000)
      .shifted(Offset::from_millis(-2_000))
      .unwrap()
      .has_negative());
  }

  #[test]
  fn test_shift_out_of_range() {
    assert_eq!(cue(0, i64::MAX).shifted(Offset::from_millis(1)), None);
    assert_eq!(cue(i64::MIN, 0).shifted(Offset::from_millis(-1)), None);
  }

  proptest! {
    #[test]
    fn test_round_trip(
      hours in 0i64..1_000,
      minutes in 0i64..60,
      seconds in 0i64..60,
      millis in 0i64..1_000,
    ) {
      let timestamp = Timestamp::from_parts(hours, minutes, seconds, millis).unwrap();
      let cue = CueLine { start: timestamp, end: timestamp };
      let line = cue.shifted(Offset::from_millis(0)).unwrap().to_string();

      prop_assert_eq!(CueLine::parse(line.as_bytes()), Some(cue));

      let (clock, ms) = line.split_once(" --> ").unwrap().0.split_once(',').unwrap();
      let parts: Vec<i64> = clock.split(':').map(|part| part.parse().unwrap()).collect();
      prop_assert_eq!(parts, vec![hours, minutes, seconds]);
      prop_assert_eq!(ms.parse::<i64>().unwrap(), millis);
    }
  }
}
