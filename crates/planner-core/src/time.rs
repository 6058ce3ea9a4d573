//! Date and instant parsing for inbound request fields.
//!
//! Instants arrive as RFC 3339 strings with `Z` or an explicit offset.
//! Dates accept either a bare `YYYY-MM-DD` or a full instant, in which case
//! the date component is extracted. Empty input means "field not supplied"
//! and parses to `None`; non-empty input that fits neither form is an
//! error.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Error, Result};

/// Parse a calendar date from a request field.
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>> {
  if input.is_empty() {
    return Ok(None);
  }
  if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
    return Ok(Some(instant.date_naive()));
  }
  NaiveDate::parse_from_str(input, "%Y-%m-%d")
    .map(Some)
    .map_err(|_| Error::InvalidDate(input.to_owned()))
}

/// Parse an offset-aware instant from a request field, normalised to UTC.
pub fn parse_instant(input: &str) -> Result<Option<DateTime<Utc>>> {
  if input.is_empty() {
    return Ok(None);
  }
  DateTime::parse_from_rfc3339(input)
    .map(|dt| Some(dt.with_timezone(&Utc)))
    .map_err(|_| Error::InvalidInstant(input.to_owned()))
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, TimeZone, Utc};

  use super::*;

  #[test]
  fn bare_date_parses() {
    assert_eq!(
      parse_date("2025-03-01").unwrap(),
      NaiveDate::from_ymd_opt(2025, 3, 1)
    );
  }

  #[test]
  fn instant_form_extracts_date_component() {
    assert_eq!(
      parse_date("2025-03-01T18:30:00Z").unwrap(),
      NaiveDate::from_ymd_opt(2025, 3, 1)
    );
  }

  #[test]
  fn empty_date_is_absent() {
    assert_eq!(parse_date("").unwrap(), None);
  }

  #[test]
  fn garbage_date_is_an_error() {
    assert!(parse_date("next tuesday").is_err());
  }

  #[test]
  fn zulu_instant_parses_to_utc() {
    let expected = Utc.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap();
    assert_eq!(parse_instant("2025-03-01T18:30:00Z").unwrap(), Some(expected));
  }

  #[test]
  fn explicit_offset_normalises_to_utc() {
    let expected = Utc.with_ymd_and_hms(2025, 3, 1, 16, 30, 0).unwrap();
    assert_eq!(
      parse_instant("2025-03-01T18:30:00+02:00").unwrap(),
      Some(expected)
    );
  }

  #[test]
  fn empty_instant_is_absent() {
    assert_eq!(parse_instant("").unwrap(), None);
  }

  #[test]
  fn instant_roundtrip_is_stable() {
    // parse → serialize → parse yields the same instant.
    let parsed = parse_instant("2025-03-01T18:30:00+02:00").unwrap().unwrap();
    let reparsed = parse_instant(&parsed.to_rfc3339()).unwrap().unwrap();
    assert_eq!(parsed, reparsed);
  }
}
