use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

/// Turn the tail of a `Created:` header into a sortable timestamp.
///
/// Editorial text around the date is ignored. When there is no `DD-Month-YYYY` triple at all
/// (or no `Created:` line), the document is considered old and gets [`epoch`]. A triple whose
/// month word is not a month name is an error.
pub fn normalize_created(raw: Option<&str>) -> Result<NaiveDateTime> {
    static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}-\w+-\d{4})").unwrap());

    let Some(m) = raw.and_then(|s| DATE_RE.find(s)) else {
        debug!(?raw, "no creation date, falling back to epoch");
        return Ok(epoch());
    };
    let date = m.as_str();

    // chrono's %b also takes full names, %B is kept for parity with strptime-style inputs.
    NaiveDate::parse_from_str(date, "%d-%b-%Y")
        .or_else(|_| NaiveDate::parse_from_str(date, "%d-%B-%Y"))
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::UnparseableDate {
            raw: date.to_string(),
        })
}

/// Local wall-clock reading of Unix time zero.
pub fn epoch() -> NaiveDateTime {
    Local
        .from_utc_datetime(&NaiveDateTime::default())
        .naive_local()
}
