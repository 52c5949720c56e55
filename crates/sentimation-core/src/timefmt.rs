use chrono::{
  DateTime,
  Local,
  NaiveDateTime,
  TimeZone,
  Utc
};

const NAIVE_FORMATS: [&str; 4] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M"
];

pub const ABSOLUTE_FORMAT: &str =
  "%Y-%m-%d %H:%M:%S";

/// Parses the timestamps the backend and the `datetime-local` input
/// produce.
///
/// RFC 3339 values keep their offset. Naive values are read as local time,
/// which is what both the backend and the form input mean by them.
#[must_use]
pub fn parse_timestamp(
  raw: &str
) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(dt) =
    DateTime::parse_from_rfc3339(raw)
  {
    return Some(dt.with_timezone(&Utc));
  }

  NAIVE_FORMATS.iter().find_map(|fmt| {
    let naive =
      NaiveDateTime::parse_from_str(
        raw, fmt
      )
      .ok()?;
    Local
      .from_local_datetime(&naive)
      .earliest()
      .map(|local| {
        local.with_timezone(&Utc)
      })
  })
}

/// Buckets `now - then` into a short human label.
///
/// Anything under a minute, including timestamps in the future, is
/// "Just now". There is no upper bucket; old dates keep counting days.
#[must_use]
pub fn format_relative_time(
  then: DateTime<Utc>,
  now: DateTime<Utc>
) -> String {
  let seconds =
    now.signed_duration_since(then)
      .num_seconds();

  if seconds < 60 {
    "Just now".to_string()
  } else if seconds < 3_600 {
    plural(seconds / 60, "minute")
  } else if seconds < 86_400 {
    plural(seconds / 3_600, "hour")
  } else {
    plural(seconds / 86_400, "day")
  }
}

#[must_use]
pub fn format_date_time(
  then: DateTime<Utc>
) -> String {
  then
    .with_timezone(&Local)
    .format(ABSOLUTE_FORMAT)
    .to_string()
}

/// Relative label for a raw timestamp, or the raw text when it does not
/// parse.
#[must_use]
pub fn relative_label(
  raw: &str,
  now: DateTime<Utc>
) -> String {
  match parse_timestamp(raw) {
    | Some(then) => {
      format_relative_time(then, now)
    }
    | None => raw.to_string()
  }
}

/// Absolute label for a raw timestamp, or the raw text when it does not
/// parse.
#[must_use]
pub fn absolute_label(raw: &str) -> String {
  match parse_timestamp(raw) {
    | Some(then) => format_date_time(then),
    | None => raw.to_string()
  }
}

fn plural(count: i64, unit: &str) -> String {
  if count == 1 {
    format!("{count} {unit} ago")
  } else {
    format!("{count} {unit}s ago")
  }
}
