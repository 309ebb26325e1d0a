//! Type coercion for the demographic and metadata columns.
//!
//! Form exports write timestamps like `2024/03/01 9:15:00 CH GMT+7` and GPA
//! either as a number (sometimes with a decimal comma) or as one of the
//! questionnaire's range labels. Anything that cannot be read becomes null.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use polars::prelude::{AnyValue, DataFrame};
use regex::Regex;
use tracing::{debug, info};

use survey_ingest::{any_to_f64, any_to_string, parse_f64};
use survey_model::Result;
use survey_model::schema::{DEM_GPA, GPA_RANGE, TIMESTAMP};
use survey_standards::SurveyStandards;

use crate::frame::{set_f64_column, set_string_column};

/// Canonical timestamp layout.
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static MERIDIEM_SUFFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(SA|CH|AM|PM)(?:\s+GMT[+-]\d{1,2}(?::?\d{2})?)?$").ok()
});
static ZONE_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\s+GMT[+-]\d{1,2}(?::?\d{2})?$").ok());

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Morning,
    Afternoon,
}

fn split_meridiem(raw: &str) -> (&str, Option<Meridiem>) {
    if let Some(regex) = MERIDIEM_SUFFIX.as_ref()
        && let Some(captures) = regex.captures(raw)
        && let (Some(whole), Some(marker)) = (captures.get(0), captures.get(1))
    {
        let meridiem = match marker.as_str().to_uppercase().as_str() {
            "CH" | "PM" => Meridiem::Afternoon,
            _ => Meridiem::Morning,
        };
        return (&raw[..whole.start()], Some(meridiem));
    }
    if let Some(regex) = ZONE_SUFFIX.as_ref()
        && let Some(whole) = regex.find(raw)
    {
        return (&raw[..whole.start()], None);
    }
    (raw, None)
}

fn apply_meridiem(value: NaiveDateTime, meridiem: Option<Meridiem>) -> Option<NaiveDateTime> {
    match (meridiem, value.hour()) {
        (Some(Meridiem::Afternoon), hour) if hour < 12 => value.with_hour(hour + 12),
        (Some(Meridiem::Morning), 12) => value.with_hour(0),
        _ => Some(value),
    }
}

/// Parse a form timestamp. Returns `None` when no known layout matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (body, meridiem) = split_meridiem(trimmed);
    let body = body.trim();
    for layout in DATETIME_LAYOUTS {
        if let Ok(value) = NaiveDateTime::parse_from_str(body, layout) {
            return apply_meridiem(value, meridiem);
        }
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(body, layout).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(ISO_TIMESTAMP_FORMAT).to_string()
}

/// Read a GPA answer: a plain number, a decimal-comma number or a range label.
/// Values outside 0..10 are rejected.
pub fn parse_gpa(raw: &str, standards: &SurveyStandards) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = parse_f64(trimmed)
        .or_else(|| parse_f64(&trimmed.replace(',', ".")))
        .or_else(|| standards.gpa_label_value(trimmed))?;
    GPA_RANGE.contains(&value).then_some(value)
}

/// Rewrite `timestamp` as ISO-8601 text. Returns the number of values that
/// could not be parsed.
pub fn coerce_timestamps(df: &mut DataFrame) -> Result<usize> {
    let Ok(column) = df.column(TIMESTAMP) else {
        return Ok(0);
    };
    let mut unparsed = 0usize;
    let values: Vec<Option<String>> = (0..df.height())
        .map(|idx| {
            let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if raw.trim().is_empty() {
                return None;
            }
            let parsed = parse_timestamp(&raw).map(format_timestamp);
            if parsed.is_none() {
                unparsed += 1;
            }
            parsed
        })
        .collect();
    set_string_column(df, TIMESTAMP, values)?;
    Ok(unparsed)
}

/// Rewrite `dem_gpa` as a float column. Returns the number of non-empty
/// values that became null.
pub fn coerce_gpa(df: &mut DataFrame, standards: &SurveyStandards) -> Result<usize> {
    let Ok(column) = df.column(DEM_GPA) else {
        return Ok(0);
    };
    let mut rejected = 0usize;
    let values: Vec<Option<f64>> = (0..df.height())
        .map(|idx| {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            if matches!(value, AnyValue::Null) {
                return None;
            }
            let parsed = match value {
                AnyValue::String(text) => parse_gpa(text, standards),
                AnyValue::StringOwned(ref text) => parse_gpa(text, standards),
                other => any_to_f64(other).filter(|gpa| GPA_RANGE.contains(gpa)),
            };
            if parsed.is_none() {
                rejected += 1;
            }
            parsed
        })
        .collect();
    set_f64_column(df, DEM_GPA, values)?;
    Ok(rejected)
}

/// Counts of values nulled during coercion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoerceSummary {
    pub timestamps_unparsed: usize,
    pub gpa_rejected: usize,
}

pub fn coerce_types(df: &mut DataFrame, standards: &SurveyStandards) -> Result<CoerceSummary> {
    let summary = CoerceSummary {
        timestamps_unparsed: coerce_timestamps(df)?,
        gpa_rejected: coerce_gpa(df, standards)?,
    };
    if summary.timestamps_unparsed > 0 || summary.gpa_rejected > 0 {
        info!(
            timestamps_unparsed = summary.timestamps_unparsed,
            gpa_rejected = summary.gpa_rejected,
            "malformed values coerced to null"
        );
    } else {
        debug!("type coercion complete");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(raw: &str) -> Option<String> {
        parse_timestamp(raw).map(format_timestamp)
    }

    #[test]
    fn form_timestamps_honour_the_meridiem() {
        assert_eq!(
            iso("2024/03/01 9:15:00 SA GMT+7").as_deref(),
            Some("2024-03-01T09:15:00")
        );
        assert_eq!(
            iso("2024/03/01 1:05:30 CH GMT+7").as_deref(),
            Some("2024-03-01T13:05:30")
        );
        assert_eq!(
            iso("2024/03/01 12:00:00 SA GMT+7").as_deref(),
            Some("2024-03-01T00:00:00")
        );
        assert_eq!(
            iso("2024/03/01 12:30:00 PM").as_deref(),
            Some("2024-03-01T12:30:00")
        );
    }

    #[test]
    fn plain_layouts_parse() {
        assert_eq!(
            iso("2024-03-01 08:00:00").as_deref(),
            Some("2024-03-01T08:00:00")
        );
        assert_eq!(
            iso("2024-03-01T08:00:00").as_deref(),
            Some("2024-03-01T08:00:00")
        );
        assert_eq!(iso("15/04/2024").as_deref(), Some("2024-04-15T00:00:00"));
        assert_eq!(iso("2024/03/01 10:00:00 GMT+7").as_deref(), Some("2024-03-01T10:00:00"));
    }

    #[test]
    fn garbage_timestamps_are_rejected() {
        assert_eq!(iso("hôm qua"), None);
        assert_eq!(iso(""), None);
        assert_eq!(iso("2024/13/45 10:00:00"), None);
    }

    #[test]
    fn gpa_accepts_commas_and_labels() {
        let standards = SurveyStandards::builtin();
        assert_eq!(parse_gpa("7.25", &standards), Some(7.25));
        assert_eq!(parse_gpa("6,4", &standards), Some(6.4));
        assert_eq!(parse_gpa("(7.0 - 8.0]", &standards), Some(7.5));
        assert_eq!(parse_gpa(">= 9.0", &standards), Some(9.5));
        assert_eq!(parse_gpa("11", &standards), None);
        assert_eq!(parse_gpa("-1", &standards), None);
        assert_eq!(parse_gpa("không nhớ", &standards), None);
    }
}
