//! Flexible parsing for the date strings users hand to the archive query.
//!
//! Field logs and notebooks write dates every way imaginable, so the query
//! surface accepts a fixed set of layouts and tries them in priority order.
//! The first layout that consumes the whole string wins.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::archive::error::ArchiveError;

/// strftime layout used when reformatting a parsed date as a string.
pub const DEFAULT_OUTPUT_FORMAT: &str = "%Y%m%d";

/// Accepted layouts in priority order. The `bool` marks layouts that carry a
/// time-of-day suffix; date-only layouts resolve to midnight.
///
/// The doubled percent in the ninth entry is carried over verbatim from the
/// upstream ARM toolkit. It makes the layout match a literal `%H` instead of
/// an hour field, and since chrono refuses a datetime without an hour the
/// layout never matches anything. It stays in the list (and in the error
/// message) so accepted inputs line up with the published tool.
const DATE_LAYOUTS: [(&str, bool); 10] = [
    ("%Y-%m-%d", false),
    ("%d.%m.%Y", false),
    ("%d/%m/%Y", false),
    ("%Y%m%d", false),
    ("%Y/%m/%d", false),
    ("%Y-%m-%dT%H:%M:%S", true),
    ("%d.%m.%YT%H:%M:%S", true),
    ("%d/%m/%YT%H:%M:%S", true),
    ("%Y%m%dT%%H:%M:%S", true),
    ("%Y/%m/%dT%H:%M:%S", true),
];

/// Parses a date string in any of the accepted layouts into a
/// [`NaiveDateTime`].
///
/// Accepted layouts are `YYYY-MM-DD`, `DD.MM.YYYY`, `DD/MM/YYYY`, `YYYYMMDD`
/// and `YYYY/MM/DD`, each optionally followed by `THH:MM:SS`
/// (e.g. `2020-09-15T12:00:00`). Date-only inputs parse as midnight.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidDateFormat`] listing every accepted layout
/// when no layout matches. There is no partial matching or locale inference.
pub fn parse_date(text: &str) -> Result<NaiveDateTime, ArchiveError> {
    for (layout, has_time) in DATE_LAYOUTS {
        if has_time {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(text, layout) {
                return Ok(datetime);
            }
        } else if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }
    Err(ArchiveError::InvalidDateFormat {
        input: text.to_string(),
        accepted: accepted_layouts(),
    })
}

/// Parses `text` like [`parse_date`] and reformats it with `output_format`
/// (strftime syntax, typically [`DEFAULT_OUTPUT_FORMAT`]).
pub fn reformat_date(text: &str, output_format: &str) -> Result<String, ArchiveError> {
    Ok(parse_date(text)?.format(output_format).to_string())
}

fn accepted_layouts() -> String {
    DATE_LAYOUTS
        .iter()
        .map(|(layout, _)| *layout)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn date_only_layouts_parse_to_midnight() {
        for text in ["2020-09-15", "15.09.2020", "15/09/2020", "20200915", "2020/09/15"] {
            let parsed = parse_date(text).unwrap();
            assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2020, 9, 15).unwrap());
            assert_eq!(parsed.hour(), 0);
            assert_eq!(parsed.minute(), 0);
            assert_eq!(parsed.second(), 0);
        }
    }

    #[test]
    fn timestamped_layouts_keep_time_of_day() {
        for text in [
            "2020-09-15T12:30:45",
            "15.09.2020T12:30:45",
            "15/09/2020T12:30:45",
            "2020/09/15T12:30:45",
        ] {
            let parsed = parse_date(text).unwrap();
            assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2020, 9, 15).unwrap());
            assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (12, 30, 45));
        }
    }

    #[test]
    fn layouts_round_trip_through_reformat() {
        let cases = [
            ("2020-09-15", "%Y-%m-%d"),
            ("15.09.2020", "%d.%m.%Y"),
            ("15/09/2020", "%d/%m/%Y"),
            ("20200915", "%Y%m%d"),
            ("2020/09/15", "%Y/%m/%d"),
            ("2020-09-15T12:30:45", "%Y-%m-%dT%H:%M:%S"),
            ("15.09.2020T12:30:45", "%d.%m.%YT%H:%M:%S"),
            ("15/09/2020T12:30:45", "%d/%m/%YT%H:%M:%S"),
            ("2020/09/15T12:30:45", "%Y/%m/%dT%H:%M:%S"),
        ];
        for (text, layout) in cases {
            assert_eq!(reformat_date(text, layout).unwrap(), text);
        }
    }

    #[test]
    fn default_output_format_is_compact() {
        assert_eq!(reformat_date("2020-09-15", DEFAULT_OUTPUT_FORMAT).unwrap(), "20200915");
    }

    #[test]
    fn literal_percent_layout_never_matches() {
        // The carried-over upstream layout would only fit inputs containing
        // a literal "%H", and chrono refuses those without an hour field.
        let err = parse_date("20200915T%H:12:30").unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidDateFormat { .. }));
    }

    #[test]
    fn rejected_input_lists_all_layouts() {
        let err = parse_date("Sep 15 2020").unwrap_err();
        let message = err.to_string();
        for (layout, _) in DATE_LAYOUTS {
            assert!(message.contains(layout), "missing layout {layout} in {message}");
        }
    }
}
