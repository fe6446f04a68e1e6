//! Loads a headerless station-logger CSV, labels it from its metadata
//! sidecar, and normalizes the logger's local timestamps to UTC.

use chrono::{FixedOffset, NaiveDate, TimeZone};
use polars::frame::DataFrame;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use crate::stations::error::StationDataError;
use crate::stations::metadata::StationMetadata;

/// Loggers stamp rows in Mountain Standard Time year-round. The conversion
/// uses a fixed UTC-7 offset on purpose: a named zone would apply daylight
/// saving, which these stations never observe.
const MST_UTC_OFFSET_SECONDS: i32 = 7 * 3600;

/// Label the loggers use for the local-time hour column.
const LOCAL_HOUR_LABEL: &str = "hour (MST)";

const TIME_FIELDS: [&str; 5] = ["year", "month", "day", "hour", "minute"];

const DATETIME_COLUMN: &str = "datetime";

/// One station's observation table with its identity, location and the
/// units stripped from its column labels.
#[derive(Debug, Clone)]
pub struct StationObservations {
    pub site_name: String,
    pub location: HashMap<String, String>,
    /// Unit per column, `""` where the label carried none.
    pub units: HashMap<String, String>,
    /// One row per sample interval, `datetime` in UTC.
    pub frame: DataFrame,
}

impl StationObservations {
    /// Writes the processed table back out as CSV with a header row.
    pub fn write_csv(&self, path: &Path) -> Result<(), StationDataError> {
        let file = std::fs::File::create(path)
            .map_err(|e| StationDataError::CsvWriteIo(path.to_path_buf(), e))?;
        CsvWriter::new(file).finish(&mut self.frame.clone())?;
        Ok(())
    }
}

/// Loads `data_path` (headerless CSV) using the column labels and site
/// identity from `meta_path`.
///
/// The five `year, month, day, hour, minute` columns (the hour arrives
/// labelled `hour (MST)`) are combined into a UTC `datetime` column and then
/// dropped; trailing `(unit)` suffixes are stripped from the remaining
/// labels and recorded in [`StationObservations::units`].
pub fn load_station_csv(
    data_path: &Path,
    meta_path: &Path,
) -> Result<StationObservations, StationDataError> {
    let metadata = StationMetadata::from_file(meta_path)?;
    let mut frame = read_headerless_csv(data_path)?;

    if frame.width() != metadata.column_labels.len() {
        return Err(StationDataError::ColumnCountMismatch {
            path: data_path.to_path_buf(),
            expected: metadata.column_labels.len(),
            found: frame.width(),
        });
    }
    frame.set_column_names(metadata.column_labels.iter().map(String::as_str))?;

    if frame
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == LOCAL_HOUR_LABEL)
    {
        frame.rename(LOCAL_HOUR_LABEL, "hour".into())?;
    }

    let datetime = build_datetime_column(&frame, data_path)?;
    frame.with_column(datetime)?;
    let mut frame = frame.drop_many(TIME_FIELDS);

    let labels: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut units = HashMap::with_capacity(labels.len());
    let mut stripped = Vec::with_capacity(labels.len());
    for label in &labels {
        let (name, unit) = split_label(label);
        units.insert(name.to_string(), unit.to_string());
        stripped.push(name.to_string());
    }
    frame.set_column_names(stripped.iter().map(String::as_str))?;

    Ok(StationObservations {
        site_name: metadata.site_name,
        location: metadata.location,
        units,
        frame,
    })
}

fn read_headerless_csv(path: &Path) -> Result<DataFrame, StationDataError> {
    CsvReadOptions::default()
        .with_has_header(false)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| StationDataError::CsvReadPolars(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| StationDataError::CsvReadPolars(path.to_path_buf(), e))
}

/// Splits `"T_2m_c (degC)"` into `("T_2m_c", "degC")`; a label without a
/// unit suffix keeps its full text and gets an empty unit.
fn split_label(label: &str) -> (&str, &str) {
    match label.split_once(" (") {
        Some((name, rest)) => (name, rest.strip_suffix(')').unwrap_or(rest)),
        None => (label, ""),
    }
}

/// Builds the UTC `datetime` column from the five local-time component
/// columns, row by row through the fixed MST offset.
fn build_datetime_column(frame: &DataFrame, path: &Path) -> Result<Series, StationDataError> {
    let missing: Vec<&str> = TIME_FIELDS
        .iter()
        .copied()
        .filter(|field| frame.column(field).is_err())
        .collect();
    if !missing.is_empty() {
        return Err(StationDataError::MissingTimeFields {
            path: path.to_path_buf(),
            missing: missing.join(", "),
        });
    }

    let components = TIME_FIELDS
        .iter()
        .map(|field| frame.column(field).and_then(|c| c.cast(&DataType::Int64)))
        .collect::<Result<Vec<_>, _>>()?;
    let year = components[0].i64()?;
    let month = components[1].i64()?;
    let day = components[2].i64()?;
    let hour = components[3].i64()?;
    let minute = components[4].i64()?;

    let offset = mst_offset();
    let invalid = |row| StationDataError::InvalidTimestamp {
        path: path.to_path_buf(),
        row,
    };

    let mut stamps = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        let (Some(y), Some(mo), Some(d), Some(h), Some(mi)) = (
            year.get(row),
            month.get(row),
            day.get(row),
            hour.get(row),
            minute.get(row),
        ) else {
            return Err(invalid(row));
        };
        let local = NaiveDate::from_ymd_opt(y as i32, mo as u32, d as u32)
            .and_then(|date| date.and_hms_opt(h as u32, mi as u32, 0))
            .ok_or_else(|| invalid(row))?;
        let utc = offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| invalid(row))?
            .naive_utc();
        stamps.push(utc);
    }
    Ok(Series::new(DATETIME_COLUMN.into(), stamps))
}

fn mst_offset() -> FixedOffset {
    FixedOffset::west_opt(MST_UTC_OFFSET_SECONDS).expect("offset is within +/-24h")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const META: &str = "SND_opn = Snodgrass open site\n\
                        lat = 38.927\n\
                        lon = -106.978\n\
                        elevation = 3330\n\
                        1 = year\n\
                        2 = month\n\
                        3 = day\n\
                        4 = hour (MST)\n\
                        5 = minute\n\
                        6 = T_2m_c (degC)\n\
                        7 = batt_volt\n";

    #[test]
    fn local_hour_converts_to_utc_with_fixed_offset() {
        let meta = write_file(META);
        // 13:00 MST on a December day; a DST-aware zone would still be -7.
        // The same row in July must also convert with -7, never -6.
        let data = write_file("2021,12,3,13,0,5.5,12.4\n2021,7,3,13,0,21.0,12.8\n");

        let obs = load_station_csv(data.path(), meta.path()).unwrap();
        let datetimes = obs.frame.column("datetime").unwrap().datetime().unwrap();

        let expect_ms = |y: i32, mo: u32, d: u32, h: u32| {
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp_millis()
        };
        assert_eq!(datetimes.get(0).unwrap(), expect_ms(2021, 12, 3, 20));
        assert_eq!(datetimes.get(1).unwrap(), expect_ms(2021, 7, 3, 20));
    }

    #[test]
    fn time_component_columns_are_dropped() {
        let meta = write_file(META);
        let data = write_file("2021,12,3,13,0,5.5,12.4\n");

        let obs = load_station_csv(data.path(), meta.path()).unwrap();
        let names: Vec<String> = obs
            .frame
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, ["T_2m_c", "batt_volt", "datetime"]);
    }

    #[test]
    fn units_are_stripped_and_recorded() {
        let meta = write_file(META);
        let data = write_file("2021,12,3,13,0,5.5,12.4\n");

        let obs = load_station_csv(data.path(), meta.path()).unwrap();
        assert_eq!(obs.units["T_2m_c"], "degC");
        assert_eq!(obs.units["batt_volt"], "");
        assert_eq!(obs.site_name, "SND_opn");
        assert_eq!(obs.location["elevation"], "3330");
    }

    #[test]
    fn missing_time_column_is_an_error() {
        let meta = write_file(
            "SND_opn = site\n\
             lat = 1\n\
             lon = 2\n\
             elevation = 3\n\
             1 = year\n\
             2 = month\n\
             3 = day\n\
             4 = hour (MST)\n\
             5 = T_2m_c (degC)\n",
        );
        let data = write_file("2021,12,3,13,5.5\n");

        let err = load_station_csv(data.path(), meta.path()).unwrap_err();
        match err {
            StationDataError::MissingTimeFields { missing, .. } => {
                assert_eq!(missing, "minute");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn column_count_mismatch_is_an_error() {
        let meta = write_file(
            "SND_opn = site\n\
             lat = 1\n\
             lon = 2\n\
             elevation = 3\n\
             1 = year\n\
             2 = month\n",
        );
        let data = write_file("2021,12,3\n");

        let err = load_station_csv(data.path(), meta.path()).unwrap_err();
        assert!(matches!(
            err,
            StationDataError::ColumnCountMismatch {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn split_label_handles_both_shapes() {
        assert_eq!(split_label("T_2m_c (degC)"), ("T_2m_c", "degC"));
        assert_eq!(split_label("batt_volt"), ("batt_volt", ""));
        assert_eq!(split_label("datetime"), ("datetime", ""));
    }

    #[test]
    fn written_csv_carries_stripped_header() {
        let meta = write_file(META);
        let data = write_file("2021,12,3,13,0,5.5,12.4\n");
        let obs = load_station_csv(data.path(), meta.path()).unwrap();

        let out = NamedTempFile::new().unwrap();
        obs.write_csv(out.path()).unwrap();
        let text = std::fs::read_to_string(out.path()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "T_2m_c,batt_volt,datetime");
    }
}
