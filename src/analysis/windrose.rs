//! Wind-rose occupancy table: wind observations binned by compass sector
//! and speed class, expressed as percentages of the total.

use polars::frame::DataFrame;
use polars::prelude::*;

/// Speed classes in m/s. The upper fence at 50 mirrors the logger's range;
/// anything faster is instrument noise and falls out of the table.
const SPEED_BIN_EDGES: [f64; 9] = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 50.0];

pub const SPEED_BIN_LABELS: [&str; 8] =
    ["0-2", "2-4", "4-6", "6-8", "8-10", "10-12", "12-14", ">14+"];

/// The sixteen 22.5-degree compass sectors, north first.
pub const DIRECTION_LABELS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Bins `speed_column` against `direction_column` and returns a table with
/// `direction`, `speed` and `frequency` columns, one row per (sector, speed
/// class) cell in sector-major order. `frequency` is the cell's share of
/// the binned observations as a percentage; rows with a null or
/// out-of-range value in either column are left out of the total.
pub fn windrose_table(
    frame: &DataFrame,
    direction_column: &str,
    speed_column: &str,
) -> PolarsResult<DataFrame> {
    let direction = frame
        .column(direction_column)?
        .cast(&DataType::Float64)?;
    let direction = direction.f64()?;
    let speed = frame.column(speed_column)?.cast(&DataType::Float64)?;
    let speed = speed.f64()?;

    let mut counts = [[0u32; SPEED_BIN_LABELS.len()]; DIRECTION_LABELS.len()];
    let mut total = 0u64;
    for row in 0..frame.height() {
        let (Some(deg), Some(mps)) = (direction.get(row), speed.get(row)) else {
            continue;
        };
        let (Some(sector), Some(class)) = (direction_bin(deg), speed_bin(mps)) else {
            continue;
        };
        counts[sector][class] += 1;
        total += 1;
    }

    let cells = DIRECTION_LABELS.len() * SPEED_BIN_LABELS.len();
    let mut directions = Vec::with_capacity(cells);
    let mut speeds = Vec::with_capacity(cells);
    let mut frequencies = Vec::with_capacity(cells);
    for (sector, sector_label) in DIRECTION_LABELS.iter().enumerate() {
        for (class, class_label) in SPEED_BIN_LABELS.iter().enumerate() {
            directions.push(*sector_label);
            speeds.push(*class_label);
            let share = if total == 0 {
                0.0
            } else {
                100.0 * f64::from(counts[sector][class]) / total as f64
            };
            frequencies.push(share);
        }
    }

    DataFrame::new(vec![
        Column::new("direction".into(), directions),
        Column::new("speed".into(), speeds),
        Column::new("frequency".into(), frequencies),
    ])
}

/// Sectors are left-open intervals: a reading of exactly 0 falls outside,
/// 360 lands in the last sector.
fn direction_bin(degrees: f64) -> Option<usize> {
    if !(degrees > 0.0 && degrees <= 360.0) {
        return None;
    }
    let sector = (degrees / 22.5).ceil() as usize - 1;
    Some(sector.min(DIRECTION_LABELS.len() - 1))
}

fn speed_bin(mps: f64) -> Option<usize> {
    SPEED_BIN_EDGES
        .windows(2)
        .position(|edges| mps > edges[0] && mps <= edges[1])
}
