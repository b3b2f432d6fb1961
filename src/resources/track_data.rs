//! Roller coaster data files.
//!
//! `roller_coaster_data.txt` starts with a header line followed by one pole
//! height per line. `runner_data.txt` holds one `x y z` runner vertex per
//! line. Both readers stop quietly at the end of input and stop with a warning
//! at the first row that does not parse. Rows beyond [`TRACK_CAPACITY`] are an
//! error rather than being dropped.

use std::path::Path;

use thiserror::Error;

use crate::resources::load_string;

pub const COASTER_DATA_FILE: &str = "roller_coaster_data.txt";
pub const RUNNER_DATA_FILE: &str = "runner_data.txt";

/// Fixed number of support poles and runner vertices the track holds.
pub const TRACK_CAPACITY: usize = 128;

#[derive(Debug, Error, PartialEq)]
pub enum DataFileError {
    #[error("{file} has more than {capacity} rows")]
    TooManyRows { file: String, capacity: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackData {
    pub pole_heights: Vec<f32>,
    pub runner: Vec<[f32; 3]>,
}

pub fn parse_pole_heights(file: &str, text: &str) -> Result<Vec<f32>, DataFileError> {
    // the first line is a header
    parse_rows(file, text, 1, |line| line.parse::<f32>().ok())
}

pub fn parse_runner_vertices(file: &str, text: &str) -> Result<Vec<[f32; 3]>, DataFileError> {
    parse_rows(file, text, 0, |line| {
        let mut fields = line.split_whitespace().map(str::parse::<f32>);
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Some([x, y, z]),
            _ => None,
        }
    })
}

fn parse_rows<T>(
    file: &str,
    text: &str,
    skip: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>, DataFileError> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate().skip(skip) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(row) = parse(line) else {
            log::warn!("{}:{}: unreadable row {:?}, ignoring the rest", file, idx + 1, line);
            break;
        };
        if rows.len() == TRACK_CAPACITY {
            return Err(DataFileError::TooManyRows {
                file: file.to_string(),
                capacity: TRACK_CAPACITY,
            });
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Reads both data files from `asset_dir`. A file that cannot be read yields
/// no rows.
pub async fn load_track_data(asset_dir: &Path) -> Result<TrackData, DataFileError> {
    let pole_heights = match load_string(asset_dir, COASTER_DATA_FILE).await {
        Ok(text) => parse_pole_heights(COASTER_DATA_FILE, &text)?,
        Err(e) => {
            log::warn!("{} not loaded, the track has no poles: {}", COASTER_DATA_FILE, e);
            Vec::new()
        }
    };
    let runner = match load_string(asset_dir, RUNNER_DATA_FILE).await {
        Ok(text) => parse_runner_vertices(RUNNER_DATA_FILE, &text)?,
        Err(e) => {
            log::warn!("{} not loaded, the track has no runner: {}", RUNNER_DATA_FILE, e);
            Vec::new()
        }
    };
    log::info!(
        "track data: {} poles, {} runner vertices",
        pole_heights.len(),
        runner.len()
    );
    Ok(TrackData {
        pole_heights,
        runner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_line_is_skipped() {
        let heights = parse_pole_heights("poles", "pole lengths\n0.5\n0.25\n").unwrap();
        assert_eq!(heights, vec![0.5, 0.25]);
    }

    #[test]
    fn short_file_stops_at_end_of_input() {
        let runner = parse_runner_vertices("runner", "1 2 3\n4 5 6").unwrap();
        assert_eq!(runner, vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(parse_pole_heights("poles", "").unwrap().is_empty());
    }

    #[test]
    fn reading_stops_at_first_bad_row() {
        let heights = parse_pole_heights("poles", "header\n0.1\nnope\n0.3\n").unwrap();
        assert_eq!(heights, vec![0.1]);
        let runner = parse_runner_vertices("runner", "1 2 3\n1 2\n4 5 6\n").unwrap();
        assert_eq!(runner.len(), 1);
    }

    #[test]
    fn overflow_is_an_error() {
        let text: String = (0..=TRACK_CAPACITY).map(|i| format!("{} 0 0\n", i)).collect();
        let err = parse_runner_vertices("runner", &text).unwrap_err();
        assert_eq!(
            err,
            DataFileError::TooManyRows {
                file: "runner".to_string(),
                capacity: TRACK_CAPACITY
            }
        );

        let exact: String = (0..TRACK_CAPACITY).map(|i| format!("{} 0 0\n", i)).collect();
        assert_eq!(parse_runner_vertices("runner", &exact).unwrap().len(), TRACK_CAPACITY);
    }
}
