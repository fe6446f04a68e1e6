//! Parsing for the `key = value` sidecar files that describe an AWS
//! station-logger CSV.
//!
//! The first line names the site (its value is ignored), the next three give
//! the site location, and every line after that is a positional column label
//! for the headerless data file. Labels may carry a trailing `(unit)`
//! suffix, e.g. `T_2m_c (degC)`.

use std::collections::HashMap;
use std::path::Path;

use crate::stations::error::StationDataError;

/// Number of leading lines that are not column labels: the site name plus
/// the three location attributes.
const HEADER_LINES: usize = 4;

#[derive(Debug, Clone)]
pub struct StationMetadata {
    pub site_name: String,
    /// The three location attributes (typically lat, lon, elevation), keyed
    /// as written in the file.
    pub location: HashMap<String, String>,
    /// Raw column labels in file order, units still attached.
    pub column_labels: Vec<String>,
}

impl StationMetadata {
    pub fn from_file(path: &Path) -> Result<Self, StationDataError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StationDataError::MetadataRead(path.to_path_buf(), e))?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, StationDataError> {
        let mut pairs = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let parts: Vec<&str> = line.split('=').collect();
            if parts.len() != 2 {
                return Err(StationDataError::MalformedMetadataLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                });
            }
            pairs.push((parts[0].trim().to_string(), parts[1].trim().to_string()));
        }

        if pairs.len() < HEADER_LINES {
            return Err(StationDataError::MetadataTooShort {
                path: path.to_path_buf(),
                lines: pairs.len(),
            });
        }

        let site_name = pairs[0].0.clone();
        let location = pairs[1..HEADER_LINES].iter().cloned().collect();
        let column_labels = pairs[HEADER_LINES..]
            .iter()
            .map(|(_, label)| label.clone())
            .collect();

        Ok(Self {
            site_name,
            location,
            column_labels,
        })
    }
}
