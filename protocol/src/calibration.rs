//! Mapping from slider positions (0 to 100) to the values understood by the device
//!
//! The device doesn't take slider positions as plain integers. The encoded value of each
//! position is sourced from a known-good capture: a file of 202 hex lines holding one
//! data/commit pair per position, in order. Only the data lines are read, and the value
//! field of each one becomes the entry for its position.

use std::{fs, path::Path};

use thiserror::Error;

use crate::packet::{RequestType, PACKET_HEX_LEN};

/// Highest slider position
pub const MAX_KEY: usize = 100;

/// One data line and one commit line per position
pub const EXPECTED_LINES: usize = (MAX_KEY + 1) * 2;

/// Hex character range holding the value inside a data line
const VALUE_FIELD: std::ops::Range<usize> = 12..20;

const BUILTIN: &str = include_str!("../payloads/0-100.hex");

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("{origin} seems to be corrupted: expected {expected} lines, but it had {actual}")]
    LineCount {
        origin: String,
        expected: usize,
        actual: usize,
    },

    #[error("{origin} seems to be corrupted: expected line {line} to have {expected} characters, but it had {actual}")]
    LineLength {
        origin: String,
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{origin} seems to be corrupted: line {line} does not contain the data request type {expected:?}")]
    MissingMarker {
        origin: String,
        line: usize,
        expected: String,
    },

    #[error("{origin} seems to be corrupted: unexpected character {found:?} at offset {offset} of line {line}, lines must match ^[a-f0-9]{{128}}$")]
    InvalidCharacter {
        origin: String,
        line: usize,
        offset: usize,
        found: char,
    },

    #[error("{origin} seems to be corrupted: line {line} has a malformed value field {field:?}")]
    InvalidValue {
        origin: String,
        line: usize,
        field: String,
    },

    #[error("couldn't read {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
}

/// Device encoded value for every slider position
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalibrationTable {
    values: [u32; MAX_KEY + 1],
}

impl CalibrationTable {
    /// Builds the table from the lines of a reference capture
    pub fn load<I, S>(lines: I) -> Result<Self, CalibrationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::load_named("reference data", lines)
    }

    /// Same as [`load`](Self::load), `origin` names the data in error messages
    pub fn load_named<I, S>(origin: &str, lines: I) -> Result<Self, CalibrationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();
        if lines.len() != EXPECTED_LINES {
            return Err(CalibrationError::LineCount {
                origin: origin.to_owned(),
                expected: EXPECTED_LINES,
                actual: lines.len(),
            });
        }

        let marker = RequestType::Data.hex_code();
        let mut values = [0u32; MAX_KEY + 1];

        for (index, line) in lines.iter().enumerate().step_by(2) {
            let line = line.as_ref();

            let actual = line.len();
            if actual != PACKET_HEX_LEN {
                return Err(CalibrationError::LineLength {
                    origin: origin.to_owned(),
                    line: index,
                    expected: PACKET_HEX_LEN,
                    actual,
                });
            }

            if let Some((offset, found)) = line
                .char_indices()
                .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
            {
                return Err(CalibrationError::InvalidCharacter {
                    origin: origin.to_owned(),
                    line: index,
                    offset,
                    found,
                });
            }

            if !line.contains(marker.as_str()) {
                return Err(CalibrationError::MissingMarker {
                    origin: origin.to_owned(),
                    line: index,
                    expected: marker,
                });
            }

            let invalid_value = || CalibrationError::InvalidValue {
                origin: origin.to_owned(),
                line: index,
                field: line.chars().skip(VALUE_FIELD.start).take(VALUE_FIELD.len()).collect(),
            };
            let field = line.get(VALUE_FIELD).ok_or_else(invalid_value)?;
            values[index / 2] = u32::from_str_radix(field, 16).map_err(|_| invalid_value())?;
        }

        log::debug!("loaded {} calibration values from {}", values.len(), origin);

        Ok(CalibrationTable { values })
    }

    /// Reads a reference capture from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CalibrationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|error| CalibrationError::Io {
            path: path.display().to_string(),
            error,
        })?;

        Self::load_named(&path.display().to_string(), content.lines().map(str::trim))
    }

    /// The reference capture shipped with this crate
    pub fn builtin() -> Result<Self, CalibrationError> {
        Self::load_named("builtin 0-100.hex", BUILTIN.lines().map(str::trim))
    }

    /// Encoded value for a slider position, `None` past [`MAX_KEY`]
    pub fn get(&self, key: usize) -> Option<u32> {
        self.values.get(key).copied()
    }

    /// Value used to switch an effect off
    pub fn min(&self) -> u32 {
        self.values[0]
    }

    /// Value used to switch an effect on
    pub fn max(&self) -> u32 {
        self.values[MAX_KEY]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.values.iter().copied().enumerate()
    }
}
