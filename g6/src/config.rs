use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::G6Error;

/// Optional configuration file, command line flags take precedence over its values
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Reference capture used to encode slider positions. The capture shipped with the
    /// program is used when unset.
    pub calibration_file: Option<PathBuf>,

    /// Where the last output target is remembered, defaults to a file in the temporary directory
    pub state_file: Option<PathBuf>,

    /// Device to open (`vid:pid` or `path=...`). If unset, the control interface of the
    /// first G6 found is used.
    pub device: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, G6Error> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&content)?;
        log::debug!("loaded configuration from {}: {:?}", path.as_ref().display(), config);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, G6Error> {
        Ok(toml::from_str(content)?)
    }
}
