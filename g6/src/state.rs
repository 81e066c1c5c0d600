//! Remembers the last output target between invocations
//!
//! The device can't be asked which output is active, so toggling relies on what the
//! previous invocation selected. The file is replaced as a whole on every write.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use g6_protocol::OutputTarget;

use crate::G6Error;

pub const STATE_FILE_NAME: &str = "g6-cli-toggle-state";

#[derive(Clone, Debug)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        StateFile { path: path.into() }
    }

    /// `g6-cli-toggle-state` in the system's temporary directory
    pub fn default_location() -> Self {
        Self::new(std::env::temp_dir().join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The previously selected output, `None` if nothing was remembered yet
    pub fn read(&self) -> Result<Option<OutputTarget>, G6Error> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        content
            .trim()
            .parse::<OutputTarget>()
            .map(Some)
            .map_err(|_| G6Error::InvalidState {
                path: self.path.display().to_string(),
                content,
            })
    }

    pub fn write(&self, target: OutputTarget) -> Result<(), G6Error> {
        fs::write(&self.path, target.to_string())?;
        Ok(())
    }

    /// Picks the output opposite to the remembered one and remembers it.
    ///
    /// Speakers are selected when nothing was remembered, headphones when the file holds
    /// anything else than a known output.
    pub fn toggle(&self) -> Result<OutputTarget, G6Error> {
        let next = match self.read() {
            Ok(Some(previous)) => {
                let next = previous.toggled();
                log::info!("Toggle from {} -> {}", previous, next);
                next
            }
            Ok(None) => {
                log::info!("Toggle to {}", OutputTarget::Speakers);
                OutputTarget::Speakers
            }
            Err(G6Error::InvalidState { path, content }) => {
                log::warn!(
                    "ignoring unexpected content {:?} in {}, toggling to {}",
                    content,
                    path,
                    OutputTarget::Headphones
                );
                OutputTarget::Headphones
            }
            Err(e) => return Err(e),
        };

        self.write(next)?;
        Ok(next)
    }
}
