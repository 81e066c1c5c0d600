//! Analog output routing
//!
//! Switching between the speaker and headphone outputs isn't a regular effect command.
//! The device expects a longer sequence of payloads which were recorded from the vendor
//! software, they are replayed verbatim.

use crate::{Packet, PacketError};

const TO_SPEAKERS: &str = include_str!("../payloads/toggle-output-to-speakers.hex");
const TO_HEADPHONES: &str = include_str!("../payloads/toggle-output-to-headphones.hex");

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "use_serde",
    derive(
        strum::EnumString,
        strum::Display,
        serde::Serialize,
        serde::Deserialize,
    )
)]
pub enum OutputTarget {
    Speakers,
    Headphones,
}

impl OutputTarget {
    /// The other output
    pub fn toggled(self) -> Self {
        match self {
            OutputTarget::Speakers => OutputTarget::Headphones,
            OutputTarget::Headphones => OutputTarget::Speakers,
        }
    }

    /// Recorded payloads selecting this output, in sending order
    pub fn payloads(self) -> Result<Vec<Packet>, PacketError> {
        let recording = match self {
            OutputTarget::Speakers => TO_SPEAKERS,
            OutputTarget::Headphones => TO_HEADPHONES,
        };

        recording
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Packet::from_hex)
            .collect()
    }
}
