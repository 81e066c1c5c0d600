//! Commands sent to the device
//!
//! Every effect command is made of two payloads: a data packet staging the value, followed
//! by a commit packet applying it. The functions in this module always return both, in
//! that order, so that a value can never be staged without being committed.
//!
//! Output routing is the exception: its payloads are recorded sequences and are returned
//! as-is (see [`crate::routing`]).

use thiserror::Error;

use crate::{
    calibration::{CalibrationTable, MAX_KEY},
    Feature, OutputTarget, Packet, PacketError, SpecialValue,
};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("slider value should be between 0 and {max}, but was {value}")]
    ValueOutOfRange { value: i32, max: usize },

    #[error("unexpected combination of feature {feature:?} and preset {preset:?}, presets are only supported by smart volume")]
    UnsupportedPreset {
        feature: Feature,
        preset: SpecialValue,
    },

    #[error("recorded payload is malformed: {0}")]
    MalformedPayload(#[from] PacketError),
}

/// Enables or disables an effect
pub fn encode_toggle(feature: Feature, enabled: bool, table: &CalibrationTable) -> [Packet; 2] {
    let value = if enabled { table.max() } else { table.min() };
    Packet::pair(feature.toggle_code(), value)
}

/// Sets the intensity of an effect, `value` being a position between 0 and 100
pub fn encode_slider(
    feature: Feature,
    value: i32,
    table: &CalibrationTable,
) -> Result<[Packet; 2], EncodeError> {
    let out_of_range = EncodeError::ValueOutOfRange {
        value,
        max: MAX_KEY,
    };
    let key = usize::try_from(value).map_err(|_| out_of_range.clone())?;
    let encoded = table.get(key).ok_or(out_of_range)?;

    Ok(Packet::pair(feature.slider_code(), encoded))
}

/// Sets an effect's slider to one of its named presets
///
/// The preset values are raw device constants, the calibration table isn't involved.
pub fn encode_slider_special(
    feature: Feature,
    preset: SpecialValue,
) -> Result<[Packet; 2], EncodeError> {
    let slider = feature
        .special_slider()
        .ok_or(EncodeError::UnsupportedPreset { feature, preset })?;

    Ok(Packet::pair(slider.code, slider.value(preset)))
}

/// Recorded payloads switching the analog output
pub fn encode_output_routing(target: OutputTarget) -> Result<Vec<Packet>, EncodeError> {
    Ok(target.payloads()?)
}

/// A single intent, as requested by the user
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Route the analog output to the speakers or the headphones
    Output(OutputTarget),

    /// Enable or disable an effect
    Toggle { feature: Feature, enabled: bool },

    /// Set an effect's intensity (0 to 100)
    Slider { feature: Feature, value: i32 },

    /// Set an effect's slider to a named preset
    Special {
        feature: Feature,
        preset: SpecialValue,
    },
}

impl Command {
    /// Encodes the command into the payloads to send, in order
    pub fn encode(&self, table: &CalibrationTable) -> Result<Vec<Packet>, EncodeError> {
        Ok(match *self {
            Command::Output(target) => encode_output_routing(target)?,
            Command::Toggle { feature, enabled } => encode_toggle(feature, enabled, table).to_vec(),
            Command::Slider { feature, value } => encode_slider(feature, value, table)?.to_vec(),
            Command::Special { feature, preset } => {
                encode_slider_special(feature, preset)?.to_vec()
            }
        })
    }
}
