//! Command encoding for the Sound Blaster X G6.
//!
//! This crate turns high level intents ("enable bass", "set surround to 73", "route the
//! output to the headphones") into the 64 byte payloads understood by the device's
//! firmware.
//!
//! It is meant to be as lean as possible and does no I/O on its own: opening the device
//! and writing the payloads is left to the host crate.
//!
//! ```
//! use g6_protocol::{commands, CalibrationTable, Feature};
//!
//! let table = CalibrationTable::builtin().unwrap();
//! let [data, commit] = commands::encode_slider(Feature::Bass, 73, &table).unwrap();
//! assert_eq!(data.feature_code(), 0x19);
//! assert_eq!(commit.value(), 0);
//! ```

pub mod calibration;
pub use calibration::{CalibrationError, CalibrationTable};

pub mod commands;
pub use commands::{Command, EncodeError};

pub mod feature;
pub use feature::{Feature, SpecialSlider, SpecialValue};

pub mod packet;
pub use packet::{Packet, PacketError, RequestType};

pub mod routing;
pub use routing::OutputTarget;

/// First byte of every payload
pub const PREFIX: u8 = 0x5a;

/// Constant found between the request type and the feature code of every effect command
pub const INTERMEDIATE: u16 = 0x0196;

/// USB vendor id (Creative Technology)
pub const VENDOR_ID: u16 = 0x041e;

/// USB product id of the G6
pub const PRODUCT_ID: u16 = 0x3256;

/// HID interface accepting control commands. The third HID interface silently ignores them.
pub const CONTROL_INTERFACE: i32 = 4;
