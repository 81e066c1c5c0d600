//! This crate provides a high level API for controlling a Sound Blaster X G6.
//! To get started, open the device's control interface using
//! [`transport::hid::find_control_interface`] and wrap the resulting transport in a [`G6`].
//!
//! ```no_run
//! use g6::{transport::hid, CalibrationTable, Feature, OutputTarget, G6};
//!
//! fn main() -> anyhow::Result<()> {
//!     let api = hid::HidApi::new()?;
//!     let transport = hid::find_control_interface(&api)?.open(&api)?;
//!
//!     let mut g6 = G6::new(transport, CalibrationTable::builtin()?);
//!     g6.set_output(OutputTarget::Headphones)?;
//!     g6.set_effect_enabled(Feature::Bass, true)?;
//!     g6.set_effect_value(Feature::Bass, 73)?;
//!
//!     Ok(())
//! }
//! ```

pub use g6_protocol::{
    self as protocol, commands, CalibrationTable, Command, Feature, OutputTarget, Packet,
    SpecialValue,
};
pub use transport::G6Error;

pub type Result<T, E = G6Error> = core::result::Result<T, E>;

pub mod config;
pub use config::Config;
pub mod state;
pub use state::StateFile;
pub mod transport;
use transport::Transport;

/// High-level G6 Control API
pub struct G6<T: Transport> {
    transport: T,
    table: CalibrationTable,
}

impl<T: Transport> G6<T> {
    pub fn new(transport: T, table: CalibrationTable) -> Self {
        G6 { transport, table }
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Encodes and sends a single command
    pub fn run(&mut self, command: &Command) -> Result<()> {
        let packets = command.encode(&self.table)?;
        log::debug!("{:?}: sending {} payloads", command, packets.len());
        self.transport.send_all(&packets)
    }

    /// Routes the analog output to the given target
    pub fn set_output(&mut self, target: OutputTarget) -> Result<()> {
        self.run(&Command::Output(target))
    }

    /// Switches to the output opposite to the one remembered in `state`, returns the new output
    pub fn toggle_output(&mut self, state: &StateFile) -> Result<OutputTarget> {
        let target = state.toggle()?;
        self.set_output(target)?;
        Ok(target)
    }

    pub fn set_effect_enabled(&mut self, feature: Feature, enabled: bool) -> Result<()> {
        self.run(&Command::Toggle { feature, enabled })
    }

    /// Sets an effect's intensity [0, 100]
    pub fn set_effect_value(&mut self, feature: Feature, value: i32) -> Result<()> {
        self.run(&Command::Slider { feature, value })
    }

    /// Sets an effect's slider to a named preset (only supported by smart volume)
    pub fn set_effect_special(&mut self, feature: Feature, preset: SpecialValue) -> Result<()> {
        self.run(&Command::Special { feature, preset })
    }
}
