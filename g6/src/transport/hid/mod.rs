//! HID transport for the locally connected device
use std::ffi::CString;

use g6_protocol::{packet::PACKET_LEN, Packet};
pub use hidapi::{HidApi, HidError};
use hidapi::HidDevice;

mod discover;
pub use discover::*;

use super::{frame, G6Error, Transport};

pub struct HidTransport {
    device: HidDevice,
}

impl HidTransport {
    pub fn new(device: HidDevice) -> Result<HidTransport, HidError> {
        log::info!(
            "Manufacturer: {:?}, Product: {:?}, Serial No: {:?}",
            device.get_manufacturer_string()?,
            device.get_product_string()?,
            device.get_serial_number_string()?
        );

        // Responses are only drained, never waited for
        device.set_blocking_mode(false)?;

        Ok(HidTransport { device })
    }

    pub fn with_path(hid: &HidApi, path: &str) -> Result<HidTransport, HidError> {
        log::debug!("opening the device at {}", path);
        let path = CString::new(path.as_bytes()).map_err(|_| HidError::HidApiError {
            message: "device path contains a nul byte".to_string(),
        })?;
        HidTransport::new(hid.open_path(&path)?)
    }

    pub fn with_product_id(hid: &HidApi, vid: u16, pid: u16) -> Result<HidTransport, HidError> {
        log::debug!("opening the device {:04x}:{:04x}", vid, pid);
        HidTransport::new(hid.open(vid, pid)?)
    }

    /// Reads and logs whatever the device sent back, until nothing is left
    fn drain_responses(&self) -> Result<(), HidError> {
        let mut buf = [0u8; PACKET_LEN];
        loop {
            let len = self.device.read(&mut buf)?;
            if len == 0 {
                return Ok(());
            }
            log::debug!("response: {}", hex::encode(&buf[..len]));
        }
    }
}

impl Transport for HidTransport {
    fn send(&mut self, packet: &Packet) -> Result<(), G6Error> {
        let report = frame(packet);
        log::debug!("sending: {}", hex::encode(&report));

        self.device.write(&report)?;
        self.drain_responses()?;

        Ok(())
    }
}
