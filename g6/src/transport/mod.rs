//! Transport base trait for talking to the device
//!
//! Transports receive logical 64 byte payloads and are the only place aware of the
//! report id framing used on the wire.

use bytes::{BufMut, Bytes, BytesMut};
use g6_protocol::{packet::PACKET_LEN, CalibrationError, EncodeError, Packet};
use thiserror::Error;

#[cfg(feature = "hid")]
pub mod hid;

#[cfg(feature = "hid")]
use hidapi::HidError;

#[cfg(feature = "mock")]
pub mod mock;

#[derive(Error, Debug)]
pub enum G6Error {
    #[error("An HID error has occurred: {0}. If the device can't be opened, install debian/g6.udev as /etc/udev/rules.d/50-soundblaster-x-g6.rules and reload the rules with `sudo udevadm trigger`")]
    #[cfg(feature = "hid")]
    HIDError(#[from] HidError),

    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("The calibration table couldn't be loaded: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("The command couldn't be encoded: {0}")]
    Encode(#[from] EncodeError),

    #[error("No Sound Blaster X G6 could be found having vendor_id={vendor_id:#06x} and product_id={product_id:#06x}. Is the device connected, and are the udev rules installed?")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("The Sound Blaster X G6 was found, but its HID interface {interface} is not available")]
    InterfaceNotFound { interface: i32 },

    #[error("The state file {path} contains an unexpected value: {content:?}")]
    InvalidState { path: String, content: String },

    #[error("Malformed configuration file: {0}")]
    ConfigError(#[from] toml::de::Error),
}

/// Sends payloads to a device, in order
pub trait Transport {
    /// Sends a single payload
    fn send(&mut self, packet: &Packet) -> Result<(), G6Error>;

    /// Sends every payload in order, stopping at the first failure
    fn send_all(&mut self, packets: &[Packet]) -> Result<(), G6Error> {
        for packet in packets {
            self.send(packet)?;
        }
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, packet: &Packet) -> Result<(), G6Error> {
        (**self).send(packet)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, packet: &Packet) -> Result<(), G6Error> {
        (**self).send(packet)
    }
}

/// Prepends the report id hidapi expects.
///
/// Without it, the first byte of the payload would be interpreted as the report id and
/// would never reach the device.
pub fn frame(packet: &Packet) -> Bytes {
    let mut buf = BytesMut::with_capacity(PACKET_LEN + 1);
    buf.put_u8(0x00);
    buf.extend_from_slice(packet.as_bytes());
    buf.freeze()
}

/// Logs payloads instead of sending them
#[derive(Debug, Default)]
pub struct DryRunTransport {
    sent: usize,
}

impl DryRunTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payloads that would have been sent
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl Transport for DryRunTransport {
    fn send(&mut self, packet: &Packet) -> Result<(), G6Error> {
        let report = frame(packet);
        log::info!("dry run, not sending: {}", hex::encode(&report));
        self.sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use g6_protocol::RequestType;

    use super::*;

    #[test]
    fn frame_test() {
        let packet = Packet::build(RequestType::Data, 0x18, 0x0000803f);
        let framed = frame(&packet);

        assert_eq!(framed.len(), 65, "length should be the payload plus the report id");
        assert_eq!(framed[0], 0, "the report id should be zero");
        assert_eq!(&framed[1..], packet.as_bytes(), "the payload should be there verbatim");
    }

    #[cfg(feature = "hid")]
    #[test]
    fn hid_error_hints_at_udev() {
        let err: G6Error = HidError::HidApiError {
            message: "Permission denied".to_string(),
        }
        .into();
        let message = err.to_string();
        assert!(message.contains("Permission denied"));
        assert!(message.contains("50-soundblaster-x-g6.rules"));
        assert!(message.contains("udevadm trigger"));
    }

    #[test]
    fn dry_run_counts() {
        let mut transport = DryRunTransport::new();
        transport
            .send_all(&Packet::pair(0x01, 0x0ad7233c))
            .unwrap();
        assert_eq!(transport.sent(), 2);
    }
}
