//! In-memory transport recording everything it is given

use g6_protocol::Packet;

use super::{G6Error, Transport};

#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<Packet>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded payloads, leaving the transport empty
    pub fn take(&mut self) -> Vec<Packet> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for MockTransport {
    fn send(&mut self, packet: &Packet) -> Result<(), G6Error> {
        log::trace!("mock: {}", packet);
        self.sent.push(packet.clone());
        Ok(())
    }
}
