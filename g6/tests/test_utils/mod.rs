use g6::{transport::mock::MockTransport, CalibrationTable, Packet, G6};

#[allow(unused_macros)]
macro_rules! test {
    ($dev:expr, $cmd:expr, $expect:expr) => {
        $cmd.unwrap();
        $dev.check(&$expect, stringify!($cmd));
    };
}

pub struct TestDevice {
    pub g6: G6<MockTransport>,
}

impl TestDevice {
    pub fn new() -> Self {
        let table = CalibrationTable::builtin().unwrap();
        Self {
            g6: G6::new(MockTransport::new(), table),
        }
    }

    /// Payloads sent since the last call
    pub fn sent(&mut self) -> Vec<Packet> {
        self.g6.transport_mut().take()
    }

    /// Compares the headers of the payloads sent since the last call, and makes sure the
    /// remainder of every payload is zeroed
    pub fn check(&mut self, expected: &[[u8; 10]], name: &str) {
        let sent = self.sent();
        let headers: Vec<&[u8]> = sent.iter().map(|p| p.header()).collect();
        let expected: Vec<&[u8]> = expected.iter().map(|h| &h[..]).collect();
        assert_eq!(headers, expected, "{}", name);

        for packet in &sent {
            assert_eq!(packet.as_bytes().len(), 64, "{}", name);
            assert!(
                packet.as_bytes()[10..].iter().all(|&b| b == 0),
                "{}: trailing bytes should be zero",
                name
            );
        }
    }
}
