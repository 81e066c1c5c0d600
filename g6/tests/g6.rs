#[macro_use]
mod test_utils;
use g6::{
    transport::{mock::MockTransport, Transport},
    CalibrationTable, Command, Feature, G6Error, OutputTarget, SpecialValue, StateFile, G6,
};
use hex_literal::hex;
use test_utils::TestDevice;

#[test]
fn test_effects() -> anyhow::Result<()> {
    let mut dev = TestDevice::new();

    test!(
        dev,
        dev.g6.set_effect_enabled(Feature::Bass, true),
        [hex!("5a 1207 0196 18 0000803f"), hex!("5a 1103 0196 18 00000000")]
    );
    test!(
        dev,
        dev.g6.set_effect_enabled(Feature::Surround, false),
        [hex!("5a 1207 0196 00 00000000"), hex!("5a 1103 0196 00 00000000")]
    );
    test!(
        dev,
        dev.g6.set_effect_value(Feature::Bass, 73),
        [hex!("5a 1207 0196 19 48e13a3f"), hex!("5a 1103 0196 19 00000000")]
    );
    test!(
        dev,
        dev.g6.set_effect_value(Feature::Crystalizer, 40),
        [hex!("5a 1207 0196 08 cdcccc3e"), hex!("5a 1103 0196 08 00000000")]
    );
    test!(
        dev,
        dev.g6.set_effect_value(Feature::DialogPlus, 0),
        [hex!("5a 1207 0196 03 00000000"), hex!("5a 1103 0196 03 00000000")]
    );
    test!(
        dev,
        dev.g6.set_effect_special(Feature::SmartVolume, SpecialValue::Loud),
        [hex!("5a 1207 0196 06 0000803f"), hex!("5a 1103 0196 06 00000000")]
    );
    test!(
        dev,
        dev.g6.set_effect_special(Feature::SmartVolume, SpecialValue::Night),
        [hex!("5a 1207 0196 06 00000040"), hex!("5a 1103 0196 06 00000000")]
    );

    Ok(())
}

#[test]
fn test_rejected_commands() {
    let mut dev = TestDevice::new();

    assert!(matches!(
        dev.g6.set_effect_value(Feature::Surround, 101),
        Err(G6Error::Encode(_))
    ));
    assert!(matches!(
        dev.g6.set_effect_value(Feature::Surround, -1),
        Err(G6Error::Encode(_))
    ));
    assert!(matches!(
        dev.g6.set_effect_special(Feature::Bass, SpecialValue::Loud),
        Err(G6Error::Encode(_))
    ));

    assert!(dev.sent().is_empty(), "nothing should reach the device");
}

#[test]
fn test_output_routing() {
    let mut dev = TestDevice::new();

    dev.g6.set_output(OutputTarget::Speakers).unwrap();
    let speakers = dev.sent();
    assert_eq!(speakers.len(), 28);
    assert_eq!(speakers[0].header(), hex!("5a 2c05 0002 00 00000000"));

    dev.g6.set_output(OutputTarget::Headphones).unwrap();
    let headphones = dev.sent();
    assert_eq!(headphones.len(), 30);
    assert_eq!(headphones[0].header(), hex!("5a 2c05 0004 00 00000000"));
}

#[test]
fn test_toggle_output() {
    let dir = tempfile::tempdir().unwrap();
    let state = StateFile::new(dir.path().join("toggle-state"));
    let mut dev = TestDevice::new();

    assert_eq!(dev.g6.toggle_output(&state).unwrap(), OutputTarget::Speakers);
    assert_eq!(dev.sent().len(), 28);

    assert_eq!(dev.g6.toggle_output(&state).unwrap(), OutputTarget::Headphones);
    assert_eq!(dev.sent().len(), 30);

    assert_eq!(state.read().unwrap(), Some(OutputTarget::Headphones));
}

#[test]
fn test_command_batch() {
    let table = CalibrationTable::builtin().unwrap();
    let mut g6 = G6::new(MockTransport::new(), table.clone());
    assert_eq!(g6.table(), &table);

    for command in &[
        Command::Toggle {
            feature: Feature::SmartVolume,
            enabled: true,
        },
        Command::Slider {
            feature: Feature::SmartVolume,
            value: 50,
        },
    ] {
        g6.run(command).unwrap();
    }
    assert_eq!(g6.transport().sent.len(), 4);

    let transport = g6.into_transport();
    let headers: Vec<&[u8]> = transport.sent.iter().map(|p| p.header()).collect();
    assert_eq!(
        headers,
        vec![
            &hex!("5a 1207 0196 04 0000803f")[..],
            &hex!("5a 1103 0196 04 00000000")[..],
            &hex!("5a 1207 0196 05 0000003f")[..],
            &hex!("5a 1103 0196 05 00000000")[..],
        ]
    );
}

#[test]
fn test_send_all_stops_on_failure() {
    struct Failing {
        remaining: usize,
        sent: usize,
    }

    impl Transport for Failing {
        fn send(&mut self, _packet: &g6::Packet) -> Result<(), G6Error> {
            if self.remaining == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged").into());
            }
            self.remaining -= 1;
            self.sent += 1;
            Ok(())
        }
    }

    let mut transport = Failing {
        remaining: 3,
        sent: 0,
    };
    let mut g6 = G6::new(&mut transport, CalibrationTable::builtin().unwrap());
    assert!(matches!(
        g6.set_output(OutputTarget::Speakers),
        Err(G6Error::IOError(_))
    ));
    assert_eq!(transport.sent, 3);
}
