//! Sound Blaster X G6 Control Program

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
#[cfg(feature = "hid")]
use g6::transport::hid;
use g6::{
    transport::{DryRunTransport, Transport},
    CalibrationTable, Command, Config, Feature, OutputTarget, SpecialValue, StateFile, G6,
};

#[derive(Clone, Parser, Debug)]
#[command(author, version, about = "Sound Blaster X G6 CLI")]
struct Opts {
    /// Verbosity level. -v displays sent payloads and device responses, -vv displays everything
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Read settings from the given TOML file
    #[arg(long, env = "G6_CONFIG")]
    config: Option<PathBuf>,

    /// The device to open (041e:3256 or path=...), instead of looking for the control interface
    #[arg(long = "usb", env = "G6_USB")]
    #[cfg(feature = "hid")]
    usb: Option<hid::Device>,

    /// Reference capture used to encode slider values (0-100.hex)
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Print every HID device found on this system
    #[arg(long)]
    list_devices: bool,

    /// Toggles the sound output between Speakers and Headphones
    #[arg(long, conflicts_with = "set_output")]
    toggle_output: bool,

    /// Routes the sound output to the given target
    #[arg(long, value_name = "Speakers|Headphones")]
    set_output: Option<OutputTarget>,

    /// Print the payloads instead of sending them to the device
    #[arg(long)]
    dry_run: bool,

    /// Enables or disables the Surround sound effect
    #[arg(long, value_name = "Enabled|Disabled", value_parser = enabled_or_disabled)]
    set_surround: Option<bool>,

    /// Set the value for the Surround sound effect [0, 100]
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    set_surround_value: Option<i32>,

    /// Enables or disables the Crystalizer sound effect
    #[arg(long, value_name = "Enabled|Disabled", value_parser = enabled_or_disabled)]
    set_crystalizer: Option<bool>,

    /// Set the value for the Crystalizer sound effect [0, 100]
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    set_crystalizer_value: Option<i32>,

    /// Enables or disables the Bass sound effect
    #[arg(long, value_name = "Enabled|Disabled", value_parser = enabled_or_disabled)]
    set_bass: Option<bool>,

    /// Set the value for the Bass sound effect [0, 100]
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    set_bass_value: Option<i32>,

    /// Enables or disables the Smart-Volume sound effect
    #[arg(long, value_name = "Enabled|Disabled", value_parser = enabled_or_disabled)]
    set_smart_volume: Option<bool>,

    /// Set the value for the Smart-Volume sound effect [0, 100]
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    set_smart_volume_value: Option<i32>,

    /// Set the Smart-Volume sound effect to a preset, sent after --set-smart-volume-value
    #[arg(long, value_name = "Night|Loud")]
    set_smart_volume_special_value: Option<SpecialValue>,

    /// Enables or disables the Dialog-Plus sound effect
    #[arg(long, value_name = "Enabled|Disabled", value_parser = enabled_or_disabled)]
    set_dialog_plus: Option<bool>,

    /// Set the value for the Dialog-Plus sound effect [0, 100]
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    set_dialog_plus_value: Option<i32>,
}

impl Opts {
    /// Commands to run, in the order they are sent to the device.
    /// `--toggle-output` isn't part of it since it depends on the state file.
    fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(target) = self.set_output {
            commands.push(Command::Output(target));
        }

        let effects = [
            (Feature::Surround, self.set_surround, self.set_surround_value),
            (Feature::Crystalizer, self.set_crystalizer, self.set_crystalizer_value),
            (Feature::Bass, self.set_bass, self.set_bass_value),
            (Feature::SmartVolume, self.set_smart_volume, self.set_smart_volume_value),
            (Feature::DialogPlus, self.set_dialog_plus, self.set_dialog_plus_value),
        ];

        for (feature, enabled, value) in effects {
            if let Some(enabled) = enabled {
                commands.push(Command::Toggle { feature, enabled });
            }
            if let Some(value) = value {
                commands.push(Command::Slider { feature, value });
            }
            if feature == Feature::SmartVolume {
                if let Some(preset) = self.set_smart_volume_special_value {
                    commands.push(Command::Special { feature, preset });
                }
            }
        }

        commands
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn load_table(opts: &Opts, config: &Config) -> Result<CalibrationTable> {
    match opts.calibration.as_ref().or(config.calibration_file.as_ref()) {
        Some(path) => CalibrationTable::from_path(path)
            .with_context(|| format!("loading the calibration table {}", path.display())),
        None => Ok(CalibrationTable::builtin()?),
    }
}

#[cfg(feature = "hid")]
fn open_transport(opts: &Opts, config: &Config) -> Result<Box<dyn Transport>> {
    if opts.dry_run {
        return Ok(Box::new(DryRunTransport::new()));
    }

    let api = hid::HidApi::new()?;
    let device = match (&opts.usb, &config.device) {
        (Some(device), _) => device.clone(),
        (None, Some(device)) => device
            .parse::<hid::Device>()
            .map_err(|e| anyhow!("invalid device {:?} in the configuration: {}", device, e))?,
        (None, None) => hid::find_control_interface(&api)?,
    };

    log::info!("Device detected at {}", device);
    Ok(Box::new(device.open(&api)?))
}

#[cfg(not(feature = "hid"))]
fn open_transport(opts: &Opts, _config: &Config) -> Result<Box<dyn Transport>> {
    if opts.dry_run {
        return Ok(Box::new(DryRunTransport::new()));
    }

    Err(anyhow!("built without usb support, only --dry-run is available"))
}

#[cfg(feature = "hid")]
fn list_devices() -> Result<()> {
    let api = hid::HidApi::new()?;
    for device in api.device_list() {
        println!(
            "{:04x}:{:04x} interface={} path={} manufacturer={:?} product={:?} serial={:?}",
            device.vendor_id(),
            device.product_id(),
            device.interface_number(),
            device.path().to_string_lossy(),
            device.manufacturer_string(),
            device.product_string(),
            device.serial_number(),
        );
    }
    Ok(())
}

#[cfg(not(feature = "hid"))]
fn list_devices() -> Result<()> {
    Err(anyhow!("built without usb support"))
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    if opts.list_devices {
        return list_devices();
    }

    let commands = opts.commands();
    if commands.is_empty() && !opts.toggle_output {
        Opts::command().print_help()?;
        return Err(anyhow!("No meaningful argument has been specified!"));
    }

    let config = match &opts.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading the configuration {}", path.display()))?,
        None => Config::default(),
    };

    let table = load_table(&opts, &config)?;
    let transport = open_transport(&opts, &config)?;
    let mut device = G6::new(transport, table);

    if opts.toggle_output {
        let state = match &config.state_file {
            Some(path) => StateFile::new(path),
            None => StateFile::default_location(),
        };
        let target = device.toggle_output(&state)?;
        log::info!("Output routed to {}", target);
    }

    for command in &commands {
        device.run(command)?;
    }

    Ok(())
}

fn enabled_or_disabled(s: &str) -> Result<bool, &'static str> {
    match s {
        "Enabled" | "enabled" | "on" | "true" => Ok(true),
        "Disabled" | "disabled" | "off" | "false" => Ok(false),
        _ => Err("expected `Enabled` or `Disabled`"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn try_parse(args: &[&str]) -> Result<Opts, clap::Error> {
        Opts::try_parse_from(std::iter::once("g6").chain(args.iter().copied()))
    }

    fn parse(args: &[&str]) -> Opts {
        try_parse(args).unwrap()
    }

    #[test]
    fn command_order() {
        let opts = parse(&[
            "--set-smart-volume-special-value",
            "Night",
            "--set-bass-value",
            "40",
            "--set-output",
            "Headphones",
            "--set-smart-volume",
            "Enabled",
            "--set-smart-volume-value",
            "80",
            "--set-bass",
            "Disabled",
        ]);

        assert_eq!(
            opts.commands(),
            vec![
                Command::Output(OutputTarget::Headphones),
                Command::Toggle {
                    feature: Feature::Bass,
                    enabled: false
                },
                Command::Slider {
                    feature: Feature::Bass,
                    value: 40
                },
                Command::Toggle {
                    feature: Feature::SmartVolume,
                    enabled: true
                },
                Command::Slider {
                    feature: Feature::SmartVolume,
                    value: 80
                },
                Command::Special {
                    feature: Feature::SmartVolume,
                    preset: SpecialValue::Night
                },
            ]
        );
    }

    #[test]
    fn rejected_arguments() {
        assert!(try_parse(&["--toggle-output", "--set-output", "Speakers"]).is_err());
        assert!(try_parse(&["--set-surround-value", "101"]).is_err());
        assert!(try_parse(&["--set-surround-value", "-1"]).is_err());
        assert!(try_parse(&["--set-bass", "maybe"]).is_err());
        assert!(try_parse(&["--set-output", "Monitor"]).is_err());
        assert!(try_parse(&["--set-smart-volume-special-value", "Quiet"]).is_err());
    }

    #[test]
    fn nothing_to_do() {
        let opts = parse(&["--dry-run"]);
        assert!(opts.commands().is_empty());
        assert!(!opts.toggle_output);
    }

    #[test]
    fn cli_definition() {
        Opts::command().debug_assert();
    }
}
