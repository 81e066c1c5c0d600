//! Discovery of local devices
use std::{fmt, fmt::Formatter, str::FromStr};

use g6_protocol::{CONTROL_INTERFACE, PRODUCT_ID, VENDOR_ID};
use hidapi::HidApi;

use super::HidTransport;
use crate::transport::G6Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: Option<(u16, u16)>,
    pub path: Option<String>,
    pub interface: Option<i32>,
}

impl Device {
    pub fn open(&self, hid: &HidApi) -> Result<HidTransport, G6Error> {
        if let Some(path) = &self.path {
            Ok(HidTransport::with_path(hid, path)?)
        } else if let Some((vid, pid)) = self.id {
            Ok(HidTransport::with_product_id(hid, vid, pid)?)
        } else {
            Err(G6Error::DeviceNotFound {
                vendor_id: VENDOR_ID,
                product_id: PRODUCT_ID,
            })
        }
    }
}

impl FromStr for Device {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix("path=") {
            Ok(Device {
                id: None,
                path: Some(path.to_owned()),
                interface: None,
            })
        } else {
            let parts: Vec<_> = s.split(':').collect();
            if parts.len() != 2 {
                return Err("expected: vid:pid or path=...");
            }

            let vendor_id =
                u16::from_str_radix(parts[0], 16).map_err(|_| "couldn't parse vendor id")?;
            let product_id =
                u16::from_str_radix(parts[1], 16).map_err(|_| "couldn't parse product id")?;
            Ok(Device {
                id: Some((vendor_id, product_id)),
                path: None,
                interface: None,
            })
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.path, self.id) {
            (Some(path), _) => write!(f, "path={}", path)?,
            (None, Some((vid, pid))) => write!(f, "{:04x}:{:04x}", vid, pid)?,
            (None, None) => write!(f, "<unknown>")?,
        }
        if let Some(interface) = self.interface {
            write!(f, " (interface {})", interface)?;
        }
        Ok(())
    }
}

/// Lists every HID interface exposed by a G6
pub fn discover(hid: &HidApi) -> Vec<Device> {
    discover_with(hid, |di| {
        (di.vendor_id(), di.product_id()) == (VENDOR_ID, PRODUCT_ID)
    })
}

pub fn discover_with<F: Fn(&hidapi::DeviceInfo) -> bool>(hid: &HidApi, func: F) -> Vec<Device> {
    hid.device_list()
        .filter(|di| func(di))
        .map(|di| Device {
            id: Some((di.vendor_id(), di.product_id())),
            path: Some(di.path().to_string_lossy().to_string()),
            interface: Some(di.interface_number()),
        })
        .collect()
}

/// Finds the interface accepting commands.
///
/// The G6 exposes two HID interfaces, data sent to the first one is ignored by the device.
pub fn find_control_interface(hid: &HidApi) -> Result<Device, G6Error> {
    select_control_interface(discover(hid))
}

fn select_control_interface(candidates: Vec<Device>) -> Result<Device, G6Error> {
    if candidates.is_empty() {
        return Err(G6Error::DeviceNotFound {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
        });
    }

    candidates
        .into_iter()
        .find(|device| device.interface == Some(CONTROL_INTERFACE))
        .ok_or(G6Error::InterfaceNotFound {
            interface: CONTROL_INTERFACE,
        })
}
