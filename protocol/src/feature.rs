//! Audio effects exposed by the device and their command codes

/// One of the DSP effects that can be enabled and tuned on the device
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "use_serde",
    derive(
        strum::EnumString,
        strum::Display,
        serde::Serialize,
        serde::Deserialize,
    )
)]
#[cfg_attr(feature = "use_serde", strum(serialize_all = "kebab-case"))]
#[cfg_attr(feature = "use_serde", serde(rename_all = "kebab-case"))]
pub enum Feature {
    Surround,
    Crystalizer,
    Bass,
    SmartVolume,
    DialogPlus,
}

/// Named, non-numeric slider settings
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "use_serde",
    derive(
        strum::EnumString,
        strum::Display,
        serde::Serialize,
        serde::Deserialize,
    )
)]
pub enum SpecialValue {
    Night,
    Loud,
}

/// Preset slider of a feature, along with the raw device values of its presets
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SpecialSlider {
    pub code: u8,

    /// Sent for [`SpecialValue::Loud`]
    pub enabled_value: u32,

    /// Sent for [`SpecialValue::Night`]
    pub disabled_value: u32,
}

impl SpecialSlider {
    pub fn value(&self, preset: SpecialValue) -> u32 {
        match preset {
            SpecialValue::Loud => self.enabled_value,
            SpecialValue::Night => self.disabled_value,
        }
    }
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Surround,
        Feature::Crystalizer,
        Feature::Bass,
        Feature::SmartVolume,
        Feature::DialogPlus,
    ];

    /// Code used to enable or disable the effect
    pub const fn toggle_code(self) -> u8 {
        use Feature::*;
        match self {
            Surround => 0x00,
            Crystalizer => 0x07,
            Bass => 0x18,
            SmartVolume => 0x04,
            DialogPlus => 0x02,
        }
    }

    /// Code used to set the effect's intensity
    pub const fn slider_code(self) -> u8 {
        use Feature::*;
        match self {
            Surround => 0x01,
            Crystalizer => 0x08,
            Bass => 0x19,
            SmartVolume => 0x05,
            DialogPlus => 0x03,
        }
    }

    /// Preset slider, only available on smart volume
    pub const fn special_slider(self) -> Option<SpecialSlider> {
        match self {
            Feature::SmartVolume => Some(SpecialSlider {
                code: 0x06,
                enabled_value: 0x0000_803f,
                disabled_value: 0x0000_0040,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<u8> = Feature::ALL
            .iter()
            .flat_map(|f| [f.toggle_code(), f.slider_code()])
            .chain(Feature::ALL.iter().filter_map(|f| f.special_slider()).map(|s| s.code))
            .collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn only_smart_volume_has_presets() {
        for feature in Feature::ALL {
            assert_eq!(
                feature.special_slider().is_some(),
                feature == Feature::SmartVolume
            );
        }
    }

    #[cfg(feature = "use_serde")]
    #[test]
    fn parse_names() {
        use std::str::FromStr;

        assert_eq!(Feature::from_str("smart-volume").unwrap(), Feature::SmartVolume);
        assert_eq!(Feature::DialogPlus.to_string(), "dialog-plus");
        assert_eq!(SpecialValue::from_str("Night").unwrap(), SpecialValue::Night);
        assert!(SpecialValue::from_str("Quiet").is_err());
    }
}
