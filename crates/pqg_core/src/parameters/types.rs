//! Enumerated parameter values and small value types.
//!
//! Every enum serializes to the exact string the processing engine
//! expects, which is also what the editor shows.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::errors::{ParameterError, ParameterResult};

/// Declare a string-valued choice enum.
///
/// Generates `ALL`, `VALUES`, `as_str`, `Display` and `FromStr` alongside the
/// serde renames so the wire value and the UI label never drift.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// All values in editor order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Wire values in editor order.
            pub const VALUES: &'static [&'static str] = &[$($value),+];
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParameterError;

            fn from_str(s: &str) -> ParameterResult<Self> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(ParameterError::unknown_choice(stringify!($name), other)),
                }
            }
        }
    };
}

choice_enum! {
    /// Mass analyser used to acquire the data.
    InstrumentType {
        Orbitrap => "orbitrap",
        Tof => "tof",
        FtIcr => "ft-icr",
        Quadrupole => "quadrupole",
    }
}

choice_enum! {
    /// Spectrum polarity filter applied while reading raw data.
    Polarity {
        Positive => "positive",
        Negative => "negative",
        Both => "both",
    }
}

choice_enum! {
    /// Color palette of quality control plots.
    PlotPalette {
        Husl => "husl",
        Crest => "crest",
        Spectral => "Spectral",
        Flare => "flare",
        Mako => "mako",
    }
}

choice_enum! {
    /// Image format of quality control plots.
    PlotExtension {
        Png => "png",
        Pdf => "pdf",
        Eps => "eps",
    }
}

choice_enum! {
    /// Line plots drawn as pure lines or filled areas.
    PlotLineStyle {
        Fill => "fill",
        Line => "line",
    }
}

choice_enum! {
    PlotFontFamily {
        SansSerif => "sans-serif",
        Serif => "serif",
    }
}

choice_enum! {
    /// Isotope quantification for the quantitative tables.
    IsotopeQuant {
        Height => "height",
        Volume => "volume",
    }
}

choice_enum! {
    /// Feature quantification for the quantitative tables.
    FeatureQuant {
        MonoisotopicHeight => "monoisotopic_height",
        MonoisotopicVolume => "monoisotopic_volume",
        TotalHeight => "total_height",
        TotalVolume => "total_volume",
        MaxHeight => "max_height",
        MaxVolume => "max_volume",
    }
}

choice_enum! {
    /// How identifications are linked to quantified isotopes.
    IdentLinkage {
        TheoreticalMz => "theoretical_mz",
        MsmsEvent => "msms_event",
    }
}

choice_enum! {
    /// Protein inference quantification type.
    ProteinQuantType {
        Razor => "razor",
        Unique => "unique",
        All => "all",
    }
}

/// Transparency of fill plots: a fixed alpha or `"dynamic"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FillAlpha {
    /// Alpha chosen by the engine from the number of samples.
    #[default]
    Dynamic,
    /// Fixed alpha in `[0, 1]`.
    Fixed(f64),
}

impl FillAlpha {
    const DYNAMIC: &'static str = "dynamic";

    /// Value shown in a numeric editor, where `0.0` stands for dynamic.
    pub fn editor_value(&self) -> f64 {
        match self {
            FillAlpha::Dynamic => 0.0,
            FillAlpha::Fixed(alpha) => *alpha,
        }
    }

    /// Inverse of [`FillAlpha::editor_value`].
    pub fn from_editor_value(value: f64) -> Self {
        if value == 0.0 {
            FillAlpha::Dynamic
        } else {
            FillAlpha::Fixed(value)
        }
    }
}

impl Serialize for FillAlpha {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FillAlpha::Dynamic => serializer.serialize_str(Self::DYNAMIC),
            FillAlpha::Fixed(alpha) => serializer.serialize_f64(*alpha),
        }
    }
}

impl<'de> Deserialize<'de> for FillAlpha {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(alpha) => Ok(FillAlpha::Fixed(alpha)),
            Repr::Text(text) if text == FillAlpha::DYNAMIC => Ok(FillAlpha::Dynamic),
            Repr::Text(text) => Err(de::Error::custom(format!(
                "expected a number or \"dynamic\", got \"{}\"",
                text
            ))),
        }
    }
}

/// Charge states considered by feature detection, highest first.
///
/// Lists read from a file are sorted and deduplicated on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct ChargeStates(Vec<u32>);

impl ChargeStates {
    /// Build the descending list for the inclusive range `min..=max`.
    pub fn from_range(min: u32, max: u32) -> ParameterResult<Self> {
        if min == 0 || min > max {
            return Err(ParameterError::InvalidChargeRange { min, max });
        }
        Ok(Self((min..=max).rev().collect()))
    }

    /// Smallest charge state (1 for an empty list).
    pub fn min(&self) -> u32 {
        self.0.iter().copied().min().unwrap_or(1)
    }

    /// Largest charge state (1 for an empty list).
    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(1)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for ChargeStates {
    fn from(mut states: Vec<u32>) -> Self {
        states.sort_unstable_by(|a, b| b.cmp(a));
        states.dedup();
        Self(states)
    }
}

impl From<ChargeStates> for Vec<u32> {
    fn from(states: ChargeStates) -> Self {
        states.0
    }
}

impl Default for ChargeStates {
    fn default() -> Self {
        Self(vec![5, 4, 3, 2, 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_values_match_wire_format() {
        assert_eq!(InstrumentType::FtIcr.as_str(), "ft-icr");
        assert_eq!(PlotPalette::Spectral.to_string(), "Spectral");
        assert_eq!(
            serde_json::to_string(&FeatureQuant::MaxHeight).unwrap(),
            "\"max_height\""
        );
        assert_eq!("sans-serif".parse::<PlotFontFamily>().unwrap(), PlotFontFamily::SansSerif);
        assert!("ORBITRAP".parse::<InstrumentType>().is_err());
        assert_eq!(IdentLinkage::VALUES, &["theoretical_mz", "msms_event"]);
    }

    #[test]
    fn fill_alpha_serializes_dynamic_as_string() {
        assert_eq!(serde_json::to_string(&FillAlpha::Dynamic).unwrap(), "\"dynamic\"");
        assert_eq!(serde_json::to_string(&FillAlpha::Fixed(0.5)).unwrap(), "0.5");

        let parsed: FillAlpha = serde_json::from_str("\"dynamic\"").unwrap();
        assert_eq!(parsed, FillAlpha::Dynamic);
        let parsed: FillAlpha = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, FillAlpha::Fixed(1.0));
        assert!(serde_json::from_str::<FillAlpha>("\"opaque\"").is_err());
    }

    #[test]
    fn fill_alpha_editor_zero_is_dynamic() {
        assert_eq!(FillAlpha::from_editor_value(0.0), FillAlpha::Dynamic);
        assert_eq!(FillAlpha::from_editor_value(0.3), FillAlpha::Fixed(0.3));
        assert_eq!(FillAlpha::Dynamic.editor_value(), 0.0);
    }

    #[test]
    fn charge_states_are_descending() {
        let states = ChargeStates::from_range(2, 5).unwrap();
        assert_eq!(states.as_slice(), &[5, 4, 3, 2]);
        assert_eq!(states.min(), 2);
        assert_eq!(states.max(), 5);

        let single = ChargeStates::from_range(3, 3).unwrap();
        assert_eq!(single.as_slice(), &[3]);
    }

    #[test]
    fn charge_states_reject_bad_ranges() {
        assert!(ChargeStates::from_range(0, 3).is_err());
        assert!(ChargeStates::from_range(4, 2).is_err());
    }

    #[test]
    fn charge_states_accept_unsorted_files() {
        let states: ChargeStates = serde_json::from_str("[1, 3, 2, 3]").unwrap();
        assert_eq!(states.as_slice(), &[3, 2, 1]);
        assert_eq!(states.min(), 1);
        assert_eq!(states.max(), 3);
        assert_eq!(serde_json::to_string(&states).unwrap(), "[3,2,1]");
    }
}
