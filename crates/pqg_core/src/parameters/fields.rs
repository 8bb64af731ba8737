//! Field registry that mirrors the settings dictionary into editors.
//!
//! Each editable key has a [`FieldSpec`] naming its label, tooltip, group
//! and value kind. Editors read values with [`DdaParameters::field`] and
//! write them back with [`DdaParameters::set_field`], which validates
//! kind and range before touching the dictionary.

use serde_json::Value;

use super::dda::DdaParameters;
use super::errors::{ParameterError, ParameterResult};
use super::types::{
    ChargeStates, FeatureQuant, FillAlpha, IdentLinkage, InstrumentType, IsotopeQuant,
    PlotExtension, PlotFontFamily, PlotLineStyle, PlotPalette, Polarity, ProteinQuantType,
};

/// Upper bound for otherwise unbounded numeric editors.
pub const LARGE: i64 = 1_000_000_000;
const LARGE_F: f64 = LARGE as f64;

/// Highest charge state an editor accepts.
pub const MAX_CHARGE_STATE: i64 = 100;

/// Editor key for the lowest detected charge state.
pub const CHARGE_STATE_MIN: &str = "feature_detection_charge_state_min";
/// Editor key for the highest detected charge state.
pub const CHARGE_STATE_MAX: &str = "feature_detection_charge_state_max";

/// Editor sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterGroup {
    InstrumentSettings,
    RawData,
    Quantification,
    Warp2D,
    MetaMatch,
    Identification,
    QualityControl,
    QuantitativeTable,
}

impl ParameterGroup {
    pub const ALL: [ParameterGroup; 8] = [
        ParameterGroup::InstrumentSettings,
        ParameterGroup::RawData,
        ParameterGroup::Quantification,
        ParameterGroup::Warp2D,
        ParameterGroup::MetaMatch,
        ParameterGroup::Identification,
        ParameterGroup::QualityControl,
        ParameterGroup::QuantitativeTable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParameterGroup::InstrumentSettings => "Instrument Settings",
            ParameterGroup::RawData => "Raw Data",
            ParameterGroup::Quantification => "Quantification",
            ParameterGroup::Warp2D => "Warp2D",
            ParameterGroup::MetaMatch => "MetaMatch",
            ParameterGroup::Identification => "Identification",
            ParameterGroup::QualityControl => "Quality Control",
            ParameterGroup::QuantitativeTable => "Quantitative Table Generation",
        }
    }

    /// Fields of this group in display order.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        FIELDS.iter().filter(move |f| f.group == *self)
    }
}

/// Kind of value an editor handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Toggle,
    Choice(&'static [&'static str]),
}

/// Description of one editable key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub tooltip: &'static str,
    pub group: ParameterGroup,
    pub kind: FieldKind,
}

/// A value read from or written to an editor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Toggle(bool),
    Choice(String),
}

impl FieldValue {
    /// Text shown in a numeric or choice editor.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Integer(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Toggle(v) => v.to_string(),
            FieldValue::Choice(v) => v.clone(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Integer(v) => Value::from(*v),
            FieldValue::Float(v) => Value::from(*v),
            FieldValue::Toggle(v) => Value::from(*v),
            FieldValue::Choice(v) => Value::from(v.clone()),
        }
    }
}

impl FieldKind {
    /// Parse editor text into a value of this kind.
    pub fn parse(&self, key: &str, text: &str) -> ParameterResult<FieldValue> {
        let text = text.trim();
        let value = match self {
            FieldKind::Integer { .. } => text
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| ParameterError::wrong_kind(key, "an integer"))?,
            FieldKind::Float { .. } => text
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|_| ParameterError::wrong_kind(key, "a number"))?,
            FieldKind::Toggle => text
                .parse::<bool>()
                .map(FieldValue::Toggle)
                .map_err(|_| ParameterError::wrong_kind(key, "true or false"))?,
            FieldKind::Choice(_) => FieldValue::Choice(text.to_string()),
        };
        self.check(key, &value)?;
        Ok(value)
    }

    /// Check that a value has this kind and lies within its bounds.
    pub fn check(&self, key: &str, value: &FieldValue) -> ParameterResult<()> {
        match (self, value) {
            (FieldKind::Integer { min, max }, FieldValue::Integer(v)) => {
                if v < min || v > max {
                    return Err(ParameterError::out_of_range(
                        key,
                        *min as f64,
                        *max as f64,
                        *v as f64,
                    ));
                }
                Ok(())
            }
            (FieldKind::Float { min, max }, FieldValue::Float(v)) => {
                if !v.is_finite() || v < min || v > max {
                    return Err(ParameterError::out_of_range(key, *min, *max, *v));
                }
                Ok(())
            }
            (FieldKind::Toggle, FieldValue::Toggle(_)) => Ok(()),
            (FieldKind::Choice(options), FieldValue::Choice(v)) => {
                if options.contains(&v.as_str()) {
                    Ok(())
                } else {
                    Err(ParameterError::unknown_choice(key, v.clone()))
                }
            }
            (FieldKind::Integer { .. }, _) => Err(ParameterError::wrong_kind(key, "an integer")),
            (FieldKind::Float { .. }, _) => Err(ParameterError::wrong_kind(key, "a number")),
            (FieldKind::Toggle, _) => Err(ParameterError::wrong_kind(key, "true or false")),
            (FieldKind::Choice(_), _) => Err(ParameterError::wrong_kind(key, "one of the listed values")),
        }
    }
}

/// Look up the spec of an editable key.
pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}

impl DdaParameters {
    /// Read the current value of an editable key.
    pub fn field(&self, key: &str) -> ParameterResult<FieldValue> {
        let spec = field_spec(key).ok_or_else(|| ParameterError::unknown_key(key))?;

        match key {
            CHARGE_STATE_MIN => {
                return Ok(FieldValue::Integer(
                    self.feature_detection_charge_states.min() as i64,
                ))
            }
            CHARGE_STATE_MAX => {
                return Ok(FieldValue::Integer(
                    self.feature_detection_charge_states.max() as i64,
                ))
            }
            "qc_plot_fill_alpha" => {
                return Ok(FieldValue::Float(self.qc_plot_fill_alpha.editor_value()))
            }
            _ => {}
        }

        let map = self.to_json_map()?;
        let value = map
            .get(key)
            .ok_or_else(|| ParameterError::unknown_key(key))?;

        match spec.kind {
            FieldKind::Integer { .. } => value
                .as_i64()
                .map(FieldValue::Integer)
                .ok_or_else(|| ParameterError::wrong_kind(key, "an integer")),
            FieldKind::Float { .. } => value
                .as_f64()
                .map(FieldValue::Float)
                .ok_or_else(|| ParameterError::wrong_kind(key, "a number")),
            FieldKind::Toggle => value
                .as_bool()
                .map(FieldValue::Toggle)
                .ok_or_else(|| ParameterError::wrong_kind(key, "true or false")),
            FieldKind::Choice(_) => value
                .as_str()
                .map(|s| FieldValue::Choice(s.to_string()))
                .ok_or_else(|| ParameterError::wrong_kind(key, "one of the listed values")),
        }
    }

    /// Write a value for an editable key.
    ///
    /// The dictionary is left untouched when the value is rejected.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> ParameterResult<()> {
        let spec = field_spec(key).ok_or_else(|| ParameterError::unknown_key(key))?;
        spec.kind.check(key, &value)?;

        match (key, &value) {
            (CHARGE_STATE_MIN, FieldValue::Integer(min)) => {
                let max = self.feature_detection_charge_states.max();
                self.feature_detection_charge_states =
                    ChargeStates::from_range(*min as u32, max)?;
                return Ok(());
            }
            (CHARGE_STATE_MAX, FieldValue::Integer(max)) => {
                let min = self.feature_detection_charge_states.min();
                self.feature_detection_charge_states =
                    ChargeStates::from_range(min, *max as u32)?;
                return Ok(());
            }
            ("qc_plot_fill_alpha", FieldValue::Float(alpha)) => {
                self.qc_plot_fill_alpha = FillAlpha::from_editor_value(*alpha);
                return Ok(());
            }
            _ => {}
        }

        let mut map = self.to_json_map()?;
        map.insert(key.to_string(), value.to_json());
        *self = serde_json::from_value(Value::Object(map))?;
        Ok(())
    }

    /// Parse editor text and write it.
    pub fn set_field_text(&mut self, key: &str, text: &str) -> ParameterResult<()> {
        let spec = field_spec(key).ok_or_else(|| ParameterError::unknown_key(key))?;
        let value = spec.kind.parse(key, text)?;
        self.set_field(key, value)
    }
}

const fn int(min: i64, max: i64) -> FieldKind {
    FieldKind::Integer { min, max }
}

const fn float(min: f64, max: f64) -> FieldKind {
    FieldKind::Float { min, max }
}

/// Every editable key, in display order within its group.
pub static FIELDS: &[FieldSpec] = &[
    // Instrument Settings
    FieldSpec {
        key: "instrument_type",
        label: "Instrument type",
        tooltip: "The type of mass analyser used to acquire the data.",
        group: ParameterGroup::InstrumentSettings,
        kind: FieldKind::Choice(InstrumentType::VALUES),
    },
    FieldSpec {
        key: "resolution_ms1",
        label: "Resolution MS1",
        tooltip: "MS1 resolution set on the mass spectrometer at the time of data acquisition.",
        group: ParameterGroup::InstrumentSettings,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "resolution_msn",
        label: "Resolution MS2",
        tooltip: "MS/MS resolution set on the mass spectrometer at the time of data acquisition.",
        group: ParameterGroup::InstrumentSettings,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "reference_mz",
        label: "Reference m/z",
        tooltip: "Reference m/z at which the resolution is calculated.",
        group: ParameterGroup::InstrumentSettings,
        kind: float(-LARGE_F, LARGE_F),
    },
    FieldSpec {
        key: "avg_fwhm_rt",
        label: "Avg FWHM RT",
        tooltip: "Expected full-width half-maximum width of chromatographic peaks.",
        group: ParameterGroup::InstrumentSettings,
        kind: float(-LARGE_F, LARGE_F),
    },
    // Raw Data
    FieldSpec {
        key: "min_mz",
        label: "Min m/z",
        tooltip: "Filter minimum m/z value for spectra during raw data reading.",
        group: ParameterGroup::RawData,
        kind: float(0.0, LARGE_F),
    },
    FieldSpec {
        key: "max_mz",
        label: "Max m/z",
        tooltip: "Filter maximum m/z value for spectra during raw data reading.",
        group: ParameterGroup::RawData,
        kind: float(0.0, LARGE_F),
    },
    FieldSpec {
        key: "polarity",
        label: "Polarity",
        tooltip: "Filter polarity (positive, negative or both) for spectra during raw data reading. \
                  Only change this if the raw data contains spectra of both polarities.",
        group: ParameterGroup::RawData,
        kind: FieldKind::Choice(Polarity::VALUES),
    },
    FieldSpec {
        key: "min_rt",
        label: "Min retention time",
        tooltip: "Filter minimum retention time value for spectra during raw data reading.",
        group: ParameterGroup::RawData,
        kind: float(0.0, LARGE_F),
    },
    FieldSpec {
        key: "max_rt",
        label: "Max retention time",
        tooltip: "Filter maximum retention time value for spectra during raw data reading.",
        group: ParameterGroup::RawData,
        kind: float(0.0, LARGE_F),
    },
    // Quantification
    FieldSpec {
        key: "num_samples_mz",
        label: "Number of samples m/z",
        tooltip: "Number of sampling points per full-width half-maximum in m/z. Lower values \
                  reduce memory use at the cost of missed peaks or less accurate fitting.",
        group: ParameterGroup::Quantification,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "num_samples_rt",
        label: "Number of samples rt",
        tooltip: "Number of sampling points per full-width half-maximum in retention time. Lower \
                  values reduce memory use at the cost of missed peaks or less accurate fitting.",
        group: ParameterGroup::Quantification,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "smoothing_coefficient_mz",
        label: "Smoothing coefficient (m/z)",
        tooltip: "Amount of smoothing applied for resampling in the m/z dimension.",
        group: ParameterGroup::Quantification,
        kind: float(-LARGE_F, LARGE_F),
    },
    FieldSpec {
        key: "smoothing_coefficient_rt",
        label: "Smoothing coefficient (rt)",
        tooltip: "Amount of smoothing applied for resampling in the retention time dimension.",
        group: ParameterGroup::Quantification,
        kind: float(-LARGE_F, LARGE_F),
    },
    FieldSpec {
        key: CHARGE_STATE_MIN,
        label: "Feature detection min charge",
        tooltip: "Lowest charge state considered during feature detection.",
        group: ParameterGroup::Quantification,
        kind: int(1, MAX_CHARGE_STATE),
    },
    FieldSpec {
        key: CHARGE_STATE_MAX,
        label: "Feature detection max charge",
        tooltip: "Highest charge state considered during feature detection.",
        group: ParameterGroup::Quantification,
        kind: int(1, MAX_CHARGE_STATE),
    },
    FieldSpec {
        key: "max_peaks",
        label: "Max number of peaks",
        tooltip: "Maximum number of peaks per file detected at isotope level, in decreasing \
                  intensity order.",
        group: ParameterGroup::Quantification,
        kind: int(-LARGE, LARGE),
    },
    // Warp2D
    FieldSpec {
        key: "warp2d_slack",
        label: "Slack",
        tooltip: "Number of points each anchor node may move during retention time alignment.",
        group: ParameterGroup::Warp2D,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "warp2d_window_size",
        label: "Window Size",
        tooltip: "Number of points between anchor points.",
        group: ParameterGroup::Warp2D,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "warp2d_num_points",
        label: "Number of points",
        tooltip: "Number of points used to discretize the retention time range.",
        group: ParameterGroup::Warp2D,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "warp2d_rt_expand_factor",
        label: "Expand factor rt",
        tooltip: "Expansion of the retention time range to avoid edge effects at the min/max nodes.",
        group: ParameterGroup::Warp2D,
        kind: float(-LARGE_F, LARGE_F),
    },
    FieldSpec {
        key: "warp2d_peaks_per_window",
        label: "Peaks per window",
        tooltip: "Number of peaks used for similarity calculation in each alignment window.",
        group: ParameterGroup::Warp2D,
        kind: int(-LARGE, LARGE),
    },
    // MetaMatch
    FieldSpec {
        key: "metamatch_fraction",
        label: "Fraction of samples",
        tooltip: "Minimum fraction (0 to 1) of samples of at least one group in which a peak \
                  must be present to be kept.",
        group: ParameterGroup::MetaMatch,
        kind: float(-LARGE_F, LARGE_F),
    },
    FieldSpec {
        key: "metamatch_n_sig_mz",
        label: "Number of sigma (m/z)",
        tooltip: "Number of standard deviations used as tolerance for the m/z radius.",
        group: ParameterGroup::MetaMatch,
        kind: float(-LARGE_F, LARGE_F),
    },
    FieldSpec {
        key: "metamatch_n_sig_rt",
        label: "Number of sigma (rt)",
        tooltip: "Number of standard deviations used as tolerance for the retention time radius.",
        group: ParameterGroup::MetaMatch,
        kind: float(-LARGE_F, LARGE_F),
    },
    // Identification
    FieldSpec {
        key: "ident_max_rank_only",
        label: "Max rank only",
        tooltip: "Only select the most confident PSM from each MS/MS spectrum.",
        group: ParameterGroup::Identification,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "ident_require_threshold",
        label: "Require threshold",
        tooltip: "Read only identifications that pass the target-decoy false discovery rate threshold.",
        group: ParameterGroup::Identification,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "ident_ignore_decoy",
        label: "Ignore decoy",
        tooltip: "Ignore PSMs flagged as decoys by the identification engine.",
        group: ParameterGroup::Identification,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "link_n_sig_mz",
        label: "Max number of sigma for linking (m/z)",
        tooltip: "Tolerance for linking MS/MS events and identifications, in standard deviations of m/z.",
        group: ParameterGroup::Identification,
        kind: float(-LARGE_F, LARGE_F),
    },
    FieldSpec {
        key: "link_n_sig_rt",
        label: "Max number of sigma for linking (rt)",
        tooltip: "Tolerance for linking MS/MS events and identifications, in standard deviations \
                  of retention time.",
        group: ParameterGroup::Identification,
        kind: float(-LARGE_F, LARGE_F),
    },
    // Quality Control
    FieldSpec {
        key: "similarity_num_peaks",
        label: "Similarity number of peaks",
        tooltip: "Number of peaks used for the similarity matrix calculation.",
        group: ParameterGroup::QualityControl,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "qc_plot_palette",
        label: "Plot color palette",
        tooltip: "Plot color palette.",
        group: ParameterGroup::QualityControl,
        kind: FieldKind::Choice(PlotPalette::VALUES),
    },
    FieldSpec {
        key: "qc_plot_extension",
        label: "Plot image format",
        tooltip: "Plot image format.",
        group: ParameterGroup::QualityControl,
        kind: FieldKind::Choice(PlotExtension::VALUES),
    },
    FieldSpec {
        key: "qc_plot_fill_alpha",
        label: "Fill alpha",
        tooltip: "Transparency amount for fill plots. 0 selects dynamic transparency.",
        group: ParameterGroup::QualityControl,
        kind: float(0.0, 1.0),
    },
    FieldSpec {
        key: "qc_plot_line_style",
        label: "Line style",
        tooltip: "For line plots, select pure lines or fill plots.",
        group: ParameterGroup::QualityControl,
        kind: FieldKind::Choice(PlotLineStyle::VALUES),
    },
    FieldSpec {
        key: "qc_plot_font_family",
        label: "Font family",
        tooltip: "Font family.",
        group: ParameterGroup::QualityControl,
        kind: FieldKind::Choice(PlotFontFamily::VALUES),
    },
    FieldSpec {
        key: "qc_plot_dpi",
        label: "Plot dpi",
        tooltip: "Plot dpi.",
        group: ParameterGroup::QualityControl,
        kind: int(1, 1000),
    },
    FieldSpec {
        key: "qc_plot_mz_vs_sigma_mz_max_peaks",
        label: "Max peaks for m/z vs peak width m/z",
        tooltip: "How many peaks are plotted in the m/z vs m/z width QC plot.",
        group: ParameterGroup::QualityControl,
        kind: int(10, LARGE),
    },
    FieldSpec {
        key: "qc_plot_line_alpha",
        label: "Line alpha",
        tooltip: "Transparency amount for line plots.",
        group: ParameterGroup::QualityControl,
        kind: float(0.0, 1.0),
    },
    FieldSpec {
        key: "qc_plot_scatter_alpha",
        label: "Scatter alpha",
        tooltip: "Transparency amount for scatter plots.",
        group: ParameterGroup::QualityControl,
        kind: float(0.0, 1.0),
    },
    FieldSpec {
        key: "qc_plot_scatter_size",
        label: "Scatter size",
        tooltip: "Size of scatter points in QC plots.",
        group: ParameterGroup::QualityControl,
        kind: float(0.1, 10.0),
    },
    FieldSpec {
        key: "qc_plot_min_dynamic_alpha",
        label: "Min dynamic alpha",
        tooltip: "Minimum alpha used with dynamic transparency, so plots stay visible with many samples.",
        group: ParameterGroup::QualityControl,
        kind: float(0.1, 10.0),
    },
    FieldSpec {
        key: "qc_plot_font_size",
        label: "Font size",
        tooltip: "Font size.",
        group: ParameterGroup::QualityControl,
        kind: float(1.0, 15.0),
    },
    FieldSpec {
        key: "qc_plot_fig_size_x",
        label: "Figure size X",
        tooltip: "Figure width.",
        group: ParameterGroup::QualityControl,
        kind: float(1.0, 15.0),
    },
    FieldSpec {
        key: "qc_plot_fig_size_y",
        label: "Figure size Y",
        tooltip: "Figure height.",
        group: ParameterGroup::QualityControl,
        kind: float(1.0, 15.0),
    },
    FieldSpec {
        key: "qc_plot_per_file",
        label: "Plot per file",
        tooltip: "Plot QC figures for individual files instead of one combined figure.",
        group: ParameterGroup::QualityControl,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "qc_plot_fig_legend",
        label: "Figure legend",
        tooltip: "Show the legend in QC plots.",
        group: ParameterGroup::QualityControl,
        kind: FieldKind::Toggle,
    },
    // Quantitative Table Generation
    FieldSpec {
        key: "quant_isotopes",
        label: "Isotopes",
        tooltip: "Isotope quantification method for the quantitative tables.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Choice(IsotopeQuant::VALUES),
    },
    FieldSpec {
        key: "quant_features",
        label: "Features",
        tooltip: "Feature quantification method for the quantitative tables: max (highest isotope), \
                  monoisotopic, or total (sum of isotopes), by height or volume.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Choice(FeatureQuant::VALUES),
    },
    FieldSpec {
        key: "quant_features_charge_state_filter",
        label: "Features charge state filter",
        tooltip: "Remove feature annotations whose detected charge state does not match the \
                  identification engine's.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "quant_ident_linkage",
        label: "Ident linkage",
        tooltip: "Method linking PSMs with quantified isotopes: theoretical m/z from the \
                  identification engine, or the MS/MS event.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Choice(IdentLinkage::VALUES),
    },
    FieldSpec {
        key: "quant_consensus",
        label: "Consensus",
        tooltip: "Generate a sequence consensus for the quantitative table.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "quant_consensus_min_ident",
        label: "Consensus min ident",
        tooltip: "Minimum number of samples with the same identification required for a \
                  consensus sequence.",
        group: ParameterGroup::QuantitativeTable,
        kind: int(-LARGE, LARGE),
    },
    FieldSpec {
        key: "quant_save_all_annotations",
        label: "Save all annotations",
        tooltip: "Save all annotations in addition to the aggregated tables.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "quant_proteins_min_peptides",
        label: "Consensus min peptide",
        tooltip: "Minimum number of peptides needed for considering a protein for quantification.",
        group: ParameterGroup::QuantitativeTable,
        kind: int(1, 50),
    },
    FieldSpec {
        key: "quant_proteins_remove_subset_proteins",
        label: "Remove subset proteins",
        tooltip: "During protein inference, remove proteins whose peptides are contained in a \
                  group with more evidence peptides.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "quant_proteins_ignore_ambiguous_peptides",
        label: "Ignore ambiguous peptides",
        tooltip: "During protein inference, ignore peptides with ambiguous protein identifications.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Toggle,
    },
    FieldSpec {
        key: "quant_proteins_quant_type",
        label: "Protein quantification type",
        tooltip: "Protein inference quantification: razor, unique peptides only, or all peptides.",
        group: ParameterGroup::QuantitativeTable,
        kind: FieldKind::Choice(ProteinQuantType::VALUES),
    },
];
