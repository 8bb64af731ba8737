//! The DDA pipeline settings dictionary.

use serde::{Deserialize, Serialize};

use super::errors::{ParameterError, ParameterResult};
use super::types::{
    ChargeStates, FeatureQuant, FillAlpha, IdentLinkage, InstrumentType, IsotopeQuant,
    PlotExtension, PlotFontFamily, PlotLineStyle, PlotPalette, Polarity, ProteinQuantType,
};

/// Chromatographic peak width used for new projects.
pub const DEFAULT_AVG_FWHM_RT: f64 = 10.0;

/// Complete settings for one DDA pipeline run.
///
/// Field names are the keys the engine reads. Keys missing from a loaded
/// file take their default value, so a deserialized value is always
/// complete. Keys not modelled here are kept in `extra` and passed on to
/// the engine unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdaParameters {
    // Instrument
    pub instrument_type: InstrumentType,
    pub resolution_ms1: i64,
    pub resolution_msn: i64,
    pub reference_mz: f64,
    pub avg_fwhm_rt: f64,

    // Resampling
    pub num_samples_mz: i64,
    pub num_samples_rt: i64,
    pub smoothing_coefficient_mz: f64,
    pub smoothing_coefficient_rt: f64,

    // Retention time alignment
    pub warp2d_slack: i64,
    pub warp2d_window_size: i64,
    pub warp2d_num_points: i64,
    pub warp2d_rt_expand_factor: f64,
    pub warp2d_peaks_per_window: i64,

    // Cross-sample matching
    pub metamatch_fraction: f64,
    pub metamatch_n_sig_mz: f64,
    pub metamatch_n_sig_rt: f64,

    // Feature detection
    pub feature_detection_charge_states: ChargeStates,

    // Raw data
    pub max_peaks: i64,
    pub polarity: Polarity,
    pub min_mz: f64,
    pub max_mz: f64,
    pub min_rt: f64,
    pub max_rt: f64,

    // Identification
    pub link_n_sig_mz: f64,
    pub link_n_sig_rt: f64,
    pub ident_max_rank_only: bool,
    pub ident_require_threshold: bool,
    pub ident_ignore_decoy: bool,

    // Quality control
    pub similarity_num_peaks: i64,
    pub qc_plot_palette: PlotPalette,
    pub qc_plot_extension: PlotExtension,
    pub qc_plot_fill_alpha: FillAlpha,
    pub qc_plot_line_alpha: f64,
    pub qc_plot_scatter_alpha: f64,
    pub qc_plot_scatter_size: f64,
    pub qc_plot_min_dynamic_alpha: f64,
    pub qc_plot_per_file: bool,
    pub qc_plot_line_style: PlotLineStyle,
    pub qc_plot_dpi: i64,
    pub qc_plot_font_family: PlotFontFamily,
    pub qc_plot_font_size: f64,
    pub qc_plot_fig_size_x: f64,
    pub qc_plot_fig_size_y: f64,
    pub qc_plot_fig_legend: bool,
    pub qc_plot_mz_vs_sigma_mz_max_peaks: i64,

    // Quantitative tables
    pub quant_isotopes: IsotopeQuant,
    pub quant_features: FeatureQuant,
    pub quant_features_charge_state_filter: bool,
    pub quant_ident_linkage: IdentLinkage,
    pub quant_consensus: bool,
    pub quant_consensus_min_ident: i64,
    pub quant_save_all_annotations: bool,
    pub quant_proteins_min_peptides: i64,
    pub quant_proteins_remove_subset_proteins: bool,
    pub quant_proteins_ignore_ambiguous_peptides: bool,
    pub quant_proteins_quant_type: ProteinQuantType,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DdaParameters {
    /// Default settings for an instrument and expected peak width.
    ///
    /// Matches the engine's own default factory. Instruments other than
    /// orbitrap share the orbitrap values apart from `instrument_type`.
    pub fn defaults(instrument: InstrumentType, avg_fwhm_rt: f64) -> Self {
        Self {
            instrument_type: instrument,
            resolution_ms1: 70_000,
            resolution_msn: 30_000,
            reference_mz: 200.0,
            avg_fwhm_rt,

            num_samples_mz: 5,
            num_samples_rt: 5,
            smoothing_coefficient_mz: 0.4,
            smoothing_coefficient_rt: 0.4,

            warp2d_slack: 30,
            warp2d_window_size: 100,
            warp2d_num_points: 2000,
            warp2d_rt_expand_factor: 0.2,
            warp2d_peaks_per_window: 100,

            metamatch_fraction: 0.7,
            metamatch_n_sig_mz: 1.5,
            metamatch_n_sig_rt: 1.5,

            feature_detection_charge_states: ChargeStates::default(),

            max_peaks: 1_000_000,
            polarity: Polarity::Both,
            min_mz: 0.0,
            max_mz: 100_000.0,
            min_rt: 0.0,
            max_rt: 100_000.0,

            link_n_sig_mz: 3.0,
            link_n_sig_rt: 3.0,
            ident_max_rank_only: true,
            ident_require_threshold: true,
            ident_ignore_decoy: true,

            similarity_num_peaks: 2000,
            qc_plot_palette: PlotPalette::Husl,
            qc_plot_extension: PlotExtension::Png,
            qc_plot_fill_alpha: FillAlpha::Dynamic,
            qc_plot_line_alpha: 0.5,
            qc_plot_scatter_alpha: 0.3,
            qc_plot_scatter_size: 2.0,
            qc_plot_min_dynamic_alpha: 0.1,
            qc_plot_per_file: false,
            qc_plot_line_style: PlotLineStyle::Fill,
            qc_plot_dpi: 300,
            qc_plot_font_family: PlotFontFamily::SansSerif,
            qc_plot_font_size: 7.0,
            qc_plot_fig_size_x: 7.08661,
            qc_plot_fig_size_y: 7.08661 / 1.618034,
            qc_plot_fig_legend: false,
            qc_plot_mz_vs_sigma_mz_max_peaks: 200_000,

            quant_isotopes: IsotopeQuant::Height,
            quant_features: FeatureQuant::MaxHeight,
            quant_features_charge_state_filter: true,
            quant_ident_linkage: IdentLinkage::MsmsEvent,
            quant_consensus: true,
            quant_consensus_min_ident: 2,
            quant_save_all_annotations: true,
            quant_proteins_min_peptides: 1,
            quant_proteins_remove_subset_proteins: true,
            quant_proteins_ignore_ambiguous_peptides: true,
            quant_proteins_quant_type: ProteinQuantType::Razor,

            extra: serde_json::Map::new(),
        }
    }

    /// Check cross-field constraints before a run.
    pub fn validate(&self) -> ParameterResult<()> {
        if self.feature_detection_charge_states.is_empty() {
            return Err(ParameterError::invalid(
                "feature_detection_charge_states must not be empty",
            ));
        }
        if self.min_mz > self.max_mz {
            return Err(ParameterError::invalid(format!(
                "min_mz ({}) is larger than max_mz ({})",
                self.min_mz, self.max_mz
            )));
        }
        if self.min_rt > self.max_rt {
            return Err(ParameterError::invalid(format!(
                "min_rt ({}) is larger than max_rt ({})",
                self.min_rt, self.max_rt
            )));
        }
        if let FillAlpha::Fixed(alpha) = self.qc_plot_fill_alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(ParameterError::out_of_range(
                    "qc_plot_fill_alpha",
                    0.0,
                    1.0,
                    alpha,
                ));
            }
        }
        Ok(())
    }

    /// Serialize to a JSON object keyed by parameter name.
    pub fn to_json_map(&self) -> ParameterResult<serde_json::Map<String, serde_json::Value>> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(ParameterError::Serialization(
                "parameters did not serialize to an object".to_string(),
            )),
        }
    }
}

impl Default for DdaParameters {
    fn default() -> Self {
        Self::defaults(InstrumentType::Orbitrap, DEFAULT_AVG_FWHM_RT)
    }
}
