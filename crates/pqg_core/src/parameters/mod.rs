//! DDA pipeline parameters.
//!
//! [`DdaParameters`] is the settings dictionary handed to the engine.
//! The [`fields`] registry describes how each key is edited.

mod dda;
mod errors;
pub mod fields;
mod types;

pub use dda::{DdaParameters, DEFAULT_AVG_FWHM_RT};
pub use errors::{ParameterError, ParameterResult};
pub use fields::{field_spec, FieldKind, FieldSpec, FieldValue, ParameterGroup, FIELDS};
pub use types::{
    ChargeStates, FeatureQuant, FillAlpha, IdentLinkage, InstrumentType, IsotopeQuant,
    PlotExtension, PlotFontFamily, PlotLineStyle, PlotPalette, Polarity, ProteinQuantType,
};
