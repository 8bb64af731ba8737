//! Pipeline step implementations.
//!
//! Each step handles one state of a run: converting identifications, then
//! running the engine.

mod convert;
mod dda;

pub use convert::ConvertIdentificationsStep;
pub use dda::DdaPipelineStep;
