//! Identification files: pairing with raw data, external tool paths and
//! `.mgf` conversion.

mod conversion;
mod errors;
mod pairing;
mod runner;
mod tools;

pub use conversion::{mzid_path, pepxml_path, IdentificationConverter, DEFAULT_JAVA_MAX_HEAP};
pub use errors::{ConversionError, ConversionResult, ToolPathError, ToolPathResult};
pub use pairing::{
    assign_identifications, file_stem, is_identification_file, is_raw_file, needs_conversion,
    IDENTIFICATION_EXTENSIONS, RAW_EXTENSIONS,
};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};
pub use tools::{ToolKind, ToolPath, ToolPaths};
