//! Project files and the editing session.

mod errors;
mod file;
mod session;

pub use errors::{ProjectError, ProjectResult};
pub use file::{InputFile, ProjectFile};
pub use session::{ProjectSession, PROJECT_FILE_NAME};
