//! Conversion of `.mgf` spectra into `.mzID` identifications.
//!
//! The search engine (MSFragger) writes `<stem>.pepXML` next to the input,
//! then the converter (idconvert) turns it into `<stem>.mzID` in the same
//! directory. The intermediate file is removed afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogSink;

use super::errors::{ConversionError, ConversionResult};
use super::runner::{CommandRunner, CommandSpec};
use super::tools::ToolPaths;

/// Default JVM heap for the search engine.
pub const DEFAULT_JAVA_MAX_HEAP: &str = "32g";

/// Path of the identification file produced for `mgf`.
pub fn mzid_path(mgf: &Path) -> PathBuf {
    mgf.with_extension("mzID")
}

/// Path of the search engine output for `mgf`.
pub fn pepxml_path(mgf: &Path) -> PathBuf {
    mgf.with_extension("pepXML")
}

/// The search engine output as it exists on disk, in either spelling.
fn find_pepxml(mgf: &Path) -> Option<PathBuf> {
    ["pepXML", "pepxml"]
        .into_iter()
        .map(|ext| mgf.with_extension(ext))
        .find(|path| path.is_file())
}

/// Runs the search engine and converter for one input at a time.
pub struct IdentificationConverter<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolPaths,
    logger: &'a LogSink,
    java: String,
    java_max_heap: String,
}

impl<'a> IdentificationConverter<'a> {
    pub fn new(runner: &'a dyn CommandRunner, tools: &'a ToolPaths, logger: &'a LogSink) -> Self {
        Self {
            runner,
            tools,
            logger,
            java: "java".to_string(),
            java_max_heap: DEFAULT_JAVA_MAX_HEAP.to_string(),
        }
    }

    /// Use a different Java launcher and heap size.
    pub fn with_java(mut self, program: impl Into<String>, max_heap: impl Into<String>) -> Self {
        self.java = program.into();
        self.java_max_heap = max_heap.into();
        self
    }

    /// Convert `mgf` and return the path of the `.mzID` file.
    ///
    /// If the `.mzID` already exists it is returned without running anything.
    pub fn process(&self, mgf: &Path) -> ConversionResult<PathBuf> {
        let mgf = std::path::absolute(mgf).map_err(|e| ConversionError::io("resolving input path", e))?;
        let mzid = mzid_path(&mgf);
        if mzid.exists() {
            self.logger
                .info(&format!("Using existing identification {}", mzid.display()));
            return Ok(mzid);
        }

        self.tools.require_all()?;

        let out_dir = mgf
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ConversionError::NotMgf(mgf.clone()))?;

        self.logger.section(&format!(
            "Converting {}",
            mgf.file_name().unwrap_or(mgf.as_os_str()).to_string_lossy()
        ));

        let search = self.search_engine_command(&mgf);
        self.run_tool(&search)
            .map_err(ConversionError::search_engine_failed)?;

        let pep = find_pepxml(&mgf).ok_or_else(|| ConversionError::MissingIntermediate {
            path: pepxml_path(&mgf),
        })?;

        let convert = CommandSpec::new(&self.tools.converter.path)
            .arg(&pep)
            .arg("-o")
            .arg(&out_dir);
        self.run_tool(&convert)
            .map_err(ConversionError::converter_failed)?;

        fs::remove_file(&pep).map_err(|e| ConversionError::io("deleting .pepXML", e))?;

        if !mzid.exists() {
            return Err(ConversionError::MissingOutput { path: mzid });
        }

        self.logger
            .success(&format!("Wrote {}", mzid.display()));
        Ok(mzid)
    }

    /// `java -Xmx<heap> -jar <jar> <params> <mgf>`, run from the jar's directory.
    fn search_engine_command(&self, mgf: &Path) -> CommandSpec {
        let jar = &self.tools.search_engine.path;
        let jar_name = jar.file_name().unwrap_or(jar.as_os_str());

        let mut spec = CommandSpec::new(&self.java)
            .arg(format!("-Xmx{}", self.java_max_heap))
            .arg("-jar")
            .arg(jar_name)
            .arg(&self.tools.search_params.path)
            .arg(mgf);
        if let Some(dir) = jar.parent().filter(|d| !d.as_os_str().is_empty()) {
            spec = spec.current_dir(dir);
        }
        spec
    }

    fn run_tool(&self, spec: &CommandSpec) -> Result<(), String> {
        let tool = spec.tool_name();
        self.logger.command(&spec.to_string());

        let output = self
            .runner
            .run(spec)
            .map_err(|e| format!("failed to start {}: {}", tool, e))?;

        for line in output.stdout.lines() {
            self.logger.output_line(line, false);
        }
        for line in output.stderr.lines() {
            self.logger.output_line(line, true);
        }

        if output.success() {
            return Ok(());
        }

        self.logger.show_tail(&format!("{} output", tool));
        Err(match output.exit_code {
            Some(code) => format!("{} exited with code {}", tool, code),
            None => format!("{} was terminated by a signal", tool),
        })
    }
}
