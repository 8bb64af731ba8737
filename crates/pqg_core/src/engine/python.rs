//! Engine backed by the `pastaq` Python package.
//!
//! A child interpreter reads one JSON request from stdin and calls into
//! the package. Output is unbuffered so lines reach the log as the
//! pipeline prints them.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;

use serde::Serialize;

use crate::logging::LogSink;
use crate::parameters::{DdaParameters, InstrumentType};
use crate::project::InputFile;

use super::errors::{EngineError, EngineResult};
use super::PipelineEngine;

const ERROR_PREFIX: &str = "ERROR:";
const PARAMETERS_PREFIX: &str = "PARAMETERS ";

const ENGINE_SCRIPT: &str = r#"
import json
import sys
import traceback

try:
    import pastaq
except Exception as e:
    print("ERROR: cannot import pastaq: {}".format(e), file=sys.stderr)
    sys.exit(2)

request = json.load(sys.stdin)
try:
    if request["command"] == "default_parameters":
        params = pastaq.default_parameters(request["instrument_type"], request["avg_fwhm_rt"])
        print("PARAMETERS " + json.dumps(params))
    elif request["command"] == "dda_pipeline":
        pastaq.dda_pipeline(request["parameters"], request["input_files"], request["output_dir"])
    else:
        raise ValueError("unknown command " + str(request["command"]))
except Exception as e:
    traceback.print_exc()
    print("ERROR: {}".format(e), flush=True)
    sys.exit(1)
"#;

#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum EngineRequest<'a> {
    DefaultParameters {
        instrument_type: &'a str,
        avg_fwhm_rt: f64,
    },
    DdaPipeline {
        parameters: &'a DdaParameters,
        input_files: &'a [InputFile],
        output_dir: &'a Path,
    },
}

/// Runs the engine in a Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonEngine {
    program: String,
}

impl PythonEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn(&self, request: &EngineRequest<'_>) -> EngineResult<Child> {
        tracing::debug!("Starting engine with {}", self.program);

        let mut child = Command::new(&self.program)
            .arg("-u")
            .arg("-c")
            .arg(ENGINE_SCRIPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::launch(&self.program, e))?;

        let payload = serde_json::to_vec(request)?;
        if let Some(mut stdin) = child.stdin.take() {
            // The child may exit before reading; its exit status reports why.
            if let Err(e) = stdin.write_all(&payload) {
                tracing::warn!("Writing engine request failed: {}", e);
            }
        }
        Ok(child)
    }

    /// Run a request, forwarding output to `logger` and collecting stdout.
    fn execute(&self, request: EngineRequest<'_>, logger: &LogSink) -> EngineResult<Vec<String>> {
        let mut child = self.spawn(&request)?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (out, err) = thread::scope(|scope| {
            let out = scope.spawn(|| drain(stdout, logger, false));
            let err = scope.spawn(|| drain(stderr, logger, true));
            (
                out.join().unwrap_or_default(),
                err.join().unwrap_or_default(),
            )
        });

        let status = child.wait()?;
        if status.success() {
            return Ok(out.lines);
        }

        let message = out
            .error
            .or(err.error)
            .or_else(|| err.lines.last().cloned())
            .unwrap_or_else(|| match status.code() {
                Some(code) => format!("engine exited with code {}", code),
                None => "engine was terminated by a signal".to_string(),
            });
        Err(EngineError::pipeline_failed(status.code(), message))
    }
}

impl Default for PythonEngine {
    fn default() -> Self {
        Self::new(if cfg!(windows) { "python" } else { "python3" })
    }
}

impl PipelineEngine for PythonEngine {
    fn name(&self) -> &str {
        "pastaq"
    }

    fn default_parameters(
        &self,
        instrument: InstrumentType,
        avg_fwhm_rt: f64,
    ) -> EngineResult<DdaParameters> {
        let request = EngineRequest::DefaultParameters {
            instrument_type: instrument.as_str(),
            avg_fwhm_rt,
        };

        let lines = self.execute(request, &LogSink::discard())?;
        let payload = lines
            .iter()
            .rev()
            .find_map(|line| line.strip_prefix(PARAMETERS_PREFIX))
            .ok_or_else(|| EngineError::Protocol("no parameters in engine output".to_string()))?;
        Ok(serde_json::from_str(payload)?)
    }

    fn run_dda_pipeline(
        &self,
        parameters: &DdaParameters,
        input_files: &[InputFile],
        output_dir: &Path,
        logger: &LogSink,
    ) -> EngineResult<()> {
        let request = EngineRequest::DdaPipeline {
            parameters,
            input_files,
            output_dir,
        };
        self.execute(request, logger).map(|_| ())
    }
}

#[derive(Debug, Default)]
struct Drained {
    lines: Vec<String>,
    error: Option<String>,
}

/// Forward each line of `reader` to the log and remember the last error line.
fn drain<R: Read>(reader: Option<R>, logger: &LogSink, is_stderr: bool) -> Drained {
    let mut drained = Drained::default();
    let Some(reader) = reader else {
        return drained;
    };

    for line in BufReader::new(reader).lines().map_while(Result::ok) {
        if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
            drained.error = Some(message.trim().to_string());
        }
        if !line.starts_with(PARAMETERS_PREFIX) {
            logger.output_line(&line, is_stderr);
        }
        if !is_stderr {
            drained.lines.push(line);
        }
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogConfig;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capturing_sink() -> (LogSink, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        let config = LogConfig {
            show_timestamps: false,
            ..LogConfig::default()
        };
        let sink = LogSink::callback_only(
            config,
            Box::new(move |msg: &str| captured.lock().push(msg.to_string())),
        );
        (sink, lines)
    }

    #[test]
    fn drain_keeps_last_error_line() {
        let (sink, lines) = capturing_sink();
        let input = "Reading a.mzXML\nERROR: first\nERROR: file not found\n";

        let drained = drain(Some(input.as_bytes()), &sink, false);

        assert_eq!(drained.error.as_deref(), Some("file not found"));
        assert_eq!(drained.lines.len(), 3);
        assert_eq!(lines.lock()[0], "Reading a.mzXML");
    }

    #[test]
    fn drain_marks_stderr_lines() {
        let (sink, lines) = capturing_sink();
        let drained = drain(Some("Traceback".as_bytes()), &sink, true);

        assert!(drained.lines.is_empty());
        assert_eq!(lines.lock()[0], "[stderr] Traceback");
    }

    #[test]
    fn request_is_tagged_by_command() {
        let files = vec![InputFile::new("/d/a.mzXML")];
        let request = EngineRequest::DdaPipeline {
            parameters: &DdaParameters::default(),
            input_files: &files,
            output_dir: Path::new("/out"),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["command"], "dda_pipeline");
        assert_eq!(value["parameters"]["instrument_type"], "orbitrap");
        assert_eq!(value["input_files"][0]["raw_path"], "/d/a.mzXML");
        assert_eq!(value["output_dir"], "/out");
    }

    #[test]
    fn missing_interpreter_is_a_launch_error() {
        let engine = PythonEngine::new("no-such-python-interpreter-xyz");
        let err = engine
            .run_dda_pipeline(
                &DdaParameters::default(),
                &[],
                Path::new("/tmp"),
                &LogSink::discard(),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Launch { .. }));
    }

    #[cfg(unix)]
    fn fake_interpreter(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-python");
        std::fs::write(&path, format!("#!/bin/sh\ncat > /dev/null\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[test]
    fn output_is_streamed_and_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_interpreter(
            dir.path(),
            "echo 'Starting DDA Pipeline'\necho 'ERROR: no input files' \nexit 1",
        );
        let (sink, lines) = capturing_sink();

        let err = PythonEngine::new(program)
            .run_dda_pipeline(&DdaParameters::default(), &[], dir.path(), &sink)
            .unwrap_err();

        match err {
            EngineError::PipelineFailed { exit_code, message } => {
                assert_eq!(exit_code, Some(1));
                assert_eq!(message, "no input files");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(lines.lock().iter().any(|l| l == "Starting DDA Pipeline"));
    }

    #[cfg(unix)]
    #[test]
    fn default_parameters_are_parsed_from_output() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_interpreter(
            dir.path(),
            r#"echo 'loading'
echo 'PARAMETERS {"instrument_type": "tof", "resolution_ms1": 30000}'"#,
        );

        let params = PythonEngine::new(program)
            .default_parameters(InstrumentType::Tof, 10.0)
            .unwrap();

        assert_eq!(params.instrument_type, InstrumentType::Tof);
        assert_eq!(params.resolution_ms1, 30000);
        assert_eq!(params.warp2d_slack, DdaParameters::default().warp2d_slack);
    }
}
