//! Subprocess execution behind a trait so conversions can be tested
//! without the real tools.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A command line to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Program name without its directory, for messages.
    pub fn tool_name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .unwrap_or(&self.program)
            .to_string_lossy()
            .into_owned()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(value: &OsStr) -> String {
    let text = value.to_string_lossy();
    if text.is_empty() || text.contains(char::is_whitespace) {
        format!("\"{}\"", text)
    } else {
        text.into_owned()
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs commands to completion.
///
/// `Err` means the process could not be started; a non-zero exit is an
/// `Ok` output with [`CommandOutput::success`] false.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput>;
}

/// Runs commands with `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!("Running: {}", spec);

        let output = cmd.output()?;
        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let spec = CommandSpec::new("java")
            .arg("-Xmx32g")
            .arg("-jar")
            .arg("MSFragger 3.4.jar");
        assert_eq!(spec.to_string(), "java -Xmx32g -jar \"MSFragger 3.4.jar\"");
    }

    #[test]
    fn tool_name_strips_directory() {
        let spec = CommandSpec::new("/opt/pwiz/idconvert");
        assert_eq!(spec.tool_name(), "idconvert");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_exit_code_and_output() {
        let runner = SystemCommandRunner;

        let ok = runner
            .run(&CommandSpec::new("sh").arg("-c").arg("echo hello"))
            .unwrap();
        assert!(ok.success());
        assert_eq!(ok.stdout.trim(), "hello");

        let failed = runner
            .run(&CommandSpec::new("sh").arg("-c").arg("echo oops >&2; exit 3"))
            .unwrap();
        assert_eq!(failed.exit_code, Some(3));
        assert_eq!(failed.stderr.trim(), "oops");
    }

    #[test]
    fn system_runner_reports_launch_failure() {
        let runner = SystemCommandRunner;
        assert!(runner
            .run(&CommandSpec::new("definitely-not-a-real-program-xyz"))
            .is_err());
    }
}
