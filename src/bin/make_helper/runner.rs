use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

/// Runs a makefile target and returns what it printed.
pub trait Runner {
    fn run(&self, target: &str) -> String;
}

/// Runs targets by invoking make as a child process.
#[derive(Debug, Clone)]
pub struct MakeRunner {
    command: String,
}

impl MakeRunner {
    pub fn new(command: &str) -> Self {
        MakeRunner {
            command: command.to_string(),
        }
    }

    /// Run `<command> <target>` with stdout and stderr sharing one pipe, so
    /// the output keeps the order in which it was written.
    fn combined_output(&self, target: &str) -> io::Result<(ExitStatus, Vec<u8>)> {
        let (mut reader, writer) = io::pipe()?;
        let mut child = {
            // The command holds copies of the write end; it has to be gone
            // before reading, or the pipe never reports end-of-stream.
            let mut command = Command::new(&self.command);
            command
                .arg(target)
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            command.spawn()?
        };

        let mut output = Vec::new();
        reader.read_to_end(&mut output)?;
        let status = child.wait()?;
        Ok((status, output))
    }
}

impl Runner for MakeRunner {
    /// A failure to start the process is reported as text rather than as an
    /// error.
    fn run(&self, target: &str) -> String {
        match self.combined_output(target) {
            Ok((status, output)) => {
                log::debug!("{} {} exited with {}", self.command, target, status);
                String::from_utf8_lossy(&output).into_owned()
            }
            Err(e) => {
                log::warn!("failed to run {} {}: {}", self.command, target, e);
                format!("Failed to run '{} {}': {}", self.command, target, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command() {
        let runner = MakeRunner::new("/nonexistent/make");
        let output = runner.run("all");
        assert!(output.starts_with("Failed to run '/nonexistent/make all'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let runner = MakeRunner::new("echo");
        assert_eq!(runner.run("build"), "build\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_interleaves_stdout_and_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-make");
        std::fs::write(
            &script,
            "#!/bin/sh\necho \"step1 $1\"\necho oops >&2\necho step2\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runner = MakeRunner::new(script.to_str().unwrap());
        assert_eq!(runner.run("all"), "step1 all\noops\nstep2\n");
    }
}
