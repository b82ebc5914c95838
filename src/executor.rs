use std::process::{Command, Stdio};
use anyhow::Result;
use log::info;

/// Starts a chosen command. The controller only talks to this trait.
pub trait Launcher {
    fn launch(&mut self, command: &str) -> Result<()>;
}

/// Hands the command line to `sh`, replacing the shell with the program.
pub struct ShellLauncher;

impl Launcher for ShellLauncher {
    fn launch(&mut self, command: &str) -> Result<()> {
        if command.trim().is_empty() {
            return Ok(());
        }
        info!("Launching: {}", command);
        Command::new("sh")
            .arg("-c")
            .arg(format!("exec {}", command))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Remembers launches instead of running them.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingLauncher {
    pub launched: Vec<String>,
}

#[cfg(test)]
impl Launcher for RecordingLauncher {
    fn launch(&mut self, command: &str) -> Result<()> {
        self.launched.push(command.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_command_is_not_spawned() {
        assert!(ShellLauncher.launch("   ").is_ok());
    }

    #[test]
    fn shell_runs_command_line() {
        assert!(ShellLauncher.launch("true --ignored-argument").is_ok());
    }
}
