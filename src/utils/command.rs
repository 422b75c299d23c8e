//! Command execution utilities

use crate::error::{KernelviewError, Result};
use std::env;
use std::process::Command;

/// Execute a command and return stdout as String
///
/// stderr is captured and discarded. A non-zero exit status is an error.
pub fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        log::debug!("could not spawn '{}': {}", program, e);
        KernelviewError::from(e)
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        log::debug!("'{}' exited with {:?}", program, output.status.code());
        Err(KernelviewError::Command {
            program: program.to_string(),
            code: output.status.code(),
        })
    }
}

/// Like [`run_command`], but an empty string stands in for any failure
pub fn run_command_or_empty(program: &str, args: &[&str]) -> String {
    run_command(program, args).unwrap_or_default()
}

/// Execute command and return success status only
pub fn command_succeeds(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Check if a command exists in PATH
///
/// On Windows the PATHEXT extensions are tried as well.
pub fn command_exists(program: &str) -> bool {
    let Some(path) = env::var_os("PATH") else {
        return false;
    };
    let extensions = executable_extensions();

    env::split_paths(&path).any(|dir| {
        extensions.iter().any(|ext| {
            dir.join(format!("{}{}", program, ext)).is_file()
        })
    })
}

fn executable_extensions() -> Vec<String> {
    let mut extensions = vec![String::new()];
    if cfg!(windows) {
        let pathext = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
        extensions.extend(
            pathext
                .split(';')
                .filter(|ext| !ext.is_empty())
                .map(|ext| ext.to_lowercase()),
        );
    }
    extensions
}

/// Final path component of a program path, e.g. `/usr/bin/zsh` -> `zsh`
pub fn program_basename(path: &str) -> String {
    // Windows paths may show up on any platform via $SHELL in MSYS environments
    path.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(path)
        .to_string()
}
