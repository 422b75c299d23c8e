//! System information collection (OS, kernel, uptime, shell, terminal, locale)

use crate::collectors::{env_var, process, EnvLookup};
use crate::data::OsInfo;
use crate::error::{KernelviewError, Result};
use crate::platform::Platform;
use crate::utils::{command::*, file::*, parsing::*};
use std::path::Path;
use sysinfo::System;

/// Marker files checked in order when neither os-release nor lsb-release names the distro
const DISTRO_FILES: &[(&str, &str)] = &[
    ("etc/redhat-release", "Red Hat"),
    ("etc/debian_version", "Debian"),
    ("etc/alpine-release", "Alpine Linux"),
    ("etc/arch-release", "Arch Linux"),
    ("etc/gentoo-release", "Gentoo"),
    ("etc/slackware-version", "Slackware"),
];

/// Collect OS-related information (parallelized for speed)
pub fn collect_os_info(platform: Platform) -> OsInfo {
    let ((name, kernel), ((uptime, shell), (terminal, locale))) = rayon::join(
        || rayon::join(|| os_name(platform), || kernel(platform)),
        || {
            rayon::join(
                || rayon::join(uptime, || shell(platform)),
                || rayon::join(|| terminal(platform), || locale(platform)),
            )
        },
    );

    OsInfo {
        name,
        kernel,
        uptime,
        shell,
        terminal,
        locale,
    }
}

/// Human readable OS name with version
pub fn os_name(platform: Platform) -> String {
    match platform {
        Platform::Linux => linux_os_name(Path::new("/")),
        Platform::Windows => {
            let product = System::long_os_version().unwrap_or_else(|| "Windows".to_string());
            let build = System::kernel_version().unwrap_or_else(|| "Unknown".to_string());
            format!("{} (Build {})", product, build)
        }
        Platform::MacOs => {
            let version = run_command_or_empty("sw_vers", &["-productVersion"]);
            let build = run_command_or_empty("sw_vers", &["-buildVersion"]);
            format!("macOS {} (Build {})", version, build)
        }
        Platform::Other => System::long_os_version().unwrap_or_else(|| "Unknown".to_string()),
    }
}

/// Resolve the distribution name from release files below `root`
pub fn linux_os_name(root: &Path) -> String {
    if let Ok(os_release) = read_key_value_file(root.join("etc/os-release")) {
        if let Some(pretty) = os_release.get("PRETTY_NAME").filter(|v| !v.is_empty()) {
            return pretty.clone();
        }
    }

    if let Ok(lsb) = read_key_value_file(root.join("etc/lsb-release")) {
        if let Some(description) = lsb.get("DISTRIB_DESCRIPTION").filter(|v| !v.is_empty()) {
            return description.clone();
        }
        if let (Some(id), Some(release)) = (
            lsb.get("DISTRIB_ID").filter(|v| !v.is_empty()),
            lsb.get("DISTRIB_RELEASE").filter(|v| !v.is_empty()),
        ) {
            return format!("{} {}", id, release);
        }
    }

    for (file, name) in DISTRO_FILES {
        let path = root.join(file);
        if file_exists(&path) {
            let contents = read_file_safe(&path).unwrap_or_default();
            return format!("{} {}", name, contents.trim()).trim_end().to_string();
        }
    }

    format!(
        "Linux {}",
        System::kernel_version().unwrap_or_else(|| "Unknown".to_string())
    )
}

/// Kernel name and release
pub fn kernel(platform: Platform) -> String {
    match platform {
        Platform::Linux => linux_kernel().unwrap_or_else(|e| {
            log::debug!("kernel probe failed: {}", e);
            "Unknown".to_string()
        }),
        Platform::Windows => System::kernel_version()
            .map(|build| format!("Windows NT {}", build))
            .unwrap_or_else(|| "Unknown".to_string()),
        Platform::MacOs => format!("Darwin {}", run_command_or_empty("uname", &["-r"])),
        Platform::Other => "Unknown".to_string(),
    }
}

fn linux_kernel() -> Result<String> {
    if let (Ok(name), Ok(release)) = (run_command("uname", &["-s"]), run_command("uname", &["-r"])) {
        return Ok(format!("{} {}", name, release));
    }

    // /proc/version is a single line: "Linux version 6.1.0-13-amd64 (...)"
    let version_info = read_first_line("/proc/version")?;
    parse_proc_version(&version_info)
        .map(|release| format!("Linux {}", release))
        .ok_or_else(|| KernelviewError::detection("Kernel version not found"))
}

pub fn parse_proc_version(line: &str) -> Option<String> {
    line.split_whitespace().nth(2).map(str::to_string)
}

/// Time since boot, `[N days, ]H:MM:SS`
pub fn uptime() -> String {
    format_uptime(uptime_seconds())
}

fn uptime_seconds() -> u64 {
    if cfg!(target_os = "linux") {
        if let Ok(line) = read_first_line("/proc/uptime") {
            if let Some(secs) = line
                .split_whitespace()
                .next()
                .and_then(|s| s.parse::<f64>().ok())
            {
                return secs as u64;
            }
        }
    }
    System::uptime()
}

/// Current shell with its version when it can be determined
pub fn shell(platform: Platform) -> String {
    let shell_path = env_var("SHELL").or_else(|| {
        if platform == Platform::Windows {
            return None;
        }
        let ppid = process::parent_pid()?.to_string();
        run_command("ps", &["-p", &ppid, "-o", "comm="])
            .ok()
            .filter(|comm| !comm.is_empty())
    });

    match shell_path {
        Some(path) => {
            let name = program_basename(&path);
            let version = shell_version(&path, &name).unwrap_or_default();
            format_shell(&name, &version)
        }
        None => shell_fallback(platform, &env_var),
    }
}

fn shell_version(path: &str, name: &str) -> Option<String> {
    let output = match name {
        "bash" | "zsh" | "fish" => run_command(path, &["--version"]).ok()?,
        "powershell.exe" => run_command(
            "powershell",
            &["-NoProfile", "-Command", "$PSVersionTable.PSVersion.ToString()"],
        )
        .ok()?,
        _ => return None,
    };
    parse_shell_version(name, &output)
}

/// Pull the version number out of `<shell> --version` output
pub fn parse_shell_version(name: &str, output: &str) -> Option<String> {
    let first_line = output.lines().next()?;
    let tokens: Vec<&str> = first_line.split(' ').collect();
    let version = match name {
        // GNU bash, version 5.2.15(1)-release (x86_64-pc-linux-gnu)
        "bash" => tokens.get(3)?.split('(').next()?,
        // zsh 5.9 (x86_64-debian-linux-gnu)
        "zsh" => *tokens.get(1)?,
        // fish, version 3.6.0
        "fish" => *tokens.get(2)?,
        "powershell.exe" => first_line.trim(),
        _ => return None,
    };
    Some(version.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn shell_display_name(name: &str) -> String {
    match name {
        "bash" => "Bash".to_string(),
        "zsh" => "Zsh".to_string(),
        "fish" => "Fish".to_string(),
        "dash" => "Dash".to_string(),
        "ksh" => "KornShell".to_string(),
        "tcsh" => "Tcsh".to_string(),
        "csh" => "Csh".to_string(),
        "sh" => "Bourne Shell".to_string(),
        "ash" => "Almquist Shell".to_string(),
        "mksh" => "MirBSD KornShell".to_string(),
        "powershell.exe" => "PowerShell".to_string(),
        other => capitalize(other),
    }
}

pub fn format_shell(name: &str, version: &str) -> String {
    format!("{} {}", shell_display_name(name), version)
        .trim()
        .to_string()
}

/// Shell guess when `$SHELL` is unset
pub fn shell_fallback(platform: Platform, env: EnvLookup<'_>) -> String {
    if platform == Platform::Windows {
        if env("PSModulePath").is_some() {
            let version = shell_version("powershell", "powershell.exe").unwrap_or_default();
            return format_shell("powershell.exe", &version);
        }
        if env("MSYSTEM").is_some_and(|msystem| msystem.contains("MINGW")) {
            return "Git Bash".to_string();
        }
        if env("COMSPEC").is_some_and(|comspec| comspec.to_lowercase().contains("cmd.exe")) {
            return "CMD".to_string();
        }
        if env("WT_SESSION").is_some() {
            return "Windows Terminal".to_string();
        }
    }
    "Unknown Shell".to_string()
}

/// Terminal emulator name
pub fn terminal(platform: Platform) -> String {
    terminal_with(platform, &env_var, process::parent_process_name)
}

pub fn terminal_with(
    platform: Platform,
    env: EnvLookup<'_>,
    parent_name: impl FnOnce() -> Option<String>,
) -> String {
    match platform {
        Platform::Linux => {
            if let Some(term) = env("TERM_PROGRAM") {
                return dashes_to_title(&term);
            }
            if let Some(term) = env("TERM").filter(|term| term != "xterm-256color") {
                return capitalize(&term);
            }
            parent_name()
                .map(|name| dashes_to_title(&name))
                .unwrap_or_else(|| "Unknown".to_string())
        }
        Platform::Windows => {
            if env("WT_SESSION").is_some() {
                return "Windows Terminal".to_string();
            }
            let parent = parent_name().unwrap_or_default().to_lowercase();
            if parent.contains("cmd.exe") {
                "CMD".to_string()
            } else if parent.contains("powershell.exe") {
                "PowerShell".to_string()
            } else if parent.contains("bash.exe") || parent.contains("wsl.exe") {
                "WSL Bash".to_string()
            } else {
                "Unknown Windows Terminal".to_string()
            }
        }
        Platform::MacOs => env("TERM_PROGRAM").unwrap_or_else(|| "Terminal".to_string()),
        Platform::Other => "Unknown".to_string(),
    }
}

/// Locale (the LANG setting)
pub fn locale(platform: Platform) -> String {
    match platform {
        Platform::Windows => env_var("LANG").unwrap_or_else(|| "Unknown Windows Locale".to_string()),
        Platform::Linux | Platform::MacOs => {
            let output = run_command_or_empty("locale", &[]);
            parse_locale_lang(&output)
                .or_else(|| env_var("LANG"))
                .or_else(|| env_var("LC_ALL"))
                .unwrap_or_else(|| "Unknown".to_string())
        }
        Platform::Other => "Unknown".to_string(),
    }
}

/// LANG from `locale` output; quoted or bare values are both accepted
pub fn parse_locale_lang(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("LANG="))
        .map(|value| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
