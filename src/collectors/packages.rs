//! Installed package counts per package manager

use crate::error::{KernelviewError, Result};
use crate::platform::Platform;
use crate::utils::{command::*, file::*};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

const PACMAN_DB: &str = "/var/lib/pacman/local";
const PORTAGE_DB: &str = "/var/db/pkg";

/// Package managers kernelview knows how to count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Pacman,
    Dnf,
    Flatpak,
    Snap,
    Nix,
    Xbps,
    Portage,
    Homebrew,
    MacPorts,
    Chocolatey,
    Winget,
    Scoop,
}

impl PackageManager {
    /// Managers checked on each platform, in display order
    pub fn for_platform(platform: Platform) -> &'static [PackageManager] {
        use PackageManager::*;
        match platform {
            Platform::Linux => &[Apt, Pacman, Dnf, Flatpak, Snap, Nix, Xbps, Portage],
            Platform::MacOs => &[Homebrew, MacPorts],
            Platform::Windows => &[Chocolatey, Winget, Scoop],
            Platform::Other => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PackageManager::Apt => "APT",
            PackageManager::Pacman => "Pacman",
            PackageManager::Dnf => "DNF",
            PackageManager::Flatpak => "Flatpak",
            PackageManager::Snap => "Snap",
            PackageManager::Nix => "Nix",
            PackageManager::Xbps => "XBPS",
            PackageManager::Portage => "Portage",
            PackageManager::Homebrew => "Homebrew",
            PackageManager::MacPorts => "MacPorts",
            PackageManager::Chocolatey => "Chocolatey",
            PackageManager::Winget => "Winget",
            PackageManager::Scoop => "Scoop",
        }
    }

    /// Program whose presence on PATH marks the manager as installed
    fn binary(self) -> &'static str {
        match self {
            PackageManager::Apt => "dpkg-query",
            PackageManager::Pacman => "pacman",
            PackageManager::Dnf => "dnf",
            PackageManager::Flatpak => "flatpak",
            PackageManager::Snap => "snap",
            PackageManager::Nix => "nix-store",
            PackageManager::Xbps => "xbps-query",
            PackageManager::Portage => "emerge",
            PackageManager::Homebrew => "brew",
            PackageManager::MacPorts => "port",
            PackageManager::Chocolatey => "choco",
            PackageManager::Winget => "winget",
            PackageManager::Scoop => "scoop",
        }
    }

    fn is_installed(self) -> bool {
        match self {
            // The database is enough, the CLI is not required to count
            PackageManager::Pacman => file_exists(PACMAN_DB) || command_exists(self.binary()),
            PackageManager::Portage => file_exists(PORTAGE_DB),
            PackageManager::Dnf => command_exists("dnf") || command_exists("rpm"),
            _ => command_exists(self.binary()),
        }
    }

    /// Number of installed packages
    pub fn count(self) -> Result<usize> {
        match self {
            PackageManager::Apt => {
                let output = run_command("dpkg-query", &["-f", "${binary:Package}\n", "-W"])?;
                Ok(count_lines(&output, 0))
            }
            PackageManager::Pacman => {
                if file_exists(PACMAN_DB) {
                    count_subdirs(Path::new(PACMAN_DB))
                } else {
                    Ok(count_lines(&run_command("pacman", &["-Qq"])?, 0))
                }
            }
            PackageManager::Dnf => dnf_count(),
            PackageManager::Flatpak => {
                let output = run_command("flatpak", &["list", "--columns=application"])?;
                Ok(count_lines(&output, 0))
            }
            PackageManager::Snap => Ok(count_lines(&run_command("snap", &["list"])?, 1)),
            PackageManager::Nix => {
                let output = run_command(
                    "nix-store",
                    &["--query", "--requisites", "/run/current-system/sw"],
                )?;
                Ok(count_lines(&output, 0))
            }
            PackageManager::Xbps => Ok(count_lines(&run_command("xbps-query", &["-l"])?, 0)),
            PackageManager::Portage => portage_count(Path::new(PORTAGE_DB)),
            PackageManager::Homebrew => Ok(count_lines(&run_command("brew", &["list"])?, 0)),
            // First line is "The following ports are currently installed:"
            PackageManager::MacPorts => Ok(count_lines(&run_command("port", &["installed"])?, 1)),
            PackageManager::Chocolatey => powershell_count("choco list --local-only"),
            PackageManager::Winget => powershell_count("winget list"),
            PackageManager::Scoop => powershell_count("scoop list"),
        }
    }
}

/// Package counts for every installed manager, e.g. `APT (1834), Flatpak (12)`
pub fn package_counts(platform: Platform) -> String {
    let counts: Vec<(&'static str, usize)> = PackageManager::for_platform(platform)
        .par_iter()
        .filter(|manager| manager.is_installed())
        .filter_map(|manager| match manager.count() {
            Ok(count) => Some((manager.label(), count)),
            Err(e) => {
                log::debug!("{} count failed: {}", manager.label(), e);
                None
            }
        })
        .collect();

    format_package_counts(&counts)
}

/// Managers with no packages are left out
pub fn format_package_counts(counts: &[(&str, usize)]) -> String {
    let shown: Vec<String> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| format!("{} ({})", label, count))
        .collect();

    if shown.is_empty() {
        "None detected".to_string()
    } else {
        shown.join(", ")
    }
}

/// Non-empty lines after skipping `header` leading lines
pub fn count_lines(output: &str, header: usize) -> usize {
    output
        .lines()
        .skip(header)
        .filter(|line| !line.trim().is_empty())
        .count()
}

fn dnf_count() -> Result<usize> {
    if command_exists("dnf") {
        let output = run_command("dnf", &["list", "installed", "--quiet"])?;
        return Ok(output
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with("Installed Packages"))
            .count());
    }

    Ok(count_lines(&run_command("rpm", &["-qa"])?, 0))
}

/// One directory per installed package
pub fn count_subdirs(dir: &Path) -> Result<usize> {
    Ok(fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .count())
}

/// Portage keeps `<category>/<package>` directories
pub fn portage_count(root: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(root)?.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if path.is_dir() {
            count += count_subdirs(&path)?;
        }
    }
    Ok(count)
}

fn powershell_count(pipeline: &str) -> Result<usize> {
    let script = format!(
        "{} | Measure-Object | Select-Object -ExpandProperty Count",
        pipeline
    );
    let output = run_command("powershell", &["-NoProfile", "-Command", &script])?;
    parse_count(&output)
}

pub fn parse_count(output: &str) -> Result<usize> {
    let text = output.trim();
    text.parse()
        .map_err(|_| KernelviewError::parse(format!("not a count: '{}'", text)))
}
