//! Installed programming languages and the software summary

use crate::collectors::packages;
use crate::data::SoftwareInfo;
use crate::platform::Platform;
use crate::utils::{command::*, parsing::*};
use rayon::prelude::*;

const SHOWN_LANGUAGES: usize = 5;

/// Language name and the command that proves it is installed
const LANGUAGE_PROBES: &[(&str, &str, &[&str])] = &[
    ("Python", "python3", &["--version"]),
    ("Node.js", "node", &["--version"]),
    ("C", "gcc", &["--version"]),
    ("C++", "g++", &["--version"]),
    ("Go", "go", &["version"]),
    ("Rust", "rustc", &["--version"]),
    ("Java", "java", &["-version"]),
    ("Perl", "perl", &["--version"]),
    ("Ruby", "ruby", &["--version"]),
    ("PHP", "php", &["--version"]),
];

pub fn collect_software_info(platform: Platform) -> SoftwareInfo {
    let (packages, (languages, python)) = rayon::join(
        || packages::package_counts(platform),
        || rayon::join(installed_languages, python_version),
    );

    SoftwareInfo {
        packages,
        languages,
        python,
    }
}

/// Languages whose version command exits successfully
pub fn installed_languages() -> String {
    let found: Vec<&str> = LANGUAGE_PROBES
        .par_iter()
        .filter(|(_, program, args)| command_succeeds(program, args))
        .map(|(name, _, _)| *name)
        .collect();

    join_limited(&found, SHOWN_LANGUAGES, "None")
}

/// Version reported by `python3 --version`
pub fn python_version() -> String {
    run_command("python3", &["--version"])
        .ok()
        .and_then(|output| parse_python_version(&output))
        .unwrap_or_else(|| "Not Installed".to_string())
}

pub fn parse_python_version(output: &str) -> Option<String> {
    let version = output.trim();
    let version = version.strip_prefix("Python").unwrap_or(version).trim();
    (!version.is_empty()).then(|| version.to_string())
}
