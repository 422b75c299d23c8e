//! Probes, one function per fact. Every public probe returns a display
//! string and falls back to a fixed placeholder instead of failing.

pub mod desktop;
pub mod gpu;
pub mod hardware;
pub mod languages;
pub mod network;
pub mod packages;
pub mod process;
pub mod system;

use std::env;

/// Environment lookup, injectable so probes can be exercised without touching
/// the real process environment
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read an environment variable, treating an empty value as unset
pub fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
