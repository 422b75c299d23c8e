//! Desktop environment, window manager and screen resolution detection

use crate::collectors::{env_var, process, EnvLookup};
use crate::data::DesktopInfo;
use crate::platform::Platform;
use crate::utils::{command::*, parsing::*};
use sysinfo::System;

/// Window manager process names and how they are shown, in priority order
const WM_PROCESSES: &[(&str, &str)] = &[
    ("sway", "Sway"),
    ("hyprland", "Hyprland"),
    ("kwin_wayland", "KWin"),
    ("kwin_x11", "KWin"),
    ("niri", "niri"),
    ("mutter", "Mutter"),
    ("xfwm4", "Xfwm4"),
    ("openbox", "Openbox"),
    ("i3", "i3"),
    ("bspwm", "bspwm"),
    ("awesome", "awesome"),
    ("weston", "Weston"),
    ("gnome-session", "GNOME"),
    ("gnome-session-binary", "GNOME"),
];

const DE_PROCESSES: &[(&str, &str)] = &[
    ("gnome-shell", "GNOME"),
    ("plasmashell", "KDE Plasma"),
    ("xfce4-session", "XFCE"),
    ("cinnamon-session", "Cinnamon"),
];

pub fn collect_desktop_info(platform: Platform) -> DesktopInfo {
    let (resolution, (window_manager, desktop_environment)) = rayon::join(
        || resolution(platform),
        || rayon::join(|| window_manager(platform), || desktop_environment(platform)),
    );

    DesktopInfo {
        resolution,
        window_manager,
        desktop_environment,
    }
}

/// Current screen resolution, e.g. `1920x1080`
pub fn resolution(platform: Platform) -> String {
    resolution_with(platform, &env_var)
}

pub fn resolution_with(platform: Platform, env: EnvLookup<'_>) -> String {
    match platform {
        Platform::Linux => {
            if env("DISPLAY").is_none() {
                return "Headless".to_string();
            }
            parse_xrandr_resolution(&run_command_or_empty("xrandr", &[]))
                .unwrap_or_else(|| "Unknown (Xorg/Wayland)".to_string())
        }
        Platform::Windows => {
            let output = run_command_or_empty(
                "wmic",
                &["desktopmonitor", "get", "screenheight,screenwidth", "/value"],
            );
            parse_wmic_resolution(&output).unwrap_or_else(|| "Unknown".to_string())
        }
        Platform::MacOs => {
            let output = run_command_or_empty("system_profiler", &["SPDisplaysDataType"]);
            parse_profiler_resolution(&output).unwrap_or_else(|| "Unknown".to_string())
        }
        Platform::Other => "Unknown".to_string(),
    }
}

/// First mode marked current (`*`) in `xrandr` output
pub fn parse_xrandr_resolution(output: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.contains('*'))
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string)
}

/// `ScreenWidth=`/`ScreenHeight=` pairs from `wmic desktopmonitor ... /value`.
/// Monitors without a reported size leave the value empty and are ignored.
pub fn parse_wmic_resolution(output: &str) -> Option<String> {
    let mut width = None;
    let mut height = None;
    for line in output.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key {
            "ScreenWidth" => width = Some(value.to_string()),
            "ScreenHeight" => height = Some(value.to_string()),
            _ => {}
        }
    }
    Some(format!("{}x{}", width?, height?))
}

pub fn parse_profiler_resolution(output: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.contains("Resolution"))
        .and_then(|line| line.split_once(": "))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Window manager or display server
pub fn window_manager(platform: Platform) -> String {
    window_manager_with(
        platform,
        &env_var,
        || run_command_or_empty("wmctrl", &["-m"]),
        process::running_process_names,
    )
}

pub fn window_manager_with(
    platform: Platform,
    env: EnvLookup<'_>,
    wmctrl: impl FnOnce() -> String,
    processes: impl FnOnce() -> Vec<String>,
) -> String {
    match platform {
        Platform::Linux => {
            if env("WAYLAND_DISPLAY").is_some() {
                return "Wayland".to_string();
            }
            if let Some(name) = parse_wmctrl_name(&wmctrl()) {
                return name;
            }
            if let Some(name) = wm_from_processes(&processes()) {
                return name;
            }
            env("XDG_CURRENT_DESKTOP").unwrap_or_else(|| "Unknown (X11)".to_string())
        }
        Platform::Windows => "Windows Manager".to_string(),
        Platform::MacOs => "Aqua".to_string(),
        Platform::Other => "Unknown".to_string(),
    }
}

/// `Name:` line of `wmctrl -m`
pub fn parse_wmctrl_name(output: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.contains("Name:"))
        .and_then(|line| line.rsplit(':').next())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// First known window manager running, matched on the exact process name
pub fn wm_from_processes(names: &[String]) -> Option<String> {
    WM_PROCESSES
        .iter()
        .find(|(process, _)| names.iter().any(|name| name.eq_ignore_ascii_case(process)))
        .map(|(_, display)| display.to_string())
}

/// Desktop environment name
pub fn desktop_environment(platform: Platform) -> String {
    desktop_environment_with(platform, &env_var, process::running_process_names)
}

pub fn desktop_environment_with(
    platform: Platform,
    env: EnvLookup<'_>,
    processes: impl FnOnce() -> Vec<String>,
) -> String {
    match platform {
        Platform::Linux => {
            // XDG_CURRENT_DESKTOP may be a list such as `ubuntu:GNOME`
            if let Some(desktop) = env("XDG_CURRENT_DESKTOP") {
                return desktop.rsplit(':').next().unwrap_or(&desktop).to_string();
            }
            if let Some(session) = env("DESKTOP_SESSION").or_else(|| env("GDMSESSION")) {
                return dashes_to_title(&session);
            }
            de_from_processes(&processes())
                .unwrap_or_else(|| "Unknown (possibly headless)".to_string())
        }
        Platform::Windows => format!("Windows {}", windows_release()),
        Platform::MacOs => "macOS Aqua".to_string(),
        Platform::Other => "Unknown".to_string(),
    }
}

pub fn de_from_processes(names: &[String]) -> Option<String> {
    DE_PROCESSES
        .iter()
        .find(|(process, _)| names.iter().any(|name| name.contains(process)))
        .map(|(_, desktop)| desktop.to_string())
}

/// Release number only, e.g. `11` out of `11 (22631)`
fn windows_release() -> String {
    System::os_version()
        .and_then(|version| version.split_whitespace().next().map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string())
}
