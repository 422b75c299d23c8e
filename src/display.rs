//! Grouped, aligned and colored rendering of a [`SystemInfo`] snapshot

use crate::config::Config;
use crate::data::SystemInfo;
use crate::utils::parsing::visible_width;
use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Display groups: (group name, [(row label, field name)])
const GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "System",
        &[
            ("OS", "OS"),
            ("Kernel", "Kernel"),
            ("Uptime", "Uptime"),
            ("Shell", "Shell"),
            ("Terminal", "Terminal"),
        ],
    ),
    (
        "Hardware",
        &[("CPU", "CPU"), ("GPU", "GPU"), ("RAM", "RAM"), ("VRAM", "VRAM")],
    ),
    ("Network", &[("Hostname", "Hostname"), ("IP Address", "IP Address")]),
    ("Storage", &[("Disk", "Disk"), ("Swap", "Swap")]),
    (
        "Display",
        &[("Resolution", "Resolution"), ("DE", "DE"), ("WM", "Window Manager")],
    ),
    (
        "Software",
        &[("Packages", "Packages"), ("Languages", "Languages"), ("Python", "Python")],
    ),
    (
        "CPU Stats",
        &[
            ("Cores/Threads", "Cores/Threads"),
            ("Speed", "CPU Speed"),
            ("Usage", "CPU Usage"),
        ],
    ),
    ("Other", &[("Locale", "Locale"), ("Ports", "Open Ports")]),
];

/// One titled block of `label: value` rows
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: &'static str,
    pub rows: Vec<(String, String)>,
}

/// Turn a color setting into an ANSI escape.
/// Accepts color names, 256-palette indices and `#rrggbb`.
pub fn color_to_ansi(color: &str) -> String {
    let color = color.trim();
    if let Some(ansi_code) = get_ansi_color_code(color) {
        return ansi_code;
    }

    if let Ok(index) = color.parse::<u8>() {
        return format!("\x1b[38;5;{}m", index);
    }

    if let Some(hex) = color.strip_prefix('#').filter(|hex| hex.len() == 6) {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return format!("\x1b[38;2;{};{};{}m", r, g, b);
        }
    }

    log::warn!(
        "unknown color '{}'; use a name (red, bright_blue, gray, ...), 0-255 or #rrggbb",
        color
    );
    RESET.to_string()
}

fn get_ansi_color_code(color_name: &str) -> Option<String> {
    let code = match color_name.to_lowercase().as_str() {
        "black" => 30,
        "red" => 31,
        "green" => 32,
        "yellow" => 33,
        "blue" => 34,
        "magenta" | "purple" => 35,
        "cyan" => 36,
        "white" => 37,
        "bright_black" | "gray" | "grey" => 90,
        "bright_red" | "orange" => 91,
        "bright_green" => 92,
        "bright_yellow" => 93,
        "bright_blue" => 94,
        "bright_magenta" | "violet" => 95,
        "bright_cyan" => 96,
        "bright_white" => 97,
        "reset" | "default" => 0,
        _ => return None,
    };
    Some(format!("\x1b[{}m", code))
}

/// Visible groups and rows, in display order. Hidden rows are dropped and
/// groups left empty are skipped.
pub fn sections(info: &SystemInfo, config: &Config) -> Vec<Section> {
    let fields = info.fields();
    let lookup = |name: &str| {
        fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    };
    let hidden = |label: &str, field: &str| {
        config.display.is_hidden(label) || config.display.is_hidden(field)
    };

    GROUPS
        .iter()
        .filter_map(|&(name, items)| {
            let mut rows = Vec::new();
            for &(label, field) in items.iter() {
                if hidden(label, field) {
                    continue;
                }
                let gpus = &info.hardware.gpu.all_gpus;
                if field == "GPU" && config.display.show_all_gpus && !gpus.is_empty() {
                    rows.extend(
                        gpus.iter()
                            .enumerate()
                            .map(|(i, gpu)| (format!("GPU {}", i + 1), gpu.clone())),
                    );
                    continue;
                }
                if let Some(value) = lookup(field) {
                    rows.push((label.to_string(), value));
                }
            }
            (!rows.is_empty()).then_some(Section { name, rows })
        })
        .collect()
}

/// Full report text: centred title, a blank line, the groups, a trailing blank line
pub fn render(info: &SystemInfo, config: &Config) -> String {
    let colors = &config.colors;
    let title_color = color_to_ansi(&colors.title);
    let category_color = color_to_ansi(&colors.category);
    let key_color = color_to_ansi(&colors.key);
    let value_color = color_to_ansi(&colors.value);
    let separator = &config.display.separator;

    let sections = sections(info, config);
    let label_width = sections
        .iter()
        .flat_map(|section| section.rows.iter())
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for section in &sections {
        lines.push(format!("{}─── {} ───{}", category_color, section.name, RESET));
        for (label, value) in &section.rows {
            let padding = " ".repeat(label_width - visible_width(label));
            lines.push(format!(
                "{}{}{}{}{}{}{}",
                key_color, label, padding, separator, value_color, value, RESET
            ));
        }
    }

    let info_width = lines.iter().map(|line| visible_width(line)).max().unwrap_or(0);
    let title = &config.display.title;
    let title_indent = (info_width / 2).saturating_sub(visible_width(title) / 2);

    let mut out = String::new();
    out.push_str(&format!("{}{}{}{}\n\n", " ".repeat(title_indent), title_color, title, RESET));
    for line in &lines {
        out.push_str(line);
        out.push_str(&" ".repeat(info_width - visible_width(line)));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Write the report to stdout, clearing the terminal first when configured
pub fn print(info: &SystemInfo, config: &Config) -> io::Result<()> {
    let stdout = io::stdout();
    let clear = config.display.clear_screen && stdout.is_terminal();
    let mut out = stdout.lock();
    if clear {
        out.write_all(CLEAR_SCREEN.as_bytes())?;
    }
    out.write_all(render(info, config).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::*;
    use crate::utils::parsing::strip_ansi;

    fn sample() -> SystemInfo {
        SystemInfo {
            os: OsInfo {
                name: "Ubuntu 24.04 LTS".to_string(),
                kernel: "6.8.0-45-generic".to_string(),
                uptime: "1 day, 2:03:04".to_string(),
                shell: "Bash 5.2.21".to_string(),
                terminal: "Kitty".to_string(),
                locale: "en_US.UTF-8".to_string(),
            },
            hardware: HardwareInfo {
                cpu: CpuInfo {
                    brand: "AMD Ryzen 7 5800X 8-Core Processor".to_string(),
                    cores_threads: "8/16".to_string(),
                    speed: "3800.00 MHz".to_string(),
                    usage: "4.2%".to_string(),
                },
                gpu: GpuInfo::from_list(vec![
                    "NVIDIA GeForce RTX 3070 [Discrete]".to_string(),
                    "Intel UHD Graphics 750 [Integrated]".to_string(),
                ]),
                vram: VramInfo::from_total_used(8192, 1024),
                memory: MemoryUsage { used_gb: 9, total_gb: 32, percent: 28.1 },
                disk: MemoryUsage { used_gb: 210, total_gb: 467, percent: 47.3 },
                swap: SwapInfo::new(2, 0, 0.0),
            },
            network: NetworkInfo {
                hostname: "workstation".to_string(),
                ip_address: "192.168.1.20".to_string(),
                open_ports: "22, 631".to_string(),
            },
            desktop: DesktopInfo {
                resolution: "2560x1440".to_string(),
                window_manager: "Wayland".to_string(),
                desktop_environment: "GNOME".to_string(),
            },
            software: SoftwareInfo {
                packages: "APT (1834), Snap (12)".to_string(),
                languages: "Python, C, C++, Rust, Perl".to_string(),
                python: "3.12.3".to_string(),
            },
        }
    }

    #[test]
    fn colors() {
        assert_eq!(color_to_ansi("blue"), "\x1b[34m");
        assert_eq!(color_to_ansi("Bright_Cyan"), "\x1b[96m");
        assert_eq!(color_to_ansi("255"), "\x1b[38;5;255m");
        assert_eq!(color_to_ansi("#ff8000"), "\x1b[38;2;255;128;0m");
        assert_eq!(color_to_ansi("#ff80"), RESET);
        assert_eq!(color_to_ansi("chartreuse"), RESET);
    }

    #[test]
    fn groups_in_order() {
        let names: Vec<&str> = sections(&sample(), &Config::default())
            .iter()
            .map(|section| section.name)
            .collect();
        assert_eq!(
            names,
            ["System", "Hardware", "Network", "Storage", "Display", "Software", "CPU Stats", "Other"]
        );
    }

    #[test]
    fn display_labels_map_to_fields() {
        let sections = sections(&sample(), &Config::default());
        let display = sections.iter().find(|s| s.name == "Display").unwrap();
        assert_eq!(display.rows[2], ("WM".to_string(), "Wayland".to_string()));
        let other = sections.iter().find(|s| s.name == "Other").unwrap();
        assert_eq!(other.rows[1], ("Ports".to_string(), "22, 631".to_string()));
    }

    #[test]
    fn hidden_rows_and_empty_groups() {
        let mut config = Config::default();
        config.display.hidden = vec!["Hostname".to_string(), "IP Address".to_string(), "Ports".to_string()];
        let sections = sections(&sample(), &config);
        assert!(sections.iter().all(|s| s.name != "Network"));
        let other = sections.iter().find(|s| s.name == "Other").unwrap();
        assert_eq!(other.rows.len(), 1);
    }

    #[test]
    fn all_gpus_get_their_own_row() {
        let mut config = Config::default();
        config.display.show_all_gpus = true;
        let sections = sections(&sample(), &config);
        let hardware = sections.iter().find(|s| s.name == "Hardware").unwrap();
        let labels: Vec<&str> = hardware.rows.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, ["CPU", "GPU 1", "GPU 2", "RAM", "VRAM"]);
    }

    #[test]
    fn kind_tag_only_on_per_gpu_rows() {
        let single = sections(&sample(), &Config::default());
        let hardware = single.iter().find(|s| s.name == "Hardware").unwrap();
        assert_eq!(hardware.rows[1], ("GPU".to_string(), "NVIDIA GeForce RTX 3070".to_string()));

        let mut config = Config::default();
        config.display.show_all_gpus = true;
        let all = sections(&sample(), &config);
        let hardware = all.iter().find(|s| s.name == "Hardware").unwrap();
        assert_eq!(hardware.rows[1].1, "NVIDIA GeForce RTX 3070 [Discrete]");
        assert_eq!(hardware.rows[2].1, "Intel UHD Graphics 750 [Integrated]");
    }

    #[test]
    fn rows_are_aligned() {
        let output = strip_ansi(&render(&sample(), &Config::default()));
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].trim_start().starts_with("KernelView"));
        assert_eq!(lines[1], "");
        assert_eq!(lines.last(), Some(&""));

        let body = &lines[2..lines.len() - 1];
        let width = visible_width(body[0]);
        assert!(body.iter().all(|line| visible_width(line) == width));

        // "Cores/Threads" is the longest label; every separator lines up after it
        for row in body.iter().filter(|line| !line.starts_with('─')) {
            assert_eq!(&row[13..15], ": ", "misaligned row: {:?}", row);
        }
        assert!(output.contains("─── CPU Stats ───"));
        assert!(output.contains("VRAM         : 1024/8192MB (12.5%)"));
    }

    #[test]
    fn title_is_centred() {
        let output = strip_ansi(&render(&sample(), &Config::default()));
        let mut lines = output.lines();
        let title = lines.next().unwrap();
        let width = visible_width(lines.nth(1).unwrap());
        let indent = title.len() - title.trim_start().len();
        assert_eq!(indent, width / 2 - "KernelView".len() / 2);
    }
}
