use kernelview::config::Config;
use kernelview::data::*;
use kernelview::display::{render, sections};
use kernelview::utils::parsing::{strip_ansi, visible_width};

fn snapshot() -> SystemInfo {
    SystemInfo {
        os: OsInfo {
            name: "Arch Linux".to_string(),
            kernel: "Linux 6.10.10-arch1-1".to_string(),
            uptime: "3:14:15".to_string(),
            shell: "Zsh 5.9".to_string(),
            terminal: "Alacritty".to_string(),
            locale: "de_DE.UTF-8".to_string(),
        },
        hardware: HardwareInfo {
            cpu: CpuInfo {
                brand: "Intel(R) Core(TM) i5-1135G7 @ 2.40GHz".to_string(),
                cores_threads: "4/8".to_string(),
                speed: "2400.00 MHz".to_string(),
                usage: "11.0%".to_string(),
            },
            gpu: GpuInfo::from_list(vec!["Intel Iris Xe Graphics [Integrated]".to_string()]),
            vram: VramInfo::shared(),
            memory: MemoryUsage { used_gb: 6, total_gb: 16, percent: 37.5 },
            disk: MemoryUsage { used_gb: 120, total_gb: 476, percent: 26.6 },
            swap: SwapInfo::new(0, 0, 0.0),
        },
        network: NetworkInfo {
            hostname: "thinkpad".to_string(),
            ip_address: "10.0.0.7".to_string(),
            open_ports: "None".to_string(),
        },
        desktop: DesktopInfo {
            resolution: "1920x1200".to_string(),
            window_manager: "Sway".to_string(),
            desktop_environment: "sway".to_string(),
        },
        software: SoftwareInfo {
            packages: "Pacman (1021), Flatpak (8)".to_string(),
            languages: "Python, C, C++, Go, Rust...".to_string(),
            python: "3.12.5".to_string(),
        },
    }
}

/// Visible body lines of a rendered report (title, blank lines and headers excluded)
fn rows(output: &str) -> Vec<String> {
    strip_ansi(output)
        .lines()
        .skip(2)
        .filter(|line| !line.trim().is_empty() && !line.starts_with('─'))
        .map(str::to_string)
        .collect()
}

fn assert_aligned(output: &str, label_width: usize, separator: &str) {
    let plain = strip_ansi(output);
    let body: Vec<&str> = plain.lines().skip(2).filter(|l| !l.is_empty()).collect();
    let width = visible_width(body[0]);
    assert!(body.iter().all(|line| visible_width(line) == width));

    for row in rows(output) {
        assert_eq!(
            &row[label_width..label_width + separator.len()],
            separator,
            "misaligned row: {:?}",
            row
        );
    }
}

#[test]
fn test_render_aligns_default_labels() {
    let output = render(&snapshot(), &Config::default());
    assert_aligned(&output, "Cores/Threads".len(), ": ");
    assert!(strip_ansi(&output).contains("VRAM         : Shared"));
}

#[test]
fn test_render_aligns_when_longest_label_hidden() {
    let mut config = Config::default();
    config.display.hidden = vec!["Cores/Threads".to_string()];
    config.display.separator = " | ".to_string();

    let output = render(&snapshot(), &config);
    assert_aligned(&output, "IP Address".len(), " | ");
    assert!(!strip_ansi(&output).contains("Cores/Threads"));
}

#[test]
fn test_render_aligns_short_labels_only() {
    let mut config = Config::default();
    config.display.hidden = ["Hostname", "IP Address", "Resolution", "Languages", "Packages",
        "Terminal", "Uptime", "Kernel", "Cores/Threads", "Locale", "Python", "Usage", "Speed"]
        .iter()
        .map(|label| label.to_string())
        .collect();

    let output = render(&snapshot(), &config);
    assert_aligned(&output, "Shell".len(), ": ");
    let names: Vec<&str> = sections(&snapshot(), &config).iter().map(|s| s.name).collect();
    assert_eq!(names, ["System", "Hardware", "Storage", "Display", "Other"]);
}

#[test]
fn test_render_custom_title() {
    let mut config = Config::default();
    config.display.title = "thinkpad".to_string();
    let plain = strip_ansi(&render(&snapshot(), &config));
    assert_eq!(plain.lines().next().map(str::trim), Some("thinkpad"));
    assert!(plain.ends_with("\n\n"));
}
