//! System-wide information structures

use super::hardware::HardwareInfo;

/// Complete snapshot gathered by kernelview
#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfo {
    pub os: OsInfo,
    pub hardware: HardwareInfo,
    pub network: NetworkInfo,
    pub desktop: DesktopInfo,
    pub software: SoftwareInfo,
}

/// Operating system and session information
#[derive(Debug, Clone, PartialEq)]
pub struct OsInfo {
    pub name: String,
    pub kernel: String,
    pub uptime: String,
    pub shell: String,
    pub terminal: String,
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInfo {
    pub hostname: String,
    pub ip_address: String,
    pub open_ports: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopInfo {
    pub resolution: String,
    pub window_manager: String,
    pub desktop_environment: String,
}

/// Installed software inventory
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareInfo {
    pub packages: String,
    pub languages: String,
    pub python: String,
}

impl SystemInfo {
    /// Flatten into `(field name, display value)` pairs in collection order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let hw = &self.hardware;
        vec![
            ("OS", self.os.name.clone()),
            ("Kernel", self.os.kernel.clone()),
            ("Uptime", self.os.uptime.clone()),
            ("Shell", self.os.shell.clone()),
            ("Python", self.software.python.clone()),
            ("CPU", hw.cpu.brand.clone()),
            ("Cores/Threads", hw.cpu.cores_threads.clone()),
            ("CPU Speed", hw.cpu.speed.clone()),
            ("CPU Usage", hw.cpu.usage.clone()),
            ("GPU", hw.gpu.primary.clone()),
            ("VRAM", hw.vram.to_string()),
            ("RAM", hw.memory.to_string()),
            ("Disk", hw.disk.to_string()),
            ("Swap", hw.swap.to_string()),
            ("Hostname", self.network.hostname.clone()),
            ("IP Address", self.network.ip_address.clone()),
            ("Open Ports", self.network.open_ports.clone()),
            ("Locale", self.os.locale.clone()),
            ("Resolution", self.desktop.resolution.clone()),
            ("Window Manager", self.desktop.window_manager.clone()),
            ("DE", self.desktop.desktop_environment.clone()),
            ("Terminal", self.os.terminal.clone()),
            ("Packages", self.software.packages.clone()),
            ("Languages", self.software.languages.clone()),
        ]
    }

    /// Display value of one field by name
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}
