//! kernelview library
//!
//! Best-effort probes that gather a snapshot of the host (OS, hardware,
//! network, desktop, installed software) and a renderer for the terminal.

pub mod collectors;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod platform;
pub mod utils;

pub use config::Config;
pub use data::{
    CpuInfo, DesktopInfo, GpuInfo, HardwareInfo, MemoryUsage, NetworkInfo, OsInfo, SoftwareInfo,
    SwapInfo, SystemInfo, VramInfo, VramUsage,
};
pub use error::{KernelviewError, Result};
pub use platform::Platform;

/// Collect all system information for the running platform
pub fn collect_system_info() -> SystemInfo {
    collect_for(Platform::current())
}

/// Collect using the probes of `platform`. Probe groups run in parallel.
pub fn collect_for(platform: Platform) -> SystemInfo {
    log::debug!("collecting with {} probes", platform);
    let ((os, hardware), (network, (desktop, software))) = rayon::join(
        || {
            rayon::join(
                || collectors::system::collect_os_info(platform),
                || collectors::hardware::collect_hardware_info(platform),
            )
        },
        || {
            rayon::join(
                || collectors::network::collect_network_info(platform),
                || {
                    rayon::join(
                        || collectors::desktop::collect_desktop_info(platform),
                        || collectors::languages::collect_software_info(platform),
                    )
                },
            )
        },
    );

    SystemInfo {
        os,
        hardware,
        network,
        desktop,
        software,
    }
}
