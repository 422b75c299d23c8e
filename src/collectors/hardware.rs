//! Hardware information collection (CPU, memory, disk, swap)

use crate::collectors::gpu;
use crate::data::{CpuInfo, HardwareInfo, MemoryUsage, SwapInfo};
use crate::error::{KernelviewError, Result};
use crate::platform::Platform;
use crate::utils::{command::*, file::*, parsing::*};
use once_cell::sync::Lazy;
use regex::Regex;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

static CPU_MODEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"model name\s*:\s*(.*)").unwrap());
static CPU_IMPLEMENTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CPU implementer\s*:\s*(.*)").unwrap());
static CPU_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"CPU part\s*:\s*(.*)").unwrap());

/// Collect all hardware information (parallelized for speed)
pub fn collect_hardware_info(platform: Platform) -> HardwareInfo {
    let ((cpu, gpu), (vram, (memory, (disk, swap)))) = rayon::join(
        || rayon::join(|| collect_cpu_info(platform), || gpu::collect_gpu_info(platform)),
        || {
            rayon::join(
                || gpu::vram(platform),
                || rayon::join(memory, || rayon::join(disk, swap)),
            )
        },
    );

    HardwareInfo {
        cpu,
        gpu,
        vram,
        memory,
        disk,
        swap,
    }
}

/// CPU model plus the live stats (cores, clock, load)
pub fn collect_cpu_info(platform: Platform) -> CpuInfo {
    let refresh = RefreshKind::nothing().with_cpu(CpuRefreshKind::everything());
    let mut sys = System::new_with_specifics(refresh);

    // Usage is a delta between two refreshes
    sys.refresh_cpu_all();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_all();

    let cpus = sys.cpus();
    let logical = (!cpus.is_empty()).then_some(cpus.len());
    let frequency = cpus.first().map(|cpu| cpu.frequency()).unwrap_or(0);
    let usage = (!cpus.is_empty()).then(|| sys.global_cpu_usage());

    CpuInfo {
        brand: cpu_brand(platform),
        cores_threads: format_cores_threads(System::physical_core_count(), logical),
        speed: format_cpu_speed(frequency),
        usage: usage
            .map(format_cpu_usage)
            .unwrap_or_else(|| "Unknown".to_string()),
    }
}

/// CPU model string
pub fn cpu_brand(platform: Platform) -> String {
    let arch = std::env::consts::ARCH;
    match platform {
        Platform::Windows => sysinfo_cpu_brand().unwrap_or_else(|| format!("Unknown ({})", arch)),
        Platform::Linux => match read_file_safe("/proc/cpuinfo") {
            Ok(cpuinfo) => parse_cpuinfo_model(&cpuinfo, arch),
            Err(e) => {
                log::debug!("cpuinfo unreadable: {}", e);
                format!("Unknown ({})", arch)
            }
        },
        Platform::MacOs => {
            let brand = run_command_or_empty("sysctl", &["-n", "machdep.cpu.brand_string"]);
            if !brand.is_empty() || arch != "aarch64" {
                brand
            } else {
                format!(
                    "Apple Silicon ({})",
                    run_command_or_empty("sysctl", &["-n", "hw.model"])
                )
            }
        }
        Platform::Other => format!("Unknown ({})", arch),
    }
}

fn sysinfo_cpu_brand() -> Option<String> {
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()),
    );
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
}

/// Model name from /proc/cpuinfo. ARM kernels often omit it, in which case
/// the implementer/part codes are used instead.
pub fn parse_cpuinfo_model(cpuinfo: &str, arch: &str) -> String {
    if let Some(caps) = CPU_MODEL.captures(cpuinfo) {
        return caps[1].trim().to_string();
    }

    if arch.contains("arm") || arch.contains("ARM") || arch == "aarch64" {
        let capture = |re: &Regex| {
            re.captures(cpuinfo)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_else(|| "Unknown".to_string())
        };
        let implementer = capture(&CPU_IMPLEMENTER);
        let part = capture(&CPU_PART);
        let vendor = arm_vendor(&implementer).unwrap_or(&implementer).to_string();

        if vendor != "Unknown" || part != "Unknown" {
            return format!("{} ARM Processor (Part: {})", vendor, part);
        }
        return "ARM Processor".to_string();
    }

    arch.to_string()
}

fn arm_vendor(implementer: &str) -> Option<&'static str> {
    match implementer {
        "0x41" => Some("ARM Ltd."),
        "0x61" => Some("Apple"),
        "0x51" => Some("Qualcomm"),
        "0x48" => Some("HiSilicon"),
        "0x58" => Some("MediaTek"),
        "0xc0" => Some("Google"),
        _ => None,
    }
}

pub fn format_cores_threads(physical: Option<usize>, logical: Option<usize>) -> String {
    let show = |count: Option<usize>| {
        count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    };
    format!("{}/{}", show(physical), show(logical))
}

pub fn format_cpu_speed(mhz: u64) -> String {
    if mhz == 0 {
        "Unknown".to_string()
    } else {
        format!("{:.2} MHz", mhz as f64)
    }
}

pub fn format_cpu_usage(percent: f32) -> String {
    format!("{:.1}%", percent)
}

/// RAM usage
pub fn memory() -> MemoryUsage {
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    );
    let total = sys.total_memory();
    let used = sys.used_memory();
    MemoryUsage {
        used_gb: bytes_to_gb(used),
        total_gb: bytes_to_gb(total),
        percent: percent(used, total),
    }
}

/// Swap usage
pub fn swap() -> SwapInfo {
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_swap()),
    );
    let total = sys.total_swap();
    let used = sys.used_swap();
    SwapInfo::new(bytes_to_gb(total), bytes_to_gb(used), percent(used, total))
}

/// Usage of the root filesystem (system drive on Windows)
pub fn disk() -> MemoryUsage {
    root_disk_usage().unwrap_or_else(|e| {
        log::debug!("disk probe failed: {}", e);
        MemoryUsage::default()
    })
}

/// Turn statvfs block counts into a usage summary.
/// Used space excludes blocks reserved for root; the percentage is
/// relative to what an unprivileged user can reach.
pub fn usage_from_blocks(blocks: u64, blocks_free: u64, blocks_avail: u64, block_size: u64) -> MemoryUsage {
    let total = blocks.saturating_mul(block_size);
    let used = blocks.saturating_sub(blocks_free).saturating_mul(block_size);
    let avail = blocks_avail.saturating_mul(block_size);
    MemoryUsage {
        used_gb: bytes_to_gb(used),
        total_gb: bytes_to_gb(total),
        percent: percent(used, used.saturating_add(avail)),
    }
}

#[cfg(unix)]
fn root_disk_usage() -> Result<MemoryUsage> {
    use std::ffi::CString;

    let path = CString::new("/").map_err(|_| KernelviewError::parse("Invalid path"))?;
    // statvfs straight from libc, no df subprocess
    unsafe {
        let mut stat: libc::statvfs = std::mem::zeroed();
        if libc::statvfs(path.as_ptr(), &mut stat) != 0 {
            return Err(KernelviewError::from(std::io::Error::last_os_error()));
        }
        Ok(usage_from_blocks(
            stat.f_blocks as u64,
            stat.f_bfree as u64,
            stat.f_bavail as u64,
            stat.f_frsize as u64,
        ))
    }
}

#[cfg(not(unix))]
fn root_disk_usage() -> Result<MemoryUsage> {
    use std::path::PathBuf;
    use sysinfo::Disks;

    let system_drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
    let root = PathBuf::from(format!("{}\\", system_drive));
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == root.as_path())
        .or_else(|| disks.list().first())
        .ok_or_else(|| KernelviewError::detection("No disks found"))?;

    let total = disk.total_space();
    let used = total.saturating_sub(disk.available_space());
    Ok(MemoryUsage {
        used_gb: bytes_to_gb(used),
        total_gb: bytes_to_gb(total),
        percent: percent(used, total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x86_model_name() {
        let cpuinfo = "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Intel(R) Core(TM) i7-8750H CPU @ 2.20GHz\n";
        assert_eq!(
            parse_cpuinfo_model(cpuinfo, "x86_64"),
            "Intel(R) Core(TM) i7-8750H CPU @ 2.20GHz"
        );
    }

    #[test]
    fn arm_without_model_name() {
        let cpuinfo = "processor\t: 0\nBogoMIPS\t: 108.00\nCPU implementer\t: 0x41\nCPU part\t: 0xd08\n";
        assert_eq!(
            parse_cpuinfo_model(cpuinfo, "aarch64"),
            "ARM Ltd. ARM Processor (Part: 0xd08)"
        );

        let unknown_vendor = "CPU implementer\t: 0x99\n";
        assert_eq!(
            parse_cpuinfo_model(unknown_vendor, "aarch64"),
            "0x99 ARM Processor (Part: Unknown)"
        );

        assert_eq!(parse_cpuinfo_model("processor : 0\n", "aarch64"), "ARM Processor");
    }

    #[test]
    fn other_arch_without_model_name() {
        assert_eq!(parse_cpuinfo_model("processor : 0\n", "riscv64"), "riscv64");
    }

    #[test]
    fn cpu_formatting() {
        assert_eq!(format_cores_threads(Some(6), Some(12)), "6/12");
        assert_eq!(format_cores_threads(None, Some(4)), "Unknown/4");
        assert_eq!(format_cpu_speed(0), "Unknown");
        assert_eq!(format_cpu_speed(2600), "2600.00 MHz");
        assert_eq!(format_cpu_usage(3.24), "3.2%");
    }

    #[test]
    fn blocks_to_usage() {
        // 100 GiB filesystem in 4 KiB blocks, 40 GiB free of which 35 GiB usable
        let gib = 1024 * 1024 * 1024 / 4096;
        let usage = usage_from_blocks(100 * gib, 40 * gib, 35 * gib, 4096);
        assert_eq!(usage.total_gb, 100);
        assert_eq!(usage.used_gb, 60);
        assert_eq!(usage.percent, 63.2);
        assert_eq!(usage_from_blocks(0, 0, 0, 4096), MemoryUsage::default());
    }

    #[test]
    fn unsupported_platform_brand() {
        assert!(cpu_brand(Platform::Other).starts_with("Unknown ("));
    }

    #[test]
    fn live_probes_do_not_panic() {
        let memory = memory();
        assert!((0.0..=100.0).contains(&memory.percent));
        let swap = swap();
        assert_eq!(swap.free_gb, swap.total_gb.saturating_sub(swap.used_gb));
        let _ = disk().to_string();
    }
}
