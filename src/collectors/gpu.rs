//! GPU model and video memory detection

use crate::data::{GpuInfo, VramInfo, VramUsage};
use crate::platform::Platform;
use crate::utils::command::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static ROCM_VRAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*MB").unwrap());
static MAC_VRAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*(GB|MB)?").unwrap());
static ADAPTER_RAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"AdapterRAM=(\d+)").unwrap());

const DISPLAY_CLASSES: &[&str] = &["VGA compatible controller", "3D controller", "Display controller"];

/// Collect GPU information
pub fn collect_gpu_info(platform: Platform) -> GpuInfo {
    let gpus = match platform {
        Platform::Windows => {
            parse_wmic_captions(&run_command_or_empty("wmic", &["path", "Win32_VideoController", "get", "Caption"]))
        }
        Platform::Linux => linux_gpus(),
        Platform::MacOs => parse_chipset_models(&run_command_or_empty(
            "system_profiler",
            &["SPDisplaysDataType"],
        )),
        Platform::Other => Vec::new(),
    };
    GpuInfo::from_list(gpus)
}

fn linux_gpus() -> Vec<String> {
    if let Ok(output) = run_command("lspci", &[]) {
        let gpus = parse_lspci_gpus(&output);
        if !gpus.is_empty() {
            return gpus;
        }
    }
    // No pciutils installed: fall back to PCI ids exposed by the DRM driver
    sysfs_gpus(Path::new("/sys/class/drm"))
}

/// `wmic ... get Caption` prints a header followed by one adapter per line
pub fn parse_wmic_captions(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every `Chipset Model:` entry of `system_profiler SPDisplaysDataType`
pub fn parse_chipset_models(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains("Chipset Model"))
        .filter_map(|line| line.rsplit_once(": ").map(|(_, model)| model.trim().to_string()))
        .filter(|model| !model.is_empty())
        .collect()
}

/// GPU names from plain `lspci` output, discrete cards first
pub fn parse_lspci_gpus(output: &str) -> Vec<String> {
    let mut gpus: Vec<String> = output
        .lines()
        .filter(|line| DISPLAY_CLASSES.iter().any(|class| line.contains(class)))
        .filter_map(gpu_from_lspci_line)
        .collect();
    gpus.sort_by_key(|gpu| gpu.ends_with("[Integrated]"));
    gpus
}

fn gpu_from_lspci_line(line: &str) -> Option<String> {
    // "01:00.0 VGA compatible controller: NVIDIA Corporation GA104 [GeForce RTX 3070] (rev a1)"
    let (_, description) = line.split_once(": ")?;
    let description = description.split(" (rev ").next().unwrap_or(description).trim();
    if description.is_empty() {
        return None;
    }
    let name = gpu_model_name(description);
    let kind = if is_integrated(line, &name) { "Integrated" } else { "Discrete" };
    Some(format!("{} [{}]", name, kind))
}

fn last_bracket(description: &str) -> Option<&str> {
    let start = description.rfind('[')?;
    let end = description[start..].find(']')?;
    Some(&description[start + 1..start + end])
}

/// Shorten an lspci device description to a marketing name where possible
pub fn gpu_model_name(description: &str) -> String {
    if description.contains("NVIDIA") || description.contains("GeForce") {
        return nvidia_model(description);
    }
    if description.contains("AMD") || description.contains("Advanced Micro Devices") {
        return amd_model(description);
    }
    if description.contains("Intel") {
        let cleaned = description.replace("Intel Corporation ", "");
        let model = cleaned.split(" [").next().unwrap_or(&cleaned).trim().to_string();
        return format!("Intel {}", model);
    }
    match last_bracket(description) {
        // vendor-only brackets like [AMD/ATI] say nothing about the model
        Some(bracket) if !bracket.contains('/') && bracket.len() > 3 => bracket.to_string(),
        _ => description.to_string(),
    }
}

fn nvidia_model(description: &str) -> String {
    if let Some(bracket) = last_bracket(description) {
        if ["GeForce", "RTX", "GTX", "Quadro", "Tesla"]
            .iter()
            .any(|marker| bracket.contains(marker))
        {
            return bracket.to_string();
        }
    }
    if let Some(pos) = description.find("GeForce") {
        let tail = &description[pos..];
        return tail.split(" [").next().unwrap_or(tail).trim().to_string();
    }
    "NVIDIA GPU".to_string()
}

fn amd_model(description: &str) -> String {
    if let Some(bracket) = last_bracket(description) {
        if bracket.contains("Radeon") {
            // "Radeon RX 7700 XT / 7800 XT" shares one PCI id; the last entry is often a bare suffix
            let model = bracket.rsplit(" / ").next().unwrap_or(bracket).trim();
            if model.starts_with("Radeon") {
                return format!("AMD {}", model);
            }
            return format!("AMD {}", bracket.split(" / ").next().unwrap_or(bracket).trim());
        }
        if !bracket.contains('/') && bracket.len() > 2 {
            return format!("AMD {}", bracket);
        }
    }
    if let Some(pos) = description.find("Radeon") {
        let tail = &description[pos..];
        return format!("AMD {}", tail.split(" [").next().unwrap_or(tail).trim());
    }
    "AMD GPU".to_string()
}

fn is_integrated(lspci_line: &str, name: &str) -> bool {
    let line = lspci_line.to_lowercase();
    let name = name.to_lowercase();
    ["integrated", "raphael", "renoir", "cezanne", "barcelo", "iris", "uhd", "hd graphics"]
        .iter()
        .any(|marker| line.contains(marker) || name.contains(marker))
        // Intel iGPUs sit at 00:02.0
        || (lspci_line.starts_with("00:02.0") && line.contains("intel"))
}

/// GPUs named from the vendor/device ids of each `cardN` under `drm_root`
pub fn sysfs_gpus(drm_root: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(drm_root) else {
        return Vec::new();
    };
    let mut cards: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with("card") && !name.contains('-'))
        })
        .collect();
    cards.sort();

    cards
        .iter()
        .filter_map(|card| {
            let vendor = fs::read_to_string(card.join("device/vendor")).ok()?;
            let device = fs::read_to_string(card.join("device/device")).ok()?;
            Some(gpu_from_pci_ids(vendor.trim(), device.trim()))
        })
        .collect()
}

pub fn gpu_from_pci_ids(vendor_id: &str, device_id: &str) -> String {
    match vendor_id {
        "0x10de" => format!("NVIDIA GPU ({})", device_id),
        "0x1002" => match amd_device_name(device_id) {
            Some(model) => format!("AMD {}", model),
            None => format!("AMD GPU ({})", device_id),
        },
        "0x8086" => format!("Intel GPU ({})", device_id),
        _ => format!("GPU ({}/{})", vendor_id, device_id),
    }
}

fn amd_device_name(device_id: &str) -> Option<&'static str> {
    match device_id {
        "0x7480" => Some("Radeon RX 7800 XT"),
        "0x7479" => Some("Radeon RX 7700 XT"),
        "0x73bf" => Some("Radeon RX 6800 XT"),
        "0x73df" => Some("Radeon RX 6700 XT"),
        _ => None,
    }
}

/// Video memory from whichever vendor tool is available
pub fn vram(platform: Platform) -> VramInfo {
    if platform == Platform::Other {
        return VramInfo::default();
    }

    let smi = run_command_or_empty(
        "nvidia-smi",
        &["--query-gpu=memory.total,memory.used", "--format=csv,noheader,nounits"],
    );
    if let Some(vram) = parse_nvidia_smi(&smi) {
        return vram;
    }

    match platform {
        Platform::Linux => linux_vram(),
        Platform::MacOs => {
            let profile = run_command_or_empty("system_profiler", &["SPDisplaysDataType"]);
            parse_macos_vram(&profile)
                .map(VramInfo::total_only)
                .unwrap_or_default()
        }
        Platform::Windows => {
            let output = run_command_or_empty(
                "wmic",
                &["path", "Win32_VideoController", "get", "AdapterRAM", "/value"],
            );
            parse_adapter_ram_mb(&output)
                .map(VramInfo::total_only)
                .unwrap_or_default()
        }
        Platform::Other => VramInfo::default(),
    }
}

fn linux_vram() -> VramInfo {
    let rocminfo = run_command_or_empty("rocminfo", &[]);
    let busy = drm_busy_percent(Path::new("/sys/class/drm"));
    let lspci = if busy.is_none() {
        run_command_or_empty("lspci", &[])
    } else {
        String::new()
    };
    linux_vram_from(&rocminfo, busy, &lspci)
}

/// Linux VRAM from rocminfo output, the DRM busy percentage and lspci output.
/// A busy reading wins; an Intel VGA controller means shared memory; a bare
/// rocminfo total comes last.
pub fn linux_vram_from(rocminfo: &str, busy: Option<f64>, lspci: &str) -> VramInfo {
    let total_mb = parse_rocminfo_total(rocminfo);

    if let Some(busy) = busy {
        return VramInfo {
            total_mb,
            usage: total_mb.map(|_| VramUsage::Percent(busy)),
            ..Default::default()
        };
    }

    if lspci
        .lines()
        .any(|line| line.contains("Intel Corporation") && line.contains("VGA"))
    {
        return VramInfo::shared();
    }

    total_mb.map(VramInfo::total_only).unwrap_or_default()
}

/// First GPU's `total, used` line from nvidia-smi csv output
pub fn parse_nvidia_smi(output: &str) -> Option<VramInfo> {
    let line = output.lines().next()?;
    let (total, used) = line.split_once(',')?;
    let total = total.trim().parse::<u64>().ok()?;
    let used = used.trim().parse::<u64>().ok()?;
    Some(VramInfo::from_total_used(total, used))
}

pub fn parse_rocminfo_total(output: &str) -> Option<u64> {
    let line = output.lines().find(|line| line.contains("VRAM Total Memory:"))?;
    ROCM_VRAM.captures(line)?[1].parse().ok()
}

/// `VRAM (Total): 4 GB` / `VRAM (Total): 1536 MB`, in MB
pub fn parse_macos_vram(output: &str) -> Option<u64> {
    let line = output
        .lines()
        .find(|line| line.contains("VRAM (Total):") || line.contains("VRAM (Dynamic, Max):"))?;
    let (_, value) = line.split_once(':')?;
    let caps = MAC_VRAM.captures(value)?;
    let amount: u64 = caps[1].parse().ok()?;
    match caps.get(2).map(|unit| unit.as_str()) {
        Some("GB") => amount.checked_mul(1024),
        _ => Some(amount),
    }
}

/// `AdapterRAM=<bytes>` converted to MB
pub fn parse_adapter_ram_mb(output: &str) -> Option<u64> {
    let bytes: u64 = ADAPTER_RAM.captures(output)?[1].parse().ok()?;
    Some(bytes / (1024 * 1024))
}

/// amdgpu exposes a busy percentage per card
pub fn drm_busy_percent(drm_root: &Path) -> Option<f64> {
    let mut cards: Vec<_> = fs::read_dir(drm_root)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with("card"))
                && path.join("device").exists()
        })
        .collect();
    cards.sort();

    cards.iter().find_map(|card| {
        let busy = fs::read_to_string(card.join("device/gpu_busy_percent")).ok()?;
        busy.trim().parse::<u8>().ok().map(f64::from)
    })
}
