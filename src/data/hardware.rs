//! Hardware-specific information structures

use std::fmt;

/// Hardware information
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareInfo {
    pub cpu: CpuInfo,
    pub gpu: GpuInfo,
    pub vram: VramInfo,
    pub memory: MemoryUsage,
    pub disk: MemoryUsage,
    pub swap: SwapInfo,
}

/// CPU information, already formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    pub brand: String,
    pub cores_threads: String,
    pub speed: String,
    pub usage: String,
}

/// GPU information with support for multiple GPUs
#[derive(Debug, Clone, PartialEq)]
pub struct GpuInfo {
    pub primary: String,
    pub all_gpus: Vec<String>,
}

impl GpuInfo {
    pub fn unknown() -> Self {
        GpuInfo {
            primary: "Unknown".to_string(),
            all_gpus: Vec::new(),
        }
    }

    pub fn from_list(all_gpus: Vec<String>) -> Self {
        match all_gpus.first() {
            Some(first) => GpuInfo {
                primary: without_kind_tag(first),
                all_gpus,
            },
            None => GpuInfo::unknown(),
        }
    }
}

/// The ` [Discrete]`/` [Integrated]` suffix only belongs on the per-GPU rows
fn without_kind_tag(name: &str) -> String {
    [" [Discrete]", " [Integrated]"]
        .iter()
        .find_map(|tag| name.strip_suffix(tag))
        .unwrap_or(name)
        .to_string()
}

/// What the usage slot of a VRAM reading holds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VramUsage {
    Percent(f64),
    /// Integrated graphics carving memory out of system RAM
    Shared,
}

/// Video memory; each part is optional since most sources only report some of it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VramInfo {
    pub total_mb: Option<u64>,
    pub used_mb: Option<u64>,
    pub free_mb: Option<u64>,
    pub usage: Option<VramUsage>,
}

impl VramInfo {
    /// Full reading from a total/used pair
    pub fn from_total_used(total_mb: u64, used_mb: u64) -> Self {
        let percent = if total_mb > 0 {
            crate::utils::parsing::round_tenth(used_mb as f64 / total_mb as f64 * 100.0)
        } else {
            0.0
        };
        VramInfo {
            total_mb: Some(total_mb),
            used_mb: Some(used_mb),
            free_mb: Some(total_mb.saturating_sub(used_mb)),
            usage: Some(VramUsage::Percent(percent)),
        }
    }

    pub fn total_only(total_mb: u64) -> Self {
        VramInfo {
            total_mb: Some(total_mb),
            ..Default::default()
        }
    }

    pub fn shared() -> Self {
        VramInfo {
            usage: Some(VramUsage::Shared),
            ..Default::default()
        }
    }
}

impl fmt::Display for VramInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.total_mb, self.used_mb, self.usage) {
            (Some(total), Some(used), Some(VramUsage::Percent(pct))) if total > 0 => {
                write!(f, "{}/{}MB ({:.1}%)", used, total, pct)
            }
            (Some(total), Some(used), _) if total > 0 => write!(f, "{}/{}MB", used, total),
            (Some(total), None, _) if total > 0 => write!(f, "{}MB (Total)", total),
            (_, _, Some(VramUsage::Shared)) => f.write_str("Shared"),
            _ => f.write_str("Unknown"),
        }
    }
}

/// Used/total pair in whole gigabytes, used for RAM and disk
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryUsage {
    pub used_gb: u64,
    pub total_gb: u64,
    pub percent: f64,
}

impl fmt::Display for MemoryUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}GB ({:.1}%)", self.used_gb, self.total_gb, self.percent)
    }
}

/// Swap space in whole gigabytes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwapInfo {
    pub total_gb: u64,
    pub used_gb: u64,
    pub free_gb: u64,
    pub percent: f64,
}

impl SwapInfo {
    pub fn new(total_gb: u64, used_gb: u64, percent: f64) -> Self {
        SwapInfo {
            total_gb,
            used_gb,
            free_gb: total_gb.saturating_sub(used_gb),
            percent,
        }
    }
}

impl fmt::Display for SwapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}GB ({:.1}%)", self.used_gb, self.total_gb, self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vram_display_variants() {
        assert_eq!(VramInfo::from_total_used(8192, 1024).to_string(), "1024/8192MB (12.5%)");
        assert_eq!(VramInfo::total_only(4096).to_string(), "4096MB (Total)");
        assert_eq!(VramInfo::shared().to_string(), "Shared");
        assert_eq!(VramInfo::default().to_string(), "Unknown");
        assert_eq!(VramInfo::total_only(0).to_string(), "Unknown");
    }

    #[test]
    fn vram_free_and_zero_total() {
        let vram = VramInfo::from_total_used(0, 0);
        assert_eq!(vram.free_mb, Some(0));
        assert_eq!(vram.usage, Some(VramUsage::Percent(0.0)));
        assert_eq!(vram.to_string(), "Unknown");
        assert_eq!(VramInfo::from_total_used(100, 40).free_mb, Some(60));
    }

    #[test]
    fn swap_free_is_derived() {
        let swap = SwapInfo::new(8, 3, 37.5);
        assert_eq!(swap.free_gb, 5);
        assert_eq!(swap.to_string(), "3/8GB (37.5%)");
        assert_eq!(SwapInfo::default().to_string(), "0/0GB (0.0%)");
    }

    #[test]
    fn gpu_primary_is_first() {
        let gpus = GpuInfo::from_list(vec!["A [Discrete]".into(), "B [Integrated]".into()]);
        assert_eq!(gpus.primary, "A");
        assert_eq!(gpus.all_gpus, vec!["A [Discrete]", "B [Integrated]"]);
        assert_eq!(GpuInfo::from_list(vec!["Apple M1".into()]).primary, "Apple M1");
        assert_eq!(GpuInfo::from_list(vec![]).primary, "Unknown");
    }
}
