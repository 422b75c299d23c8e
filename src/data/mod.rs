pub mod hardware;
pub mod system;

pub use hardware::{CpuInfo, GpuInfo, HardwareInfo, MemoryUsage, SwapInfo, VramInfo, VramUsage};
pub use system::{DesktopInfo, NetworkInfo, OsInfo, SoftwareInfo, SystemInfo};
