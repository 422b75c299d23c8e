use kernelview::collectors::{desktop, gpu, hardware, network, packages, system};
use kernelview::{collect_for, Platform, VramInfo};

#[test]
fn test_unsupported_platform_fallbacks() {
    let platform = Platform::Other;

    assert_eq!(system::kernel(platform), "Unknown");
    assert_eq!(system::terminal(platform), "Unknown");
    assert_eq!(system::locale(platform), "Unknown");
    assert_eq!(desktop::resolution(platform), "Unknown");
    assert_eq!(desktop::window_manager(platform), "Unknown");
    assert_eq!(desktop::desktop_environment(platform), "Unknown");
    assert_eq!(network::open_ports(platform), "None");
    assert_eq!(packages::package_counts(platform), "None detected");
    assert_eq!(gpu::collect_gpu_info(platform).primary, "Unknown");
    assert_eq!(gpu::vram(platform), VramInfo::default());
    assert_eq!(gpu::vram(platform).to_string(), "Unknown");
    assert!(hardware::cpu_brand(platform).starts_with("Unknown ("));
}

#[test]
fn test_every_field_has_a_value() {
    let info = collect_for(Platform::Other);
    let fields = info.fields();

    assert_eq!(fields.len(), 24);
    for (name, value) in &fields {
        assert!(!value.is_empty(), "{} is empty", name);
    }
    assert_eq!(info.field("Open Ports").as_deref(), Some("None"));
    assert_eq!(info.field("Packages").as_deref(), Some("None detected"));
    assert_eq!(info.field("DE").as_deref(), Some("Unknown"));
}

#[test]
fn test_current_platform_does_not_panic() {
    let info = kernelview::collect_system_info();
    assert!(!info.os.uptime.is_empty());
    assert!(info.field("Hostname").is_some());
}
