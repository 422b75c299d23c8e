use kernelview::{collect_system_info, display, Config};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::new().filter_or("KERNELVIEW_LOG", "warn"),
    )
    .init();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("{}; using default settings", e);
        Config::default()
    });

    let info = collect_system_info();

    if let Err(e) = display::print(&info, &config) {
        log::debug!("could not write report: {}", e);
    }
}
