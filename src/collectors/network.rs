//! Network identity and listening ports

use crate::data::NetworkInfo;
use crate::platform::Platform;
use crate::utils::{command::*, parsing::*};
use std::collections::BTreeSet;
use std::net::{IpAddr, ToSocketAddrs};

const SHOWN_PORTS: usize = 5;

pub fn collect_network_info(platform: Platform) -> NetworkInfo {
    let (hostname, (ip_address, open_ports)) = rayon::join(hostname, || {
        rayon::join(ip_address, || open_ports(platform))
    });

    NetworkInfo {
        hostname,
        ip_address,
        open_ports,
    }
}

pub fn hostname() -> String {
    ::hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Address of the interface carrying the default route, else whatever the
/// hostname resolves to
pub fn ip_address() -> String {
    match local_ip_address::local_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            log::debug!("no default-route address: {}", e);
            resolve_hostname(&hostname())
                .map(|ip| ip.to_string())
                .unwrap_or_else(|| "Unknown".to_string())
        }
    }
}

fn resolve_hostname(name: &str) -> Option<IpAddr> {
    let addrs: Vec<IpAddr> = (name, 0).to_socket_addrs().ok()?.map(|addr| addr.ip()).collect();
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

/// Listening TCP/UDP ports
pub fn open_ports(platform: Platform) -> String {
    let ports = match platform {
        Platform::Linux => parse_ss_ports(&run_command_or_empty("ss", &["-tuln"])),
        Platform::Windows => parse_netstat_ports(&run_command_or_empty("netstat", &["-ano"])),
        Platform::MacOs => parse_lsof_ports(&run_command_or_empty("lsof", &["-i", "-P"])),
        Platform::Other => Vec::new(),
    };
    format_ports(ports)
}

/// `ss -tuln`: local `addr:port` is the fifth column, after a header line
pub fn parse_ss_ports(output: &str) -> Vec<u16> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(4))
        .filter_map(port_from_address)
        .collect()
}

/// `netstat -ano`: LISTENING rows, local address in the second column
pub fn parse_netstat_ports(output: &str) -> Vec<u16> {
    output
        .lines()
        .filter(|line| line.contains("LISTENING"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(port_from_address)
        .collect()
}

/// `lsof -i -P`: LISTEN rows, `addr:port` in the ninth column
pub fn parse_lsof_ports(output: &str) -> Vec<u16> {
    output
        .lines()
        .filter(|line| line.contains("LISTEN"))
        .filter_map(|line| line.split_whitespace().nth(8))
        .filter_map(port_from_address)
        .collect()
}

/// Unique ports in ascending order, at most five shown
pub fn format_ports(ports: Vec<u16>) -> String {
    let unique: Vec<String> = ports
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|port| port.to_string())
        .collect();
    join_limited(&unique, SHOWN_PORTS, "None")
}
