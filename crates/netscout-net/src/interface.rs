use crate::error::Result;
use crate::platform;
use std::net::IpAddr;

/// An address assigned to a local network interface.
///
/// An interface with several addresses appears once per address.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LocalInterface {
    pub name: String,
    pub addr: IpAddr,
    pub is_up: bool,
    pub is_loopback: bool,
}

/// List the addresses of every local network interface.
pub fn interfaces() -> Result<Vec<LocalInterface>> {
    platform::interfaces()
}

/// The primary local address of this host.
///
/// This is the first IPv4 address of an up, non-loopback interface, or the
/// first such IPv6 address if there is no IPv4 address.
pub fn local_ip() -> Result<Option<IpAddr>> {
    let all = interfaces()?;
    let addr = select_local_ip(&all);
    tracing::debug!(?addr, interfaces = all.len(), "local ip");
    Ok(addr)
}

fn select_local_ip(interfaces: &[LocalInterface]) -> Option<IpAddr> {
    let mut candidates = interfaces
        .iter()
        .filter(|iface| iface.is_up && !iface.is_loopback && !iface.addr.is_loopback());
    let first = candidates.clone().find(|iface| iface.addr.is_ipv4());
    first.or_else(|| candidates.next()).map(|iface| iface.addr)
}
