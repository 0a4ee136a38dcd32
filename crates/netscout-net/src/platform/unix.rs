use crate::error::Result;
use crate::interface::LocalInterface;
use nix::net::if_::InterfaceFlags;
use nix::sys::socket::{AddressFamily, SockaddrLike};
use std::net::IpAddr;
use tracing::instrument;

#[instrument(level = "trace")]
pub fn interfaces() -> Result<Vec<LocalInterface>> {
    Ok(nix::ifaddrs::getifaddrs()
        .map_err(std::io::Error::from)?
        .filter_map(|ia| {
            let addr = ia.address.and_then(|addr| match addr.family() {
                Some(AddressFamily::Inet) => addr
                    .as_sockaddr_in()
                    .map(|sock_addr| IpAddr::V4(sock_addr.ip())),
                Some(AddressFamily::Inet6) => addr
                    .as_sockaddr_in6()
                    .map(|sock_addr| IpAddr::V6(sock_addr.ip())),
                _ => None,
            })?;
            Some(LocalInterface {
                name: ia.interface_name,
                addr,
                is_up: ia.flags.contains(InterfaceFlags::IFF_UP),
                is_loopback: ia.flags.contains(InterfaceFlags::IFF_LOOPBACK),
            })
        })
        .collect())
}
