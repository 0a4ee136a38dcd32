//! TCP port checks and local network interface discovery.
//!
//! # Example
//!
//! Check which of the first 1024 ports of the local host accept a TCP
//! connection:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! # use std::net::{IpAddr, Ipv4Addr};
//! use netscout_net::{PortScanner, PortStatus};
//!
//! let addr = IpAddr::V4(Ipv4Addr::LOCALHOST);
//! for reply in PortScanner::default().scan(addr, 1..=1024)? {
//!     if reply.status == PortStatus::Open {
//!         println!("{} is open", reply.port);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Hosts given by name are resolved with a `netscout_dns::Resolver` first, see
//! [`PortScanner::check_host`] and [`PortScanner::scan_host`].
#![forbid(unsafe_code)]

mod error;
mod interface;
mod platform;
mod port;

pub use error::{Error, Result};
pub use interface::{interfaces, local_ip, LocalInterface};
pub use port::{defaults, PortReply, PortScanner, PortStatus};
